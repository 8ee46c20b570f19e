//! Async driver for the Texas Instruments OPT300x ambient light sensors.
//!
//! This crate provides an Embassy-compatible async I2C driver for the
//! OPT3001 / OPT3004 family. The sensor reports illuminance in a packed
//! 4-bit exponent / 12-bit mantissa format; the driver converts between that
//! format and `f32` lux in both directions.
//!
//! # Architecture
//!
//! - **`driver`** (crate-private) — register protocol: command byte writes,
//!   the bounded reply poll, and big-endian register transfers.
//! - **[`ExponentMantissa`]** — pure conversion between register words and lux.
//! - **[`Config`]** — the raw configuration word with named field views.
//! - **[`Opt300x`]** (public) — high-level API that reads and writes every
//!   register and caches the latest readings in a [`DeviceState`].
//!
//! # Quick start
//!
//! ```ignore
//! use opt300x_driver::{ConversionMode, Opt300x, DEFAULT_ADDRESS};
//!
//! // Construct with any `embedded-hal-async` I2C implementation
//! let mut sensor = Opt300x::new(i2c, DEFAULT_ADDRESS);
//!
//! let config = sensor.read_config().await?;
//! sensor.write_config(config.with_mode(ConversionMode::Continuous)).await?;
//!
//! let reading = sensor.read_result().await?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on public types
//!   and driver logging.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

mod codec;
mod config;
mod driver;
mod error;
mod registers;
mod sensor;
mod state;

#[cfg(test)]
mod mock;

pub use codec::{ExponentMantissa, EXPONENT_MAX, MANTISSA_MAX};
pub use config::{Config, ConversionMode, ConversionTime, RANGE_AUTO};
pub use driver::PollConfig;
pub use error::{
    Error, ErrorCode, TransportStatus, TIMEOUT_CODE, TRANSPORT_CODE_SCALE, UNEXPECTED_DEVICE_CODE,
};
pub use registers::{
    Register, ADDRESS_SCL, ADDRESS_SDA, ADDRESS_VDD, DEFAULT_ADDRESS, DEVICE_ID_OPT3001,
    MANUFACTURER_ID_TI,
};
pub use sensor::{Opt300x, Reading};
pub use state::{CachedReading, DeviceState};
