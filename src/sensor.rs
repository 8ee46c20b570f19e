//! High-level interface for the OPT300x ambient light sensor.
//!
//! [`Opt300x`] wraps the low-level register driver with lux conversion,
//! typed configuration, and a cache of the most recent readings.

use embassy_time::Delay;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

use crate::codec::ExponentMantissa;
use crate::config::Config;
use crate::driver::{PollConfig, RegisterBus};
use crate::error::Error;
use crate::registers::{Register, MANUFACTURER_ID_TI};
use crate::state::DeviceState;

/// A decoded result or limit register.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Light level in lux.
    pub lux: f32,
    /// Register contents the value was decoded from.
    pub raw: ExponentMantissa,
}

/// High-level interface for an OPT300x ambient light sensor.
///
/// Every operation is one register exchange; none is retried beyond the
/// bounded reply poll configured by [`PollConfig`].
///
/// # Example
///
/// ```ignore
/// use opt300x_driver::{Opt300x, DEFAULT_ADDRESS};
///
/// // `i2c` is any `embedded-hal-async` I2C implementation
/// let mut sensor = Opt300x::new(i2c, DEFAULT_ADDRESS);
///
/// let reading = sensor.read_result().await?;
/// ```
pub struct Opt300x<I2C, D = Delay> {
    bus: RegisterBus<I2C, D>,
    state: DeviceState,
}

impl<I2C> Opt300x<I2C, Delay>
where
    I2C: I2c,
{
    /// Create a sensor interface that waits on the embassy-time driver
    /// between reply polls, with the default poll policy.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (0x44–0x47)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self::with_delay(i2c, address, Delay, PollConfig::default())
    }
}

impl<I2C, D> Opt300x<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a sensor interface with an explicit delay provider and poll
    /// policy. No bus traffic is generated.
    pub fn with_delay(i2c: I2C, address: u8, delay: D, poll: PollConfig) -> Self {
        Self {
            bus: RegisterBus::new(i2c, address, delay, poll),
            state: DeviceState::new(address),
        }
    }

    pub fn address(&self) -> u8 {
        self.state.address()
    }

    pub fn poll_config(&self) -> PollConfig {
        self.bus.poll_config()
    }

    /// Cached readings and configuration.
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Consume the driver and give back the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        self.bus.release()
    }

    // -----------------------------------------------------------------------
    // Identification
    // -----------------------------------------------------------------------

    /// Read the manufacturer ID (`0x5449` for Texas Instruments).
    pub async fn read_manufacturer_id(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.bus.read_register(Register::ManufacturerId).await
    }

    /// Read the device ID (`0x3001` for the OPT3001).
    pub async fn read_device_id(&mut self) -> Result<u16, Error<I2C::Error>> {
        self.bus.read_register(Register::DeviceId).await
    }

    /// Check that a Texas Instruments part answers at this address.
    ///
    /// Returns the device ID on success.
    ///
    /// # Errors
    /// * [`Error::UnexpectedDevice`] if the manufacturer ID does not match
    /// * [`Error::I2c`] / [`Error::Timeout`] on communication failure
    pub async fn verify_identity(&mut self) -> Result<u16, Error<I2C::Error>> {
        let manufacturer_id = self.read_manufacturer_id().await?;
        let device_id = self.read_device_id().await?;

        if manufacturer_id != MANUFACTURER_ID_TI {
            warn!(
                "unexpected manufacturer {=u16:#x} at {=u8:#x}",
                manufacturer_id,
                self.address()
            );
            return Err(Error::UnexpectedDevice {
                manufacturer_id,
                device_id,
            });
        }

        Ok(device_id)
    }

    // -----------------------------------------------------------------------
    // Lux registers
    // -----------------------------------------------------------------------

    /// Read the latest conversion result.
    ///
    /// Updates the cached result: the value on success, only the status on
    /// failure (see [`CachedReading`](crate::CachedReading)).
    pub async fn read_result(&mut self) -> Result<Reading, Error<I2C::Error>> {
        self.read_lux_register(Register::Result).await
    }

    /// Read the high alarm limit. Updates the cached high limit.
    pub async fn read_high_limit(&mut self) -> Result<Reading, Error<I2C::Error>> {
        self.read_lux_register(Register::HighLimit).await
    }

    /// Read the low alarm limit. Updates the cached low limit.
    pub async fn read_low_limit(&mut self) -> Result<Reading, Error<I2C::Error>> {
        self.read_lux_register(Register::LowLimit).await
    }

    /// Set the high alarm limit.
    ///
    /// The value is quantized to the register's exponent/mantissa format;
    /// above 40.95 lux the stored limit may differ from `lux` by up to one
    /// step at the chosen exponent.
    pub async fn write_high_limit(&mut self, lux: f32) -> Result<(), Error<I2C::Error>> {
        self.write_lux_register(Register::HighLimit, lux).await
    }

    /// Set the low alarm limit. Quantized like
    /// [`write_high_limit`](Self::write_high_limit).
    pub async fn write_low_limit(&mut self, lux: f32) -> Result<(), Error<I2C::Error>> {
        self.write_lux_register(Register::LowLimit, lux).await
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Read the configuration register. The cached configuration is
    /// replaced only on success.
    pub async fn read_config(&mut self) -> Result<Config, Error<I2C::Error>> {
        let config = Config::from_raw(self.bus.read_register(Register::Config).await?);
        self.state.set_config(config);
        Ok(config)
    }

    /// Write the configuration register verbatim.
    pub async fn write_config(&mut self, config: Config) -> Result<(), Error<I2C::Error>> {
        self.bus.write_register(Register::Config, config.raw()).await
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn read_lux_register(
        &mut self,
        register: Register,
    ) -> Result<Reading, Error<I2C::Error>> {
        let result = self.bus.read_register(register).await.map(|raw| {
            let raw = ExponentMantissa::from_raw(raw);
            Reading {
                lux: raw.to_lux(),
                raw,
            }
        });

        if let Some(cached) = self.state.reading_mut(register) {
            match &result {
                Ok(reading) => cached.record(reading.lux),
                Err(e) => cached.record_failure(e.status()),
            }
        }

        result
    }

    async fn write_lux_register(
        &mut self,
        register: Register,
        lux: f32,
    ) -> Result<(), Error<I2C::Error>> {
        let encoded = ExponentMantissa::from_lux(lux);
        debug!(
            "{} <- {} lux as exponent {=u8}, mantissa {=u16}",
            register,
            lux,
            encoded.exponent(),
            encoded.mantissa()
        );
        self.bus.write_register(register, encoded.to_raw()).await
    }
}
