//! Lux logging demo
//!
//! Demonstrates basic usage of the opt300x-driver crate on the Raspberry Pi
//! Pico 2. Checks the sensor identity, switches it to continuous automatic
//! ranging, programs the alarm window, and logs one reading per conversion.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes                        |
//! |-----------|------------|------------------------------|
//! | I2C0 SDA  | GP20       |                              |
//! | I2C0 SCL  | GP21       |                              |
//! | ADDR      | GND        | Selects address 0x44         |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use opt300x_driver::{
    Config, ConversionMode, ConversionTime, Opt300x, DEFAULT_ADDRESS, RANGE_AUTO,
};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Alarm window programmed at startup.
const LOW_LIMIT_LUX: f32 = 10.0;
const HIGH_LIMIT_LUX: f32 = 1000.0;

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // --- I2C bus (GP20 = SDA, GP21 = SCL) ---
    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c::Config::default(),
    );

    // --- Light sensor ---
    let mut sensor = Opt300x::new(i2c, DEFAULT_ADDRESS);

    match sensor.verify_identity().await {
        Ok(device_id) => info!("Found OPT300x, device ID {=u16:#x}", device_id),
        Err(e) => error!("Identity check failed: {}", e),
    }

    let config = match sensor.read_config().await {
        Ok(config) => config,
        Err(e) => {
            error!("Config read failed: {}", e);
            Config::POWER_ON
        }
    };

    // Continuous automatic ranging; keep the remaining bits as read.
    let config = config
        .with_range_number(RANGE_AUTO)
        .with_conversion_time(ConversionTime::Ms800)
        .with_mode(ConversionMode::Continuous);

    sensor
        .write_config(config)
        .await
        .expect("Failed to write sensor config");

    if let Err(e) = sensor.write_low_limit(LOW_LIMIT_LUX).await {
        error!("Failed to set low limit: {}", e);
    }
    if let Err(e) = sensor.write_high_limit(HIGH_LIMIT_LUX).await {
        error!("Failed to set high limit: {}", e);
    }

    match (sensor.read_low_limit().await, sensor.read_high_limit().await) {
        (Ok(low), Ok(high)) => info!("Alarm window: {} .. {} lux", low.lux, high.lux),
        _ => warn!("Could not read back alarm window"),
    }

    info!("Lux example started");

    // Main loop: wait one conversion, read, log, repeat.
    loop {
        Timer::after(Duration::from_millis(800)).await;

        match sensor.read_result().await {
            Ok(reading) => info!(
                "Illuminance: {} lux (exponent {=u8})",
                reading.lux,
                reading.raw.exponent()
            ),
            Err(e) => error!("Read failed: {} (code {=i16})", e, e.code()),
        }
    }
}
