//! Low-level OPT300x register protocol.
//!
//! Implements command dispatch and the polled register read:
//! 1. Write the register's command byte
//! 2. Read 2 bytes, retrying on NACK at a fixed interval up to a bound
//! 3. Assemble the reply big-endian
//!
//! This module is crate-private — consumers interact with [`Opt300x`]
//! in `sensor.rs` instead.
//!
//! [`Opt300x`]: crate::Opt300x

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{Error as _, ErrorKind, I2c};

use crate::error::Error;
use crate::registers::{Register, POLL_INTERVAL_MS, POLL_MAX_ATTEMPTS};

/// Retry policy for collecting a register reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollConfig {
    /// Wait between two read attempts, in milliseconds.
    pub interval_ms: u32,
    /// Total number of read attempts before giving up. Zero times out
    /// without touching the bus.
    pub max_attempts: u16,
}

impl Default for PollConfig {
    /// 10 ms × 250 attempts, a ceiling of about 2.5 s.
    fn default() -> Self {
        Self {
            interval_ms: POLL_INTERVAL_MS,
            max_attempts: POLL_MAX_ATTEMPTS,
        }
    }
}

/// Low-level register driver.
///
/// Owns an I2C peripheral and a delay provider and implements the
/// select-then-poll exchange every register access is built from.
pub(crate) struct RegisterBus<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    poll: PollConfig,
}

impl<I2C, D> RegisterBus<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a new register driver.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address
    /// * `delay` — delay provider used between poll attempts
    /// * `poll` — reply retry policy
    pub fn new(i2c: I2C, address: u8, delay: D, poll: PollConfig) -> Self {
        Self {
            i2c,
            delay,
            address,
            poll,
        }
    }

    pub fn poll_config(&self) -> PollConfig {
        self.poll
    }

    /// Give back the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    // -----------------------------------------------------------------------
    // Core protocol primitives
    // -----------------------------------------------------------------------

    /// Point the device at `register` with a single-byte write.
    pub async fn select(&mut self, register: Register) -> Result<(), Error<I2C::Error>> {
        self.i2c.write(self.address, &[register.command()]).await?;
        Ok(())
    }

    /// Poll for the 2-byte reply to a previous [`select`](Self::select).
    ///
    /// A NACKed read means the reply is not available yet; it is retried
    /// after [`PollConfig::interval_ms`]. Any other bus error ends the poll
    /// immediately. After [`PollConfig::max_attempts`] unanswered reads the
    /// poll gives up with [`Error::Timeout`].
    pub async fn read_reply(&mut self) -> Result<u16, Error<I2C::Error>> {
        let mut buf = [0u8; 2];

        for attempt in 1..=self.poll.max_attempts {
            match self.i2c.read(self.address, &mut buf).await {
                Ok(()) => return Ok(u16::from_be_bytes(buf)),
                Err(e) if matches!(e.kind(), ErrorKind::NoAcknowledge(_)) => {
                    trace!("reply not ready, attempt {=u16}", attempt);
                    if attempt < self.poll.max_attempts {
                        self.delay.delay_ms(self.poll.interval_ms).await;
                    }
                }
                Err(e) => return Err(Error::I2c(e)),
            }
        }

        warn!(
            "no reply from {=u8:#x} after {=u16} attempts",
            self.address,
            self.poll.max_attempts
        );
        Err(Error::Timeout)
    }

    // -----------------------------------------------------------------------
    // Register access
    // -----------------------------------------------------------------------

    /// Read a 16-bit register.
    ///
    /// If selecting the register fails, no read is attempted and the select
    /// error is returned.
    pub async fn read_register(&mut self, register: Register) -> Result<u16, Error<I2C::Error>> {
        self.select(register).await?;
        let value = self.read_reply().await?;
        debug!("read {} = {=u16:#x}", register, value);
        Ok(value)
    }

    /// Write a 16-bit register.
    ///
    /// Sends the command byte and both value bytes, high byte first, in a
    /// single I2C write transaction.
    pub async fn write_register(
        &mut self,
        register: Register,
        value: u16,
    ) -> Result<(), Error<I2C::Error>> {
        let [hi, lo] = value.to_be_bytes();
        self.i2c
            .write(self.address, &[register.command(), hi, lo])
            .await?;
        debug!("wrote {} = {=u16:#x}", register, value);
        Ok(())
    }
}
