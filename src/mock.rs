//! Test doubles: a simulated OPT300x on an `embedded-hal-async` I2C bus and
//! a counting delay.

use std::vec::Vec;

pub use embassy_futures::block_on;

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{
    self, ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation, SevenBitAddress,
};

use crate::registers::{Register, DEVICE_ID_OPT3001, MANUFACTURER_ID_TI};

/// Bus error carrying a fixed [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError(pub ErrorKind);

impl i2c::Error for MockError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// I2C transaction type for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write { addr: u8, data: Vec<u8> },
    Read { addr: u8, len: usize },
}

/// Register-level model of the sensor.
///
/// A write sets the register pointer from its first byte and, when two more
/// bytes follow, stores them big-endian. A read returns the selected
/// register. Reads can be NACKed in the address phase a number of times (or
/// forever) to model a reply that is not ready yet.
#[derive(Debug)]
pub struct MockOpt300x {
    address: u8,
    registers: [u16; 0x80],
    pointer: usize,
    log: Vec<Transaction>,
    pending_nacks: u32,
    never_ready: bool,
    ready_budget: Option<u32>,
    write_error: Option<ErrorKind>,
    read_error: Option<ErrorKind>,
}

impl MockOpt300x {
    /// Device at `address` with datasheet power-on register contents.
    pub fn new(address: u8) -> Self {
        let mut mock = Self {
            address,
            registers: [0; 0x80],
            pointer: 0,
            log: Vec::new(),
            pending_nacks: 0,
            never_ready: false,
            ready_budget: None,
            write_error: None,
            read_error: None,
        };
        mock.set_register(Register::Config, 0xC810);
        mock.set_register(Register::HighLimit, 0xBFFF);
        mock.set_register(Register::ManufacturerId, MANUFACTURER_ID_TI);
        mock.set_register(Register::DeviceId, DEVICE_ID_OPT3001);
        mock
    }

    pub fn with_register(mut self, register: Register, value: u16) -> Self {
        self.set_register(register, value);
        self
    }

    /// NACK the next `count` reads before answering.
    pub fn with_reply_delay(mut self, count: u32) -> Self {
        self.pending_nacks = count;
        self
    }

    /// NACK every read.
    pub fn never_ready(mut self) -> Self {
        self.never_ready = true;
        self
    }

    /// Answer the next `count` reads, then NACK every read after that.
    pub fn answering_only(mut self, count: u32) -> Self {
        self.ready_budget = Some(count);
        self
    }

    /// Fail every write with `kind`.
    pub fn failing_writes(mut self, kind: ErrorKind) -> Self {
        self.write_error = Some(kind);
        self
    }

    /// Fail every read with `kind`.
    pub fn failing_reads(mut self, kind: ErrorKind) -> Self {
        self.read_error = Some(kind);
        self
    }

    pub fn set_register(&mut self, register: Register, value: u16) {
        self.registers[register.command() as usize] = value;
    }

    pub fn register(&self, register: Register) -> u16 {
        self.registers[register.command() as usize]
    }

    /// Get transaction log (for test verification)
    pub fn transactions(&self) -> &[Transaction] {
        &self.log
    }

    pub fn read_count(&self) -> usize {
        self.log
            .iter()
            .filter(|t| matches!(t, Transaction::Read { .. }))
            .count()
    }

    fn handle_write(&mut self, addr: u8, data: &[u8]) -> Result<(), MockError> {
        self.log.push(Transaction::Write {
            addr,
            data: data.to_vec(),
        });
        if let Some(kind) = self.write_error {
            return Err(MockError(kind));
        }
        if let Some(&command) = data.first() {
            self.pointer = command as usize & 0x7F;
        }
        if let [_, hi, lo, ..] = *data {
            self.registers[self.pointer] = u16::from_be_bytes([hi, lo]);
        }
        Ok(())
    }

    fn handle_read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), MockError> {
        self.log.push(Transaction::Read {
            addr,
            len: buffer.len(),
        });
        if let Some(kind) = self.read_error {
            return Err(MockError(kind));
        }
        if self.never_ready || self.pending_nacks > 0 {
            self.pending_nacks = self.pending_nacks.saturating_sub(1);
            return Err(MockError(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            )));
        }
        match self.ready_budget {
            Some(0) => {
                return Err(MockError(ErrorKind::NoAcknowledge(
                    NoAcknowledgeSource::Address,
                )))
            }
            Some(ref mut budget) => *budget -= 1,
            None => {}
        }
        let bytes = self.registers[self.pointer].to_be_bytes();
        let to_read = core::cmp::min(buffer.len(), bytes.len());
        buffer[..to_read].copy_from_slice(&bytes[..to_read]);
        Ok(())
    }
}

impl ErrorType for MockOpt300x {
    type Error = MockError;
}

impl I2c<SevenBitAddress> for MockOpt300x {
    async fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(MockError(ErrorKind::NoAcknowledge(
                NoAcknowledgeSource::Address,
            )));
        }
        for operation in operations {
            match operation {
                Operation::Write(data) => self.handle_write(address, data)?,
                Operation::Read(buffer) => self.handle_read(address, buffer)?,
            }
        }
        Ok(())
    }
}

/// Delay that returns immediately and records what was requested.
#[derive(Debug, Default)]
pub struct CountingDelay {
    pub calls: u32,
    pub total_ns: u64,
}

impl DelayNs for CountingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ns += u64::from(ns);
    }
}
