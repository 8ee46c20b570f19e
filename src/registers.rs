//! OPT300x register map and protocol constants.
//!
//! Every register is selected by writing a single command byte. All
//! registers are 16 bits wide and transferred big-endian.

// ---------------------------------------------------------------------------
// Register selectors
// ---------------------------------------------------------------------------

/// Single-byte register selector written at the start of every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Register {
    /// Latest conversion result (exponent/mantissa, read-only).
    Result = 0x00,
    /// Configuration word.
    Config = 0x01,
    /// Low alarm limit (exponent/mantissa).
    LowLimit = 0x02,
    /// High alarm limit (exponent/mantissa).
    HighLimit = 0x03,
    /// Manufacturer identifier (read-only).
    ManufacturerId = 0x7E,
    /// Device identifier (read-only).
    DeviceId = 0x7F,
}

impl Register {
    /// Command byte sent on the bus.
    pub const fn command(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// Bus addresses
// ---------------------------------------------------------------------------

/// Default 7-bit address (ADDR pin tied to GND).
pub const DEFAULT_ADDRESS: u8 = 0x44;

/// Address with ADDR tied to VDD.
pub const ADDRESS_VDD: u8 = 0x45;

/// Address with ADDR tied to SDA.
pub const ADDRESS_SDA: u8 = 0x46;

/// Address with ADDR tied to SCL.
pub const ADDRESS_SCL: u8 = 0x47;

// ---------------------------------------------------------------------------
// Identification
// ---------------------------------------------------------------------------

/// Manufacturer ID reported by Texas Instruments parts ("TI" in ASCII).
pub const MANUFACTURER_ID_TI: u16 = 0x5449;

/// Device ID reported by the OPT3001.
pub const DEVICE_ID_OPT3001: u16 = 0x3001;

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// Delay between reply poll attempts, in milliseconds.
pub const POLL_INTERVAL_MS: u32 = 10;

/// Number of reply poll attempts before a read times out.
pub const POLL_MAX_ATTEMPTS: u16 = 250;
