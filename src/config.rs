//! Configuration register.
//!
//! [`Config`] carries the raw 16-bit word exactly as read from or written to
//! the sensor. The accessors below are views over the datasheet bit-fields;
//! the `with_*` builders change only the bits they name, so a word read from
//! the device and written back is transmitted unchanged.
//!
//! | Bits  | Field            |
//! |-------|------------------|
//! | 15:12 | range number     |
//! | 11    | conversion time  |
//! | 10:9  | conversion mode  |
//! | 8     | overflow         |
//! | 7     | conversion ready |
//! | 6     | flag high        |
//! | 5     | flag low         |
//! | 4     | latch            |
//! | 3     | polarity         |
//! | 2     | mask exponent    |
//! | 1:0   | fault count      |

const RANGE_SHIFT: u16 = 12;
const RANGE_MASK: u16 = 0xF << RANGE_SHIFT;
const CONVERSION_TIME_BIT: u16 = 1 << 11;
const MODE_SHIFT: u16 = 9;
const MODE_MASK: u16 = 0b11 << MODE_SHIFT;
const OVERFLOW_BIT: u16 = 1 << 8;
const CONVERSION_READY_BIT: u16 = 1 << 7;
const FLAG_HIGH_BIT: u16 = 1 << 6;
const FLAG_LOW_BIT: u16 = 1 << 5;
const LATCH_BIT: u16 = 1 << 4;
const POLARITY_BIT: u16 = 1 << 3;
const MASK_EXPONENT_BIT: u16 = 1 << 2;
const FAULT_COUNT_MASK: u16 = 0b11;

/// Range number selecting automatic full-scale ranging.
pub const RANGE_AUTO: u8 = 0x0C;

/// Integration time of one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionTime {
    Ms100,
    Ms800,
}

/// Conversion mode field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConversionMode {
    Shutdown,
    SingleShot,
    /// Encoded as `0b10`; `0b11` also reads back as continuous.
    Continuous,
}

/// Raw configuration register word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config(u16);

impl Config {
    /// Power-on reset value: automatic range, 800 ms, shutdown, latched.
    pub const POWER_ON: Config = Config(0xC810);

    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u16 {
        self.0
    }

    // -----------------------------------------------------------------------
    // Field views
    // -----------------------------------------------------------------------

    pub const fn range_number(self) -> u8 {
        ((self.0 & RANGE_MASK) >> RANGE_SHIFT) as u8
    }

    pub const fn conversion_time(self) -> ConversionTime {
        if self.0 & CONVERSION_TIME_BIT != 0 {
            ConversionTime::Ms800
        } else {
            ConversionTime::Ms100
        }
    }

    pub const fn mode(self) -> ConversionMode {
        match (self.0 & MODE_MASK) >> MODE_SHIFT {
            0b00 => ConversionMode::Shutdown,
            0b01 => ConversionMode::SingleShot,
            _ => ConversionMode::Continuous,
        }
    }

    /// Set by the device when the measurement exceeded the selected range.
    pub const fn overflow(self) -> bool {
        self.0 & OVERFLOW_BIT != 0
    }

    /// Set by the device when a conversion completed. Cleared on config read.
    pub const fn conversion_ready(self) -> bool {
        self.0 & CONVERSION_READY_BIT != 0
    }

    pub const fn flag_high(self) -> bool {
        self.0 & FLAG_HIGH_BIT != 0
    }

    pub const fn flag_low(self) -> bool {
        self.0 & FLAG_LOW_BIT != 0
    }

    pub const fn latch(self) -> bool {
        self.0 & LATCH_BIT != 0
    }

    pub const fn polarity(self) -> bool {
        self.0 & POLARITY_BIT != 0
    }

    pub const fn mask_exponent(self) -> bool {
        self.0 & MASK_EXPONENT_BIT != 0
    }

    /// Number of consecutive faults (encoded 0–3) needed to trigger the flags.
    pub const fn fault_count(self) -> u8 {
        (self.0 & FAULT_COUNT_MASK) as u8
    }

    // -----------------------------------------------------------------------
    // Builders
    // -----------------------------------------------------------------------

    /// Range number is truncated to 4 bits.
    pub const fn with_range_number(self, range: u8) -> Self {
        Self((self.0 & !RANGE_MASK) | (((range as u16) << RANGE_SHIFT) & RANGE_MASK))
    }

    pub const fn with_conversion_time(self, time: ConversionTime) -> Self {
        match time {
            ConversionTime::Ms100 => Self(self.0 & !CONVERSION_TIME_BIT),
            ConversionTime::Ms800 => Self(self.0 | CONVERSION_TIME_BIT),
        }
    }

    pub const fn with_mode(self, mode: ConversionMode) -> Self {
        let bits: u16 = match mode {
            ConversionMode::Shutdown => 0b00,
            ConversionMode::SingleShot => 0b01,
            ConversionMode::Continuous => 0b10,
        };
        Self((self.0 & !MODE_MASK) | (bits << MODE_SHIFT))
    }

    pub const fn with_latch(self, latch: bool) -> Self {
        Self::set_bit(self, LATCH_BIT, latch)
    }

    pub const fn with_polarity(self, polarity: bool) -> Self {
        Self::set_bit(self, POLARITY_BIT, polarity)
    }

    pub const fn with_mask_exponent(self, mask: bool) -> Self {
        Self::set_bit(self, MASK_EXPONENT_BIT, mask)
    }

    /// Fault count is truncated to 2 bits.
    pub const fn with_fault_count(self, count: u8) -> Self {
        Self((self.0 & !FAULT_COUNT_MASK) | (count as u16 & FAULT_COUNT_MASK))
    }

    const fn set_bit(self, bit: u16, value: bool) -> Self {
        if value {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }
}

impl From<u16> for Config {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Config> for u16 {
    fn from(config: Config) -> Self {
        config.0
    }
}
