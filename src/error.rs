//! Error types for the OPT300x driver.
//!
//! Driver operations return [`Error`], which keeps the bus implementation's
//! own error value. [`ErrorCode`] is the flat, `Copy` classification of an
//! outcome used by the reading cache and by callers that need the legacy
//! numeric codes.

use core::fmt;

use embedded_hal_async::i2c::{self, ErrorKind, NoAcknowledgeSource};

/// Multiplier turning a transport status into its numeric error code.
///
/// The value only has to keep transport codes apart from
/// [`TIMEOUT_CODE`] and zero; it carries no protocol meaning.
pub const TRANSPORT_CODE_SCALE: i16 = -10;

/// Numeric code reported for a poll timeout.
pub const TIMEOUT_CODE: i16 = -100;

/// Numeric code reported when a non-TI part answers the identity check.
pub const UNEXPECTED_DEVICE_CODE: i16 = -200;

/// Errors that can occur when communicating with the sensor.
#[derive(Debug)]
pub enum Error<E> {
    /// Underlying I2C bus error.
    I2c(E),

    /// The register reply did not become available within the poll bound.
    Timeout,

    /// The manufacturer ID did not match a Texas Instruments part.
    UnexpectedDevice {
        manufacturer_id: u16,
        device_id: u16,
    },
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::I2c(error)
    }
}

impl<E: i2c::Error> Error<E> {
    /// Classify this error.
    pub fn status(&self) -> ErrorCode {
        match self {
            Error::I2c(e) => ErrorCode::Transport(TransportStatus::from_kind(e.kind())),
            Error::Timeout => ErrorCode::Timeout,
            Error::UnexpectedDevice { .. } => ErrorCode::UnexpectedDevice,
        }
    }

    /// Legacy numeric code, see [`ErrorCode::code`].
    pub fn code(&self) -> i16 {
        self.status().code()
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
            Error::Timeout => write!(f, "Timed out waiting for register reply"),
            Error::UnexpectedDevice {
                manufacturer_id,
                device_id,
            } => write!(
                f,
                "Unexpected device (manufacturer {:#06x}, device {:#06x})",
                manufacturer_id, device_id
            ),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for Error<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            Error::Timeout => defmt::write!(f, "Timed out waiting for register reply"),
            Error::UnexpectedDevice {
                manufacturer_id,
                device_id,
            } => defmt::write!(
                f,
                "Unexpected device (manufacturer {=u16:#x}, device {=u16:#x})",
                *manufacturer_id,
                *device_id
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Transport status mapping
// ---------------------------------------------------------------------------

/// Completion status of a failed bus transaction, numbered the way
/// two-wire masters conventionally report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TransportStatus {
    /// Transmit buffer overrun.
    DataTooLong = 1,
    /// Address byte not acknowledged.
    AddressNack = 2,
    /// Data byte not acknowledged.
    DataNack = 3,
    /// Any other bus failure.
    Other = 4,
}

impl TransportStatus {
    /// Interpret a raw status byte. `0` is success and yields `None`;
    /// unknown non-zero values collapse to [`TransportStatus::Other`].
    pub const fn from_raw(status: u8) -> Option<Self> {
        match status {
            0 => None,
            1 => Some(TransportStatus::DataTooLong),
            2 => Some(TransportStatus::AddressNack),
            3 => Some(TransportStatus::DataNack),
            _ => Some(TransportStatus::Other),
        }
    }

    /// Derive the status from an `embedded-hal` error kind.
    pub fn from_kind(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Overrun => TransportStatus::DataTooLong,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address) => TransportStatus::AddressNack,
            ErrorKind::NoAcknowledge(_) => TransportStatus::DataNack,
            _ => TransportStatus::Other,
        }
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// Outcome classification of a driver operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorCode {
    #[default]
    NoError,
    Timeout,
    Transport(TransportStatus),
    UnexpectedDevice,
}

impl ErrorCode {
    /// Map a raw transport completion status.
    pub const fn from_transport_status(status: u8) -> Self {
        match TransportStatus::from_raw(status) {
            None => ErrorCode::NoError,
            Some(status) => ErrorCode::Transport(status),
        }
    }

    /// Numeric code: `0` for success, [`TIMEOUT_CODE`] for a timeout,
    /// [`UNEXPECTED_DEVICE_CODE`] for an identity mismatch, and the
    /// transport status times [`TRANSPORT_CODE_SCALE`] otherwise
    /// (`-10` to `-40`).
    pub const fn code(self) -> i16 {
        match self {
            ErrorCode::NoError => 0,
            ErrorCode::Timeout => TIMEOUT_CODE,
            ErrorCode::Transport(status) => status.raw() as i16 * TRANSPORT_CODE_SCALE,
            ErrorCode::UnexpectedDevice => UNEXPECTED_DEVICE_CODE,
        }
    }

    pub const fn is_ok(self) -> bool {
        matches!(self, ErrorCode::NoError)
    }
}

impl<T, E: i2c::Error> From<&Result<T, Error<E>>> for ErrorCode {
    fn from(result: &Result<T, Error<E>>) -> Self {
        match result {
            Ok(_) => ErrorCode::NoError,
            Err(e) => e.status(),
        }
    }
}
