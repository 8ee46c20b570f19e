//! Driver-side view of the device: bus address and the most recent readings.

use crate::config::Config;
use crate::error::ErrorCode;
use crate::registers::Register;

/// Last known value of a lux register and the outcome of the latest read.
///
/// A failed read does not discard the value: `lux` keeps the last reading
/// that succeeded (0.0 before the first one) while `status` reports the
/// failure. Check [`status`](Self::status) before trusting `lux`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CachedReading {
    lux: f32,
    status: ErrorCode,
    valid: bool,
}

impl CachedReading {
    pub fn lux(&self) -> f32 {
        self.lux
    }

    pub fn status(&self) -> ErrorCode {
        self.status
    }

    /// Whether any read of this register has succeeded yet.
    pub fn has_value(&self) -> bool {
        self.valid
    }

    pub(crate) fn record(&mut self, lux: f32) {
        self.lux = lux;
        self.status = ErrorCode::NoError;
        self.valid = true;
    }

    pub(crate) fn record_failure(&mut self, status: ErrorCode) {
        self.status = status;
    }
}

/// Bus address plus cached register contents.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    address: u8,
    result: CachedReading,
    high_limit: CachedReading,
    low_limit: CachedReading,
    config: Option<Config>,
}

impl DeviceState {
    pub(crate) fn new(address: u8) -> Self {
        Self {
            address,
            result: CachedReading::default(),
            high_limit: CachedReading::default(),
            low_limit: CachedReading::default(),
            config: None,
        }
    }

    /// 7-bit bus address, fixed at construction.
    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn result(&self) -> &CachedReading {
        &self.result
    }

    pub fn high_limit(&self) -> &CachedReading {
        &self.high_limit
    }

    pub fn low_limit(&self) -> &CachedReading {
        &self.low_limit
    }

    /// Configuration word from the last successful config read.
    pub fn config(&self) -> Option<Config> {
        self.config
    }

    /// Cache slot for a lux register; `None` for registers that hold no lux.
    pub(crate) fn reading_mut(&mut self, register: Register) -> Option<&mut CachedReading> {
        match register {
            Register::Result => Some(&mut self.result),
            Register::HighLimit => Some(&mut self.high_limit),
            Register::LowLimit => Some(&mut self.low_limit),
            Register::Config | Register::ManufacturerId | Register::DeviceId => None,
        }
    }

    pub(crate) fn set_config(&mut self, config: Config) {
        self.config = Some(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportStatus;

    #[test]
    fn fresh_state_has_no_readings() {
        let state = DeviceState::new(0x45);
        assert_eq!(state.address(), 0x45);
        assert!(!state.result().has_value());
        assert_eq!(state.result().lux(), 0.0);
        assert_eq!(state.result().status(), ErrorCode::NoError);
        assert_eq!(state.config(), None);
    }

    #[test]
    fn failure_keeps_last_good_value() {
        let mut reading = CachedReading::default();
        reading.record(123.45);
        reading.record_failure(ErrorCode::Timeout);

        assert_eq!(reading.lux(), 123.45);
        assert_eq!(reading.status(), ErrorCode::Timeout);
        assert!(reading.has_value());

        reading.record(6.5);
        assert_eq!(reading.lux(), 6.5);
        assert!(reading.status().is_ok());
    }

    #[test]
    fn only_lux_registers_have_cache_slots() {
        let mut state = DeviceState::new(0x44);
        assert!(state.reading_mut(Register::Config).is_none());
        assert!(state.reading_mut(Register::DeviceId).is_none());

        state
            .reading_mut(Register::LowLimit)
            .unwrap()
            .record_failure(ErrorCode::Transport(TransportStatus::DataNack));
        assert_eq!(
            state.low_limit().status(),
            ErrorCode::Transport(TransportStatus::DataNack)
        );
        assert_eq!(state.high_limit().status(), ErrorCode::NoError);
    }
}
