//! Conversion between raw exponent/mantissa register words and lux.
//!
//! Result and limit registers share one 16-bit format: bits 15:12 hold a
//! binary exponent `E`, bits 11:0 a mantissa `R`, and the light level is
//! `R × 2^E × 0.01 lux`. Exponent 0 covers 0–40.95 lux in exact 0.01 steps;
//! every further exponent doubles both the range and the step size.

/// Number of mantissa bits in an exponent/mantissa word.
const MANTISSA_BITS: u32 = 12;

/// Largest mantissa value (12 bits).
pub const MANTISSA_MAX: u16 = (1 << MANTISSA_BITS) - 1;

/// Largest exponent value (4 bits).
pub const EXPONENT_MAX: u8 = 0x0F;

/// Reciprocal of the lux weight of one mantissa LSB at exponent 0.
const LSB_PER_LUX: f32 = 100.0;

/// A decoded exponent/mantissa register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ExponentMantissa {
    exponent: u8,
    mantissa: u16,
}

impl ExponentMantissa {
    /// Build a value from its fields, masking each to its bit width.
    pub const fn new(exponent: u8, mantissa: u16) -> Self {
        Self {
            exponent: exponent & EXPONENT_MAX,
            mantissa: mantissa & MANTISSA_MAX,
        }
    }

    /// Split a raw register word into exponent and mantissa.
    pub const fn from_raw(raw: u16) -> Self {
        Self {
            exponent: (raw >> MANTISSA_BITS) as u8,
            mantissa: raw & MANTISSA_MAX,
        }
    }

    /// Pack back into the raw register word.
    pub const fn to_raw(self) -> u16 {
        ((self.exponent as u16) << MANTISSA_BITS) | self.mantissa
    }

    pub const fn exponent(self) -> u8 {
        self.exponent
    }

    pub const fn mantissa(self) -> u16 {
        self.mantissa
    }

    /// Light level in lux.
    ///
    /// The scaled integer `R << E` is exact in an `f32` (at most 12
    /// significant bits), so the only rounding happens in the final
    /// division.
    pub fn to_lux(self) -> f32 {
        let scaled = (self.mantissa as u32) << self.exponent;
        scaled as f32 / LSB_PER_LUX
    }

    /// Encode a lux value, picking the smallest exponent that fits.
    ///
    /// Encoding is lossy above 40.95 lux: each halving of the mantissa drops
    /// one bit of resolution. Negative and NaN inputs encode to zero. Values
    /// past full scale (4095 × 2^15 × 0.01 lux) saturate to the largest
    /// representable word instead of failing.
    pub fn from_lux(lux: f32) -> Self {
        // Float-to-int `as` saturates: NaN and negatives give 0.
        let mut mantissa = (lux * LSB_PER_LUX + 0.5) as u32;
        let mut exponent = 0u8;

        while mantissa > MANTISSA_MAX as u32 && exponent < EXPONENT_MAX {
            mantissa /= 2;
            exponent += 1;
        }

        Self {
            exponent,
            mantissa: mantissa.min(MANTISSA_MAX as u32) as u16,
        }
    }

    /// Step size in lux at this value's exponent.
    pub fn resolution(self) -> f32 {
        (1u32 << self.exponent) as f32 / LSB_PER_LUX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Decoding ─────────────────────────────────────────────────────

    #[test]
    fn zero_word_is_zero_lux() {
        let em = ExponentMantissa::from_raw(0x0000);
        assert_eq!(em.exponent(), 0);
        assert_eq!(em.mantissa(), 0);
        assert_eq!(em.to_lux(), 0.0);
    }

    #[test]
    fn one_lsb_is_one_hundredth_lux() {
        assert_eq!(ExponentMantissa::new(0, 1).to_lux(), 0.01);
    }

    #[test]
    fn exponent_scales_mantissa() {
        assert_eq!(ExponentMantissa::new(4, 100).to_lux(), 16.0);
    }

    #[test]
    fn raw_word_splits_into_fields() {
        let em = ExponentMantissa::from_raw(0xB7FF);
        assert_eq!(em.exponent(), 11);
        assert_eq!(em.mantissa(), 0x7FF);
        assert_eq!(em.to_raw(), 0xB7FF);
    }

    #[test]
    fn new_masks_out_of_range_fields() {
        let em = ExponentMantissa::new(0x1F, 0xF123);
        assert_eq!(em.exponent(), 0x0F);
        assert_eq!(em.mantissa(), 0x123);
        assert_eq!(ExponentMantissa::new(4, 100).to_raw(), 0x4064);
    }

    // ── Encoding ─────────────────────────────────────────────────────

    #[test]
    fn exponent_zero_range_is_lossless() {
        for k in 0..=MANTISSA_MAX {
            let lux = k as f32 / 100.0;
            let em = ExponentMantissa::from_lux(lux);
            assert_eq!(em.exponent(), 0, "lux {}", lux);
            assert_eq!(em.to_lux(), lux, "lux {}", lux);
        }
    }

    #[test]
    fn larger_values_stay_within_one_step() {
        let samples = [
            40.96, 41.0, 100.0, 655.35, 1234.56, 20_000.0, 83_865.6, 1_000_000.0,
        ];
        for lux in samples {
            let em = ExponentMantissa::from_lux(lux);
            assert!(em.exponent() > 0, "lux {}", lux);
            let error = (em.to_lux() - lux).abs();
            assert!(
                error <= em.resolution(),
                "lux {} decoded {} step {}",
                lux,
                em.to_lux(),
                em.resolution()
            );
        }
    }

    #[test]
    fn encoding_never_leaves_field_ranges() {
        let samples = [
            0.0,
            0.004,
            40.95,
            40.96,
            81.91,
            81.92,
            1.0e4,
            1.0e6,
            1.341_849_6e6,
            1.0e9,
            f32::MAX,
            f32::INFINITY,
        ];
        for lux in samples {
            let em = ExponentMantissa::from_lux(lux);
            assert!(em.exponent() <= EXPONENT_MAX, "lux {}", lux);
            assert!(em.mantissa() <= MANTISSA_MAX, "lux {}", lux);
        }
    }

    #[test]
    fn over_range_saturates_to_full_scale() {
        let em = ExponentMantissa::from_lux(1.0e9);
        assert_eq!(em, ExponentMantissa::new(EXPONENT_MAX, MANTISSA_MAX));
        assert_eq!(em.to_raw(), 0xFFFF);
    }

    #[test]
    fn negative_and_nan_encode_to_zero() {
        assert_eq!(ExponentMantissa::from_lux(-5.0).to_raw(), 0);
        assert_eq!(ExponentMantissa::from_lux(f32::NAN).to_raw(), 0);
    }

    #[test]
    fn first_doubling_happens_at_4096_lsb() {
        let em = ExponentMantissa::from_lux(40.96);
        assert_eq!(em.exponent(), 1);
        assert_eq!(em.mantissa(), 2048);
        assert_eq!(em.to_lux(), 40.96);
    }
}
