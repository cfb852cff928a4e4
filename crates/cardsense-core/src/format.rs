//! Display formatting for sensor readings.

use core::fmt::{self, Write};

/// Largest magnitude at which every integer is exactly representable in `f32`.
const EXACT_INTEGER_LIMIT: f32 = 16_777_216.0;

/// Magnitudes at or above this print in scientific notation.
const SCIENTIFIC_UPPER: f32 = 1.0e7;

/// Non-zero magnitudes below this print in scientific notation.
const SCIENTIFIC_LOWER: f32 = 1.0e-3;

/// Formats a reading the way the screens show it.
///
/// Whole numbers keep one decimal (`0.0`, `250.0`); anything else uses the
/// shortest representation that round-trips (`12.5`, `0.33333334`).
/// Magnitudes of `1e7` and above, or below `1e-3`, switch to scientific
/// notation with a mandatory decimal (`2.0E7`, `1.5E-4`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading(pub f32);

impl Reading {
    fn is_scientific(&self) -> bool {
        let value = self.0;
        let magnitude = if value < 0.0 { -value } else { value };
        value.is_finite()
            && magnitude != 0.0
            && (magnitude >= SCIENTIFIC_UPPER || magnitude < SCIENTIFIC_LOWER)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;

        if self.is_scientific() {
            let mut digits = heapless::String::<32>::new();
            write!(digits, "{:e}", value)?;
            let digits = digits.as_str();
            let (mantissa, exponent) = digits.split_once('e').unwrap_or((digits, "0"));
            f.write_str(mantissa)?;
            if !mantissa.contains('.') {
                f.write_str(".0")?;
            }
            return write!(f, "E{}", exponent);
        }

        let is_whole = value.is_finite()
            && value > -EXACT_INTEGER_LIMIT
            && value < EXACT_INTEGER_LIMIT
            && value == (value as i32) as f32;

        if is_whole {
            write!(f, "{:.1}", value)
        } else {
            write!(f, "{}", value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn whole_numbers_keep_one_decimal() {
        assert_eq!(format!("{}", Reading(0.0)), "0.0");
        assert_eq!(format!("{}", Reading(250.0)), "250.0");
        assert_eq!(format!("{}", Reading(-3.0)), "-3.0");
    }

    #[test]
    fn fractions_use_shortest_form() {
        assert_eq!(format!("{}", Reading(12.5)), "12.5");
        assert_eq!(format!("{}", Reading(0.1)), "0.1");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format!("{}", Reading(f32::NAN)), "NaN");
        assert_eq!(format!("{}", Reading(f32::INFINITY)), "inf");
    }

    #[test]
    fn extreme_magnitudes_use_scientific_notation() {
        assert_eq!(format!("{}", Reading(2.0e7)), "2.0E7");
        assert_eq!(format!("{}", Reading(-3.0e8)), "-3.0E8");
        assert_eq!(format!("{}", Reading(1.5e-4)), "1.5E-4");
        assert_eq!(format!("{}", Reading(9_999_999.0)), "9999999.0");
        assert_eq!(format!("{}", Reading(0.001)), "0.001");
    }
}
