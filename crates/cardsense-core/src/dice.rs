//! Dice face derived from the ambient light level.
//!
//! There is no random source: the face is a pure function of the light
//! reading at render time, so identical readings always show the same face.

/// One of the six faces of a die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiceFace {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
}

// Pip offsets on a 3x3 grid, (column, row) with 0 in the centre.
const PIPS_ONE: &[(i8, i8)] = &[(0, 0)];
const PIPS_TWO: &[(i8, i8)] = &[(-1, -1), (1, 1)];
const PIPS_THREE: &[(i8, i8)] = &[(-1, -1), (0, 0), (1, 1)];
const PIPS_FOUR: &[(i8, i8)] = &[(-1, -1), (1, -1), (-1, 1), (1, 1)];
const PIPS_FIVE: &[(i8, i8)] = &[(-1, -1), (1, -1), (0, 0), (-1, 1), (1, 1)];
const PIPS_SIX: &[(i8, i8)] = &[(-1, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (1, 1)];

impl DiceFace {
    /// Derive a face from a light level.
    ///
    /// The reading is truncated toward zero, reduced with a Euclidean modulo 6
    /// and shifted by one. NaN truncates to 0 and infinities saturate, so
    /// every input maps to a face.
    pub fn from_light_level(lux: f32) -> Self {
        let truncated = lux as i32;
        Self::from_value((truncated.rem_euclid(6) + 1) as u8)
            .unwrap_or(DiceFace::One)
    }

    /// Face showing `value` pips, for `value` in `1..=6`.
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(DiceFace::One),
            2 => Some(DiceFace::Two),
            3 => Some(DiceFace::Three),
            4 => Some(DiceFace::Four),
            5 => Some(DiceFace::Five),
            6 => Some(DiceFace::Six),
            _ => None,
        }
    }

    pub const fn value(&self) -> u8 {
        match self {
            DiceFace::One => 1,
            DiceFace::Two => 2,
            DiceFace::Three => 3,
            DiceFace::Four => 4,
            DiceFace::Five => 5,
            DiceFace::Six => 6,
        }
    }

    /// Pip positions on a 3x3 grid, each coordinate in `-1..=1`.
    pub const fn pips(&self) -> &'static [(i8, i8)] {
        match self {
            DiceFace::One => PIPS_ONE,
            DiceFace::Two => PIPS_TWO,
            DiceFace::Three => PIPS_THREE,
            DiceFace::Four => PIPS_FOUR,
            DiceFace::Five => PIPS_FIVE,
            DiceFace::Six => PIPS_SIX,
        }
    }
}

/// Dice value in `1..=6` for a light level.
pub fn dice_value(lux: f32) -> u8 {
    DiceFace::from_light_level(lux).value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(dice_value(0.0), 1);
        assert_eq!(dice_value(5.0), 6);
        assert_eq!(dice_value(6.0), 1);
        assert_eq!(dice_value(5.99), 6);
        assert_eq!(dice_value(321.7), 4);
    }

    #[test]
    fn always_in_range_and_periodic() {
        for level in -600..600 {
            let value = dice_value(level as f32);
            assert!((1..=6).contains(&value), "{level} gave {value}");
            assert_eq!(value, dice_value((level + 6) as f32));
        }
    }

    #[test]
    fn negative_levels_wrap_euclidean() {
        assert_eq!(dice_value(-1.0), 6);
        assert_eq!(dice_value(-6.0), 1);
        // Truncation toward zero: -0.5 is treated as 0.
        assert_eq!(dice_value(-0.5), 1);
    }

    #[test]
    fn non_finite_levels_still_map_to_a_face() {
        assert_eq!(dice_value(f32::NAN), 1);
        assert!((1..=6).contains(&dice_value(f32::INFINITY)));
        assert!((1..=6).contains(&dice_value(f32::NEG_INFINITY)));
    }

    #[test]
    fn pip_count_matches_value() {
        for value in 1..=6 {
            let face = DiceFace::from_value(value).unwrap();
            assert_eq!(face.pips().len(), value as usize);
            assert!(
                face.pips()
                    .iter()
                    .all(|(x, y)| (-1..=1).contains(x) && (-1..=1).contains(y))
            );
        }
        assert_eq!(DiceFace::from_value(0), None);
        assert_eq!(DiceFace::from_value(7), None);
    }
}
