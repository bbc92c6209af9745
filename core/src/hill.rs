//! Procedural hill the boulder is pushed up.

use crate::SCREEN_HEIGHT;

/// Exponent applied to the horizontal distance when carving the hill.
pub const HILL_EXPONENT: f64 = 1.3;

/// Horizontal step used by the central-difference angle estimate.
pub const ANGLE_PROBE_STEP: f64 = 2.0;

/// Largest slope angle reported by [`HillProfile::angle`], in degrees.
pub const MAX_SLOPE_ANGLE_DEGREES: f64 = 88.0;

const DEFAULT_START_HEIGHT: f64 = SCREEN_HEIGHT * 0.8;
const DEFAULT_STEEPNESS: f64 = 0.01;

/// Stateless description of the hill surface.
///
/// Heights are screen-space values: the hill rises as `y` shrinks, so
/// `height(x) = start_height - steepness * x^exponent` for `x >= 0` and the
/// surface is flat at `start_height` to the left of the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HillProfile {
    start_height: f64,
    steepness: f64,
    exponent: f64,
}

impl Default for HillProfile {
    fn default() -> Self {
        Self::new(DEFAULT_START_HEIGHT, DEFAULT_STEEPNESS)
    }
}

impl HillProfile {
    /// Creates a hill using the default exponent.
    #[must_use]
    pub const fn new(start_height: f64, steepness: f64) -> Self {
        Self {
            start_height,
            steepness,
            exponent: HILL_EXPONENT,
        }
    }

    /// Height of the surface at `x = 0`.
    #[must_use]
    pub const fn start_height(&self) -> f64 {
        self.start_height
    }

    /// Vertical position of the surface at horizontal position `x`.
    #[must_use]
    pub fn height(&self, x: f64) -> f64 {
        let effective_x = x.max(0.0);
        self.start_height - self.steepness * effective_x.powf(self.exponent)
    }

    /// Slope angle at `x` in radians; positive values climb to the right.
    #[must_use]
    pub fn angle(&self, x: f64) -> f64 {
        let max_angle = MAX_SLOPE_ANGLE_DEGREES.to_radians();
        let rise = -(self.height(x + ANGLE_PROBE_STEP) - self.height(x));
        let angle = rise.atan2(ANGLE_PROBE_STEP);
        if angle.is_nan() {
            // Both samples overflowed to negative infinity.
            return max_angle;
        }
        angle.clamp(-max_angle, max_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn max_angle() -> f64 {
        MAX_SLOPE_ANGLE_DEGREES.to_radians()
    }

    #[test]
    fn height_at_origin_matches_start_height() {
        let hill = HillProfile::default();

        assert_eq!(hill.height(0.0), SCREEN_HEIGHT * 0.8);
        assert_eq!(hill.start_height(), 480.0);
    }

    #[test]
    fn negative_positions_clamp_to_origin_height() {
        let hill = HillProfile::default();

        assert_eq!(hill.height(-50.0), hill.height(0.0));
        assert_eq!(hill.height(-1.0e9), hill.start_height());
    }

    #[test]
    fn height_follows_power_curve() {
        let hill = HillProfile::default();
        let expected = 480.0 - 0.01 * 150.0_f64.powf(1.3);

        assert!((hill.height(150.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn start_region_is_gently_uphill() {
        let hill = HillProfile::default();
        let angle = hill.angle(150.0);

        assert!(angle > 0.0);
        assert!(angle < 5.0_f64.to_radians());
    }

    #[test]
    fn flat_region_left_of_origin_has_zero_angle() {
        let hill = HillProfile::default();

        assert_eq!(hill.angle(-10.0), 0.0);
    }

    #[test]
    fn steep_region_saturates_at_max_angle() {
        let hill = HillProfile::new(480.0, 50.0);

        assert!((hill.angle(1.0e6) - max_angle()).abs() < 1e-12);
    }

    #[test]
    fn overflowing_heights_report_max_angle() {
        let hill = HillProfile::default();

        assert!(hill.height(1.0e300).is_infinite());
        assert_eq!(hill.angle(1.0e300), max_angle());
        assert_eq!(hill.angle(f64::MAX), max_angle());
    }

    proptest! {
        #[test]
        fn height_never_increases_with_distance(x in 0.0f64..1.0e7, step in 0.0f64..1.0e4) {
            let hill = HillProfile::default();
            prop_assert!(hill.height(x + step) <= hill.height(x));
        }

        #[test]
        fn angle_stays_within_limits(x in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            let hill = HillProfile::default();
            let angle = hill.angle(x);
            prop_assert!(angle.is_finite());
            prop_assert!((-max_angle()..=max_angle()).contains(&angle));
        }
    }
}
