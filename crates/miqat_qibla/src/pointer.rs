//! Heading-relative pointer and alignment.

use miqat_solar::normalize_degrees;

/// Alignment tolerance used when none is configured.
pub const DEFAULT_ALIGNMENT_TOLERANCE_DEG: f64 = 5.0;

/// Angle to rotate a pointer drawn in the device frame so that it points
/// at `bearing`, given the device faces `heading`. Both in degrees
/// clockwise from true north; result in [0, 360).
pub fn relative_pointer_angle(bearing: f64, heading: f64) -> f64 {
    normalize_degrees(bearing - heading)
}

/// Shortest angular separation, in [0, 180].
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let d = normalize_degrees(a - b);
    d.min(360.0 - d)
}

/// Whether `heading` is within `tolerance_deg` of `bearing`.
pub fn is_aligned(heading: f64, bearing: f64, tolerance_deg: f64) -> bool {
    circular_distance(heading, bearing) <= tolerance_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_is_periodic_in_heading() {
        for heading in [-725.0, -90.0, 0.0, 45.5, 359.0, 1000.0] {
            let a = relative_pointer_angle(118.99, heading);
            let b = relative_pointer_angle(118.99, heading + 360.0);
            assert!((a - b).abs() < 1e-9, "{heading}: {a} vs {b}");
            assert!((0.0..360.0).contains(&a));
        }
    }

    #[test]
    fn pointer_straight_ahead_when_facing_bearing() {
        assert_eq!(relative_pointer_angle(58.5, 58.5), 0.0);
        assert_eq!(relative_pointer_angle(10.0, 350.0), 20.0);
        assert_eq!(relative_pointer_angle(350.0, 10.0), 340.0);
    }

    #[test]
    fn alignment_wraps_around_north() {
        assert!(is_aligned(358.0, 2.0, DEFAULT_ALIGNMENT_TOLERANCE_DEG));
        assert!(is_aligned(2.0, 358.0, DEFAULT_ALIGNMENT_TOLERANCE_DEG));
        assert!(!is_aligned(350.0, 2.0, DEFAULT_ALIGNMENT_TOLERANCE_DEG));
        assert!(is_aligned(-1.0, 359.0, 0.5));
    }

    #[test]
    fn tolerance_is_inclusive() {
        assert!(is_aligned(105.0, 100.0, 5.0));
        assert!(!is_aligned(105.5, 100.0, 5.0));
    }

    #[test]
    fn circular_distance_range() {
        assert_eq!(circular_distance(0.0, 180.0), 180.0);
        assert_eq!(circular_distance(10.0, 350.0), 20.0);
        assert_eq!(circular_distance(720.0, 0.0), 0.0);
    }
}
