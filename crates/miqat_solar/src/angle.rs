//! Angle and hour normalization.

/// Normalize degrees into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Normalize degrees into [-180, 180).
pub fn normalize_signed_degrees(deg: f64) -> f64 {
    normalize_degrees(deg + 180.0) - 180.0
}

/// Normalize hours into [0, 24).
pub fn normalize_hours(hours: f64) -> f64 {
    let r = hours.rem_euclid(24.0);
    if r >= 24.0 { 0.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_range() {
        for &x in &[-720.5, -360.0, -1e-15, 0.0, 359.999, 360.0, 725.0] {
            let n = normalize_degrees(x);
            assert!((0.0..360.0).contains(&n), "{x} -> {n}");
        }
        assert!((normalize_degrees(-90.0) - 270.0).abs() < 1e-12);
        assert!((normalize_degrees(450.0) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn signed_degrees() {
        assert!((normalize_signed_degrees(190.0) - (-170.0)).abs() < 1e-12);
        assert!((normalize_signed_degrees(-190.0) - 170.0).abs() < 1e-12);
        assert!((normalize_signed_degrees(39.8262 + 360.0) - 39.8262).abs() < 1e-9);
        assert_eq!(normalize_signed_degrees(180.0), -180.0);
    }

    #[test]
    fn hours_range() {
        assert!((normalize_hours(-1.5) - 22.5).abs() < 1e-12);
        assert!((normalize_hours(25.0) - 1.0).abs() < 1e-12);
    }
}
