//! Degree-based trigonometry.

#[inline]
pub fn dsin(d: f64) -> f64 {
    d.to_radians().sin()
}

#[inline]
pub fn dcos(d: f64) -> f64 {
    d.to_radians().cos()
}

#[inline]
pub fn dtan(d: f64) -> f64 {
    d.to_radians().tan()
}

#[inline]
pub fn dasin(x: f64) -> f64 {
    x.asin().to_degrees()
}

#[inline]
pub fn dacos(x: f64) -> f64 {
    x.acos().to_degrees()
}

#[inline]
pub fn datan2(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Arc-cotangent in degrees.
#[inline]
pub fn dacot(x: f64) -> f64 {
    (1.0 / x).atan().to_degrees()
}

/// Normalizes an angle into `[0, 360)`.
#[inline]
pub fn fix_angle(a: f64) -> f64 {
    a.rem_euclid(360.0)
}

/// Normalizes an hour value into `[0, 24)`.
#[inline]
pub fn fix_hour(h: f64) -> f64 {
    h.rem_euclid(24.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_known_values() {
        assert!((dsin(30.0) - 0.5).abs() < EPS);
        assert!((dcos(60.0) - 0.5).abs() < EPS);
        assert!((dtan(45.0) - 1.0).abs() < EPS);
        assert!((dasin(0.5) - 30.0).abs() < EPS);
        assert!((dacos(0.5) - 60.0).abs() < EPS);
        assert!((datan2(1.0, 1.0) - 45.0).abs() < EPS);
        assert!((dacot(1.0) - 45.0).abs() < EPS);
    }

    #[test]
    fn test_normalization() {
        assert!((fix_angle(-30.0) - 330.0).abs() < EPS);
        assert!((fix_angle(725.0) - 5.0).abs() < EPS);
        assert!((fix_hour(-1.5) - 22.5).abs() < EPS);
        assert!((fix_hour(25.0) - 1.0).abs() < EPS);
        assert!(fix_hour(24.0).abs() < EPS);
    }

    #[test]
    fn test_out_of_domain_is_nan() {
        assert!(dacos(1.5).is_nan());
        assert!(dasin(-1.01).is_nan());
    }
}
