use nalgebra::Vector2;

// ---------------------------------------------------------------------------
// 2D vector type and free-function helpers
// ---------------------------------------------------------------------------

/// Position/velocity/force vector in the 2D equatorial plane.
///
/// Addition, subtraction, scaling, magnitude, and dot product are nalgebra's
/// own operators on `Vector2<f64>` — this module only adds the handful of
/// operations the flight model needs that nalgebra does not already provide
/// in the right shape.
pub type Vec2 = Vector2<f64>;

/// Zero-safe unit vector: returns the zero vector instead of NaN when `v` is
/// (numerically) the zero vector.
pub fn normalize_safe(v: Vec2) -> Vec2 {
    let mag = v.norm();
    if mag > 1e-12 {
        v / mag
    } else {
        Vec2::zeros()
    }
}

/// Scalar z-component of the 3D cross product `(v1.x, v1.y, 0) × (v2.x, v2.y, 0)`.
pub fn cross_z(v1: Vec2, v2: Vec2) -> f64 {
    v1.x * v2.y - v1.y * v2.x
}

/// Rotate `v` by `angle` radians, counter-clockwise positive.
pub fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Clamp `x` into `[lo, hi]`. NaN maps to `lo`.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() {
        lo
    } else {
        x.max(lo).min(hi)
    }
}

/// Linear interpolation between `a` and `b` at `t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_safe_zero_vector() {
        let v = normalize_safe(Vec2::zeros());
        assert_eq!(v, Vec2::zeros());
    }

    #[test]
    fn normalize_safe_unit_length() {
        let v = normalize_safe(Vec2::new(3.0, 4.0));
        assert!((v.norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cross_z_orthogonal_unit_vectors() {
        let x = Vec2::new(1.0, 0.0);
        let y = Vec2::new(0.0, 1.0);
        assert!((cross_z(x, y) - 1.0).abs() < 1e-12);
        assert!((cross_z(y, x) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn rotate_quarter_turn() {
        let v = Vec2::new(1.0, 0.0);
        let r = rotate(v, std::f64::consts::FRAC_PI_2);
        assert!((r.x).abs() < 1e-12);
        assert!((r.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn clamp_handles_nan() {
        assert_eq!(clamp(f64::NAN, 1.0, 5.0), 1.0);
        assert_eq!(clamp(10.0, 1.0, 5.0), 5.0);
        assert_eq!(clamp(-10.0, 1.0, 5.0), 1.0);
    }

    #[test]
    fn lerp_midpoint() {
        assert!((lerp(0.0, 10.0, 0.5) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn deg_rad_roundtrip() {
        let d = 57.3;
        assert!((rad_to_deg(deg_to_rad(d)) - d).abs() < 1e-9);
    }
}
