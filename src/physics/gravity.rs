use crate::math::Vec2;

// ---------------------------------------------------------------------------
// Gravitational constants (Earth, point-mass model)
// ---------------------------------------------------------------------------

pub const G: f64 = 6.674e-11;
pub const M_EARTH: f64 = 5.972e24;
pub const R_EARTH: f64 = 6_371_000.0;
pub const MU_EARTH: f64 = G * M_EARTH;

/// Scalar gravitational acceleration at altitude `h` above the surface.
pub fn gravity_accel_scalar(h: f64) -> f64 {
    MU_EARTH / (R_EARTH + h).powi(2)
}

/// Gravitational acceleration vector toward the body center.
///
/// Returns zero when `|p| = 0` (defensive; never reached from a launch
/// starting at the surface, since position is always at least `R_EARTH`).
pub fn gravity_accel(p: Vec2) -> Vec2 {
    let r = p.norm();
    if r < 1e-9 {
        return Vec2::zeros();
    }
    -(MU_EARTH / r.powi(3)) * p
}
