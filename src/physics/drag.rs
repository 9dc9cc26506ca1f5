use crate::math::{normalize_safe, Vec2};
use crate::physics::atmosphere::{density, KARMAN_LINE};

/// Global drag coefficient and reference area: the simulator does not
/// model per-part drag, just one aggregate shape for the whole vehicle.
pub const CD: f64 = 0.2;
pub const AREA_REF: f64 = 10.0; // m^2

/// Scalar drag force magnitude: `F = 1/2 * rho * v^2 * Cd * A`.
pub fn drag_force_scalar(rho: f64, speed: f64) -> f64 {
    0.5 * rho * speed * speed * CD * AREA_REF
}

/// Drag acceleration vector opposing velocity, or zero above the Karman
/// line / at zero speed.
pub fn drag_accel(velocity: Vec2, altitude: f64, mass: f64) -> Vec2 {
    let speed = velocity.norm();
    if speed <= 0.0 || altitude >= KARMAN_LINE || mass <= 0.0 {
        return Vec2::zeros();
    }
    let rho = density(altitude);
    let force = drag_force_scalar(rho, speed);
    -(force / mass) * normalize_safe(velocity)
}
