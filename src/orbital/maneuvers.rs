use crate::physics::gravity::MU_EARTH;

/// Circular orbit velocity at radius `r`.
pub fn circular_velocity(r: f64) -> f64 {
    circular_velocity_mu(r, MU_EARTH)
}

pub fn circular_velocity_mu(r: f64, mu: f64) -> f64 {
    (mu / r).sqrt()
}

/// Escape velocity at radius `r`.
pub fn escape_velocity(r: f64) -> f64 {
    escape_velocity_mu(r, MU_EARTH)
}

pub fn escape_velocity_mu(r: f64, mu: f64) -> f64 {
    (2.0 * mu / r).sqrt()
}

/// Vis-viva equation: orbital speed at radius `r` for an orbit with
/// semi-major axis `a`.
pub fn vis_viva(r: f64, a: f64) -> f64 {
    vis_viva_mu(r, a, MU_EARTH)
}

pub fn vis_viva_mu(r: f64, a: f64, mu: f64) -> f64 {
    (mu * (2.0 / r - 1.0 / a)).sqrt()
}

/// Result of a Hohmann transfer between two circular orbits.
#[derive(Debug, Clone, Copy)]
pub struct HohmannTransfer {
    pub burn1: f64,
    pub burn2: f64,
    pub total_dv: f64,
}

/// Hohmann transfer between circular orbits of radius `r1` and `r2`.
/// Equal radii yield zero delta-v.
pub fn hohmann(r1: f64, r2: f64) -> HohmannTransfer {
    hohmann_mu(r1, r2, MU_EARTH)
}

pub fn hohmann_mu(r1: f64, r2: f64, mu: f64) -> HohmannTransfer {
    let a_transfer = (r1 + r2) / 2.0;
    let v_circ1 = circular_velocity_mu(r1, mu);
    let v_circ2 = circular_velocity_mu(r2, mu);
    let v_transfer_1 = vis_viva_mu(r1, a_transfer, mu);
    let v_transfer_2 = vis_viva_mu(r2, a_transfer, mu);

    let burn1 = (v_transfer_1 - v_circ1).abs();
    let burn2 = (v_circ2 - v_transfer_2).abs();

    HohmannTransfer {
        burn1,
        burn2,
        total_dv: burn1 + burn2,
    }
}
