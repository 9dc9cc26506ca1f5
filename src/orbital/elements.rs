use crate::math::{cross_z, Vec2};
use crate::physics::gravity::{MU_EARTH, R_EARTH};

/// Classical orbital elements recovered from a 2D equatorial state vector.
/// Apoapsis/periapsis are measured above the body's surface, not
/// from its center.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub apoapsis: f64,
    pub periapsis: f64,
    pub period: f64,
}

impl OrbitalElements {
    /// Recover orbital elements from position/velocity around Earth.
    pub fn from_state_vectors(pos: Vec2, vel: Vec2) -> Self {
        Self::from_state_vectors_mu(pos, vel, MU_EARTH, R_EARTH)
    }

    /// Recover orbital elements around a body with parameter `mu` and
    /// surface radius `r_body`.
    pub fn from_state_vectors_mu(pos: Vec2, vel: Vec2, mu: f64, r_body: f64) -> Self {
        let r = pos.norm();
        let v = vel.norm();

        let energy = 0.5 * v * v - mu / r;
        let sma = -mu / (2.0 * energy);

        let h = cross_z(pos, vel);
        let _ = h; // angular momentum is folded into the eccentricity vector below

        let e_vec = if r > 1e-9 {
            ((v * v - mu / r) * pos - pos.dot(&vel) * vel) / mu - pos / r
        } else {
            Vec2::zeros()
        };
        let ecc = e_vec.norm();

        let apoapsis = sma * (1.0 + ecc) - r_body;
        let periapsis = sma * (1.0 - ecc) - r_body;
        let period = if sma > 0.0 {
            2.0 * std::f64::consts::PI * (sma.powi(3) / mu).sqrt()
        } else {
            f64::INFINITY
        };

        OrbitalElements {
            semi_major_axis: sma,
            eccentricity: ecc,
            apoapsis,
            periapsis,
            period,
        }
    }

    /// An orbit is stable when it is elliptical (not parabolic/hyperbolic)
    /// and both apsides clear the surface.
    pub fn is_stable(&self) -> bool {
        self.eccentricity < 1.0 && self.periapsis > 0.0 && self.apoapsis > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbital::maneuvers::circular_velocity;
    use approx::assert_relative_eq;

    #[test]
    fn circular_orbit_roundtrip() {
        let r = R_EARTH + 400_000.0;
        let v = circular_velocity(r);
        let els = OrbitalElements::from_state_vectors(Vec2::new(r, 0.0), Vec2::new(0.0, v));
        assert!(els.eccentricity < 0.01);
        assert!((els.apoapsis - 400_000.0).abs() < 10_000.0);
        assert!((els.periapsis - 400_000.0).abs() < 10_000.0);
    }

    #[test]
    fn leo_period_is_about_92_minutes() {
        let r = R_EARTH + 400_000.0;
        let v = circular_velocity(r);
        let els = OrbitalElements::from_state_vectors(Vec2::new(r, 0.0), Vec2::new(0.0, v));
        assert!(els.period > 5_000.0 && els.period < 6_000.0, "got {}", els.period);
    }

    #[test]
    fn geo_period_known_value() {
        // orbitalPeriod(R_earth + 35_786 km) returns 85_000-87_500 s.
        let r = R_EARTH + 35_786_000.0;
        let v = circular_velocity(r);
        let els = OrbitalElements::from_state_vectors(Vec2::new(r, 0.0), Vec2::new(0.0, v));
        assert!(els.period > 85_000.0 && els.period < 87_500.0, "got {}", els.period);
    }

    #[test]
    fn hyperbolic_orbit_has_negative_sma_and_infinite_period() {
        let r = R_EARTH + 400_000.0;
        let v_esc = crate::orbital::maneuvers::escape_velocity(r) * 1.5;
        let els = OrbitalElements::from_state_vectors(Vec2::new(r, 0.0), Vec2::new(0.0, v_esc));
        assert!(els.semi_major_axis < 0.0);
        assert_eq!(els.period, f64::INFINITY);
        assert!(!els.is_stable());
    }

    #[test]
    fn stable_requires_positive_periapsis() {
        // A suborbital lob: velocity too low to clear the surface on the far side.
        let r = R_EARTH + 1000.0;
        let els = OrbitalElements::from_state_vectors(Vec2::new(r, 0.0), Vec2::new(0.0, 100.0));
        assert!(!els.is_stable());
    }

    #[test]
    fn energy_conservation_in_vacuum_circular_orbit() {
        let r0 = R_EARTH + 500_000.0;
        let v0 = circular_velocity(r0);
        let mut pos = Vec2::new(r0, 0.0);
        let mut vel = Vec2::new(0.0, v0);
        let dt = 1.0;
        let steps = 150;
        for _ in 0..steps {
            let r = pos.norm();
            let a = -(MU_EARTH / r.powi(3)) * pos;
            // simple semi-implicit Euler is enough to check approximate energy retention
            vel += a * dt;
            pos += vel * dt;
        }
        let r_final = pos.norm();
        let v_final = vel.norm();
        assert_relative_eq!(r_final, r0, max_relative = 0.05);
        assert!((v_final - v0).abs() < 50.0);
    }
}
