use crate::math::Vec2;
use crate::physics::{drag, gravity};

/// The derivative of `(position, velocity)` at an instant, given a constant
/// thrust vector held fixed across the step.
#[derive(Debug, Clone, Copy)]
pub struct Derivative {
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

/// One RK4 sample point: position and velocity at some offset within the
/// step. Mass is held fixed for the duration of the step -- fuel burn is
/// applied by the caller once per micro-step, not integrated here.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Evaluates acceleration from gravity, drag, and a supplied thrust
/// acceleration. Thrust is already mass-normalized by the caller so this
/// function only needs to add gravity and drag.
fn evaluate(sample: Sample, mass: f64, thrust_accel: Vec2) -> Derivative {
    let altitude = sample.position.norm() - gravity::R_EARTH;
    let g = gravity::gravity_accel(sample.position);
    let d = drag::drag_accel(sample.velocity, altitude, mass);
    Derivative { velocity: sample.velocity, acceleration: g + d + thrust_accel }
}

/// Classical 4th-order Runge-Kutta step over `(position, velocity)` at a
/// fixed `mass`. `thrust_accel` is held constant across the sub-step
/// samples, matching the simulator's fixed-timestep contract.
pub fn rk4_step(
    position: Vec2,
    velocity: Vec2,
    mass: f64,
    dt: f64,
    thrust_accel: Vec2,
) -> (Vec2, Vec2) {
    let s0 = Sample { position, velocity };
    let k1 = evaluate(s0, mass, thrust_accel);

    let s1 = Sample {
        position: position + k1.velocity * (dt / 2.0),
        velocity: velocity + k1.acceleration * (dt / 2.0),
    };
    let k2 = evaluate(s1, mass, thrust_accel);

    let s2 = Sample {
        position: position + k2.velocity * (dt / 2.0),
        velocity: velocity + k2.acceleration * (dt / 2.0),
    };
    let k3 = evaluate(s2, mass, thrust_accel);

    let s3 = Sample {
        position: position + k3.velocity * dt,
        velocity: velocity + k3.acceleration * dt,
    };
    let k4 = evaluate(s3, mass, thrust_accel);

    let new_position = position
        + (k1.velocity + 2.0 * k2.velocity + 2.0 * k3.velocity + k4.velocity) * (dt / 6.0);
    let new_velocity = velocity
        + (k1.acceleration + 2.0 * k2.acceleration + 2.0 * k3.acceleration + k4.acceleration)
            * (dt / 6.0);

    (new_position, new_velocity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn free_fall_matches_analytic_drop_over_short_step() {
        // Near the surface, drop from rest for a short interval: height loss
        // should match 1/2 g t^2 within RK4's truncation error.
        let r0 = gravity::R_EARTH + 1.0;
        let position = Vec2::new(r0, 0.0);
        let velocity = Vec2::zeros();
        let dt = 0.01;
        let (p1, _v1) = rk4_step(position, velocity, 1000.0, dt, Vec2::zeros());
        let drop = r0 - p1.norm();
        let expected = 0.5 * gravity::gravity_accel_scalar(0.0) * dt * dt;
        assert_relative_eq!(drop, expected, epsilon = 1e-6);
    }

    #[test]
    fn thrust_acceleration_adds_to_velocity() {
        let position = Vec2::new(gravity::R_EARTH + 100_000.0, 0.0);
        let velocity = Vec2::new(0.0, 7500.0);
        let (_, v1) = rk4_step(position, velocity, 1000.0, 0.1, Vec2::new(0.0, 10.0));
        assert!(v1.y > velocity.y);
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let position = Vec2::new(gravity::R_EARTH + 100_000.0, 0.0);
        let velocity = Vec2::new(0.0, 7500.0);
        let (p1, v1) = rk4_step(position, velocity, 1000.0, 0.0, Vec2::new(1.0, 1.0));
        assert_relative_eq!(p1, position, epsilon = 1e-12);
        assert_relative_eq!(v1, velocity, epsilon = 1e-12);
    }
}
