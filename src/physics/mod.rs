pub mod atmosphere;
pub mod drag;
pub mod gravity;

pub use gravity::{gravity_accel, gravity_accel_scalar, MU_EARTH, R_EARTH};
