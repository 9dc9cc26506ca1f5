pub mod elements;
pub mod maneuvers;
pub mod target;

pub use elements::OrbitalElements;
pub use maneuvers::{hohmann, HohmannTransfer};
pub use target::{Bound, OrbitTarget};
