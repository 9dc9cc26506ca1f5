pub mod integrator;
pub mod simulator;
pub mod state;

pub use simulator::{FlightSimulator, FIXED_DT, SNAPSHOT_ALTITUDE_THRESHOLD};
pub use state::{EventKind, FlightEvent, FlightResult, FlightSnapshot, Outcome, SimState};
