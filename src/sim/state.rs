use serde::{Deserialize, Serialize};

use crate::math::Vec2;
use crate::orbital::OrbitalElements;

/// The simulator's live physical state. Advanced only by the RK4
/// integrator; never touched directly by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f64,
    pub mission_time: f64,
}

impl SimState {
    pub fn altitude(&self) -> f64 {
        self.position.norm() - crate::physics::R_EARTH
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }
}

/// A snapshot recorded into the flight log whenever altitude crosses the
/// 50 km recording threshold, or on every tick below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightSnapshot {
    pub mission_time: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f64,
    pub altitude: f64,
    pub speed: f64,
    pub throttle: f64,
    pub active_stage: usize,
}

/// Discrete things that happen during a flight, distinct from the
/// continuous physical state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Liftoff,
    StageSeparation { stage_index: usize },
    FuelExhausted { stage_index: usize },
    ThrottleChanged { value: f64 },
    PitchChanged { degrees: f64 },
    TimeScaleChanged { value: f64 },
    Aborted,
    MissionEnded { outcome: Outcome },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightEvent {
    pub mission_time: f64,
    pub emission_index: u64,
    pub kind: EventKind,
}

/// How a flight ended. Never surfaced as an `Err` — reaching any of
/// these variants is a successful run of the simulator, not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    /// Impacted the surface (altitude <= 0 while descending or on the pad).
    Crashed { mission_time: f64 },
    /// Fuel ran out below orbital velocity/altitude and the vehicle is
    /// ballistic but has not yet crashed or reached a qualifying altitude.
    FuelExhaustedSuborbital { mission_time: f64 },
    /// Reached and held a stable orbit; `matched_target` records whether
    /// it satisfies the mission's `OrbitTarget`.
    Orbit { elements: OrbitalElements, matched_target: bool },
    /// Reached a qualifying suborbital altitude without requiring a stable
    /// orbit.
    SuborbitalSuccess { apoapsis: f64 },
    /// The pilot aborted the flight. Mission time limits are enforced by
    /// the driver, which calls `abort()` when a host-supplied limit is hit.
    Aborted { mission_time: f64 },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Orbit { matched_target: true, .. } | Outcome::SuborbitalSuccess { .. }
        )
    }
}

/// The full record of a completed flight: what the scorer and any
/// external caller consume once `FlightSimulator::tick` reports termination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightResult {
    pub outcome: Outcome,
    pub final_state: SimState,
    pub fuel_used: f64,
    pub stages_separated: usize,
    pub propellant_cost_used: f64,
    pub events: Vec<FlightEvent>,
    pub snapshots: Vec<FlightSnapshot>,
}
