use crate::math::{rotate, Vec2};
use crate::orbital::{OrbitTarget, OrbitalElements};
use crate::physics::atmosphere::KARMAN_LINE;
use crate::physics::gravity;
use crate::propulsion;
use crate::sim::integrator::rk4_step;
use crate::sim::state::{EventKind, FlightEvent, FlightResult, FlightSnapshot, Outcome, SimState};
use crate::vehicle::mission::Mission;
use crate::vehicle::rocket::RocketConfig;
use crate::vehicle::stage::StageRuntime;

/// The simulator's fixed physics timestep. `tick` may run several of
/// these per call when time acceleration is active.
pub const FIXED_DT: f64 = 0.01;

/// Altitude above which flight snapshots are recorded every tick instead of
/// only at coarse intervals.
pub const SNAPSHOT_ALTITUDE_THRESHOLD: f64 = 50_000.0;

/// A hard ceiling on fixed-dt sub-steps per `tick` call, so a runaway
/// `time_scale` cannot stall the caller.
const MAX_SUBSTEPS_PER_TICK: u32 = 100_000;

/// The staged-vehicle flight state machine -- the component that
/// drives the integrator, fuel bookkeeping, staging, and termination
/// classification tick by tick.
pub struct FlightSimulator {
    config: RocketConfig,
    mission: Mission,
    state: SimState,
    stages: Vec<StageRuntime>,
    active_stage: usize,
    throttle: f64,
    pitch_degrees: f64,
    time_scale: f64,
    auto_stage: bool,
    propellant_cost_used: f64,
    cost_per_kg_propellant: f64,
    events: Vec<FlightEvent>,
    snapshots: Vec<FlightSnapshot>,
    next_emission_index: u64,
    running: bool,
    outcome: Option<Outcome>,
}

impl FlightSimulator {
    /// Builds a simulator at the pad: zero velocity, surface altitude,
    /// full fuel, throttle at 1.0, pitch straight up. `cost_per_kg_propellant`
    /// converts propellant mass burned into the budget units scoring uses.
    /// The simulator is not yet running; call `start()` before the first
    /// `tick`.
    pub fn new(
        config: RocketConfig,
        mission: Mission,
        cost_per_kg_propellant: f64,
    ) -> crate::error::SimResult<Self> {
        let stages = config.stage_runtimes()?;
        let mass = config.total_mass();
        let state = SimState {
            position: Vec2::new(gravity::R_EARTH, 0.0),
            velocity: Vec2::zeros(),
            mass,
            mission_time: 0.0,
        };
        let mut sim = FlightSimulator {
            config,
            mission,
            state,
            stages,
            active_stage: 0,
            throttle: 1.0,
            pitch_degrees: 90.0,
            time_scale: 1.0,
            auto_stage: true,
            propellant_cost_used: 0.0,
            cost_per_kg_propellant,
            events: Vec::new(),
            snapshots: Vec::new(),
            next_emission_index: 0,
            running: false,
            outcome: None,
        };
        sim.log(EventKind::Liftoff);
        sim.record_snapshot();
        Ok(sim)
    }

    /// Transitions the simulator out of "not yet running". `tick` is a
    /// no-op until this has been called. Idempotent.
    pub fn start(&mut self) {
        if self.outcome.is_none() {
            self.running = true;
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn config(&self) -> &RocketConfig {
        &self.config
    }

    pub fn mission(&self) -> &Mission {
        &self.mission
    }

    pub fn events(&self) -> &[FlightEvent] {
        &self.events
    }

    pub fn snapshots(&self) -> &[FlightSnapshot] {
        &self.snapshots
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn is_terminated(&self) -> bool {
        self.outcome.is_some()
    }

    // -- control contract --------------------------------------

    pub fn set_throttle(&mut self, value: f64) {
        let clamped = crate::math::clamp(value, 0.0, 1.0);
        self.throttle = clamped;
        self.log(EventKind::ThrottleChanged { value: clamped });
    }

    pub fn set_pitch(&mut self, degrees: f64) {
        let clamped = crate::math::clamp(degrees, -90.0, 90.0);
        self.pitch_degrees = clamped;
        self.log(EventKind::PitchChanged { degrees: clamped });
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        let clamped = scale.max(0.0);
        self.time_scale = clamped;
        self.log(EventKind::TimeScaleChanged { value: clamped });
    }

    pub fn set_auto_stage(&mut self, enabled: bool) {
        self.auto_stage = enabled;
    }

    pub fn trigger_stage_separation(&mut self) {
        if self.outcome.is_none() {
            self.separate_stage();
        }
    }

    pub fn abort(&mut self) {
        if self.outcome.is_none() {
            self.running = false;
            self.log(EventKind::Aborted);
            self.finish(Outcome::Aborted { mission_time: self.state.mission_time });
        }
    }

    /// Advances the simulation by `dt_real` seconds of wall-clock time,
    /// scaled by `time_scale`, in `FIXED_DT` sub-steps. A no-op before
    /// `start()` has been called or once the flight has terminated.
    pub fn tick(&mut self, dt_real: f64) {
        if !self.running || self.outcome.is_some() || dt_real <= 0.0 {
            return;
        }

        let mut remaining = dt_real * self.time_scale;
        let mut substeps = 0;
        while remaining > 0.0 && self.outcome.is_none() && substeps < MAX_SUBSTEPS_PER_TICK {
            let dt = FIXED_DT.min(remaining);
            self.physics_step(dt);
            remaining -= dt;
            substeps += 1;
        }

        self.record_snapshot();
    }

    /// One fixed-timestep physics update: resolve the effective thrust for
    /// the current altitude, consume fuel, auto-stage if exhausted,
    /// integrate, then classify termination.
    fn physics_step(&mut self, dt: f64) {
        let altitude = self.state.altitude();
        let f = crate::math::clamp(altitude / KARMAN_LINE, 0.0, 1.0);

        let (thrust_accel, mass_rate) = self.resolve_thrust(f);

        if let Some(stage) = self.stages.get_mut(self.active_stage) {
            let burned = (mass_rate * dt).min(stage.fuel_remaining);
            stage.fuel_remaining = (stage.fuel_remaining - burned).max(0.0);
            self.state.mass = (self.state.mass - burned).max(0.0);
            self.propellant_cost_used += burned * self.cost_per_kg_propellant;

            if stage.fuel_remaining <= 0.0 && mass_rate > 0.0 {
                self.log(EventKind::FuelExhausted { stage_index: self.active_stage });
                if self.auto_stage && self.active_stage + 1 < self.stages.len() {
                    self.separate_stage();
                }
            }
        }

        let (position, velocity) =
            rk4_step(self.state.position, self.state.velocity, self.state.mass, dt, thrust_accel);

        self.state.position = position;
        self.state.velocity = velocity;
        self.state.mission_time += dt;

        self.classify_termination();
    }

    /// Blends sea-level and vacuum thrust/Isp linearly with altitude,
    /// reaching full vacuum performance at the Karman line. `f` is
    /// `(altitude / KARMAN_LINE).clamp(0, 1)`.
    fn resolve_thrust(&self, f: f64) -> (Vec2, f64) {
        let Some(stage) = self.stages.get(self.active_stage) else {
            return (Vec2::zeros(), 0.0);
        };
        if stage.fuel_remaining <= 0.0 {
            return (Vec2::zeros(), 0.0);
        }

        let throttle = if stage.is_throttleable() {
            self.throttle.max(stage.min_throttle())
        } else {
            1.0
        };

        let thrust_full = crate::math::lerp(stage.total_thrust_sea_level, stage.total_thrust_vacuum, f);
        let isp = crate::math::lerp(stage.isp_sea_level, stage.isp_vacuum, f);
        let thrust = thrust_full * throttle;

        if self.state.mass <= 0.0 || thrust <= 0.0 {
            return (Vec2::zeros(), 0.0);
        }

        let mass_rate = propulsion::mass_flow_rate(thrust, isp);
        let direction = self.thrust_direction();
        (direction * (thrust / self.state.mass), mass_rate)
    }

    /// Thrust direction from pitch: 90 degrees is straight up
    /// (radial), 0 degrees is prograde (tangential, direction of motion).
    fn thrust_direction(&self) -> Vec2 {
        let radial = crate::math::normalize_safe(self.state.position);
        if radial == Vec2::zeros() {
            return Vec2::new(0.0, 1.0);
        }
        let tangential = rotate(radial, std::f64::consts::FRAC_PI_2);
        let pitch = crate::math::deg_to_rad(self.pitch_degrees);
        tangential * pitch.cos() + radial * pitch.sin()
    }

    fn separate_stage(&mut self) {
        let departing = self.active_stage;
        if departing >= self.stages.len() {
            return;
        }
        let spent_dry_mass = self.stages[departing].dry_mass;
        let spent_fuel = self.stages[departing].fuel_remaining;
        self.state.mass = (self.state.mass - spent_dry_mass - spent_fuel).max(0.0);
        self.log(EventKind::StageSeparation { stage_index: departing });
        if departing + 1 < self.stages.len() {
            self.active_stage += 1;
        }
    }

    fn record_snapshot(&mut self) {
        let altitude = self.state.altitude();
        self.snapshots.push(FlightSnapshot {
            mission_time: self.state.mission_time,
            position: self.state.position,
            velocity: self.state.velocity,
            mass: self.state.mass,
            altitude,
            speed: self.state.speed(),
            throttle: self.throttle,
            active_stage: self.active_stage,
        });
    }

    /// Ordered termination checks: crash, suborbital-target altitude, then
    /// -- only above the Karman line -- stable-orbit evaluation against the
    /// mission target and fuel-exhausted-suborbital.
    fn classify_termination(&mut self) {
        let altitude = self.state.altitude();

        if altitude < 0.0 {
            self.finish(Outcome::Crashed { mission_time: self.state.mission_time });
            return;
        }

        if let Some(OrbitTarget::Suborbital { altitude_floor }) = &self.mission.requirements.target_orbit {
            if altitude >= *altitude_floor {
                self.finish(Outcome::SuborbitalSuccess { apoapsis: altitude });
                return;
            }
        }

        if altitude > KARMAN_LINE {
            let elements = OrbitalElements::from_state_vectors(self.state.position, self.state.velocity);
            if elements.is_stable() {
                match &self.mission.requirements.target_orbit {
                    Some(target @ OrbitTarget::Orbital { .. }) => {
                        if target.matches(&elements) {
                            self.finish(Outcome::Orbit { elements, matched_target: true });
                            return;
                        }
                    }
                    None => {
                        if elements.periapsis > KARMAN_LINE {
                            self.finish(Outcome::Orbit { elements, matched_target: true });
                            return;
                        }
                    }
                    _ => {}
                }
            }

            let fuel_remaining: f64 =
                self.stages[self.active_stage..].iter().map(|s| s.fuel_remaining).sum();
            if fuel_remaining <= 0.0 && elements.periapsis < 0.0 {
                self.finish(Outcome::FuelExhaustedSuborbital { mission_time: self.state.mission_time });
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            self.log(EventKind::MissionEnded { outcome: outcome.clone() });
            self.outcome = Some(outcome);
        }
    }

    fn log(&mut self, kind: EventKind) {
        self.events.push(FlightEvent {
            mission_time: self.state.mission_time,
            emission_index: self.next_emission_index,
            kind,
        });
        self.next_emission_index += 1;
    }

    /// Packages the terminated flight into a `FlightResult` for scoring.
    /// Returns `None` while the flight is still in progress.
    pub fn into_result(self) -> Option<FlightResult> {
        let outcome = self.outcome?;
        let fuel_used: f64 = self
            .stages
            .iter()
            .map(|s| s.fuel_capacity - s.fuel_remaining)
            .sum();
        Some(FlightResult {
            outcome,
            final_state: self.state,
            fuel_used,
            stages_separated: self.active_stage,
            propellant_cost_used: self.propellant_cost_used,
            events: self.events,
            snapshots: self.snapshots,
        })
    }
}
