use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::propulsion::{self, G0};
use crate::vehicle::engine::EngineDef;

/// One engine definition plus how many of that engine this stage carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineMount {
    pub engine: EngineDef,
    pub count: u32,
}

/// A frozen stage configuration: engines, propellant load, and
/// structural mass. Immutable once a `RocketConfig` is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub engines: Vec<EngineMount>,
    pub fuel_mass: f64,
    pub structural_mass: f64,
}

impl StageConfig {
    /// Dry mass: structural mass plus the summed dry mass of every engine.
    pub fn dry_mass(&self) -> f64 {
        self.structural_mass
            + self
                .engines
                .iter()
                .map(|m| m.engine.dry_mass * m.count as f64)
                .sum::<f64>()
    }

    /// Wet mass: dry mass plus the initial fuel load.
    pub fn wet_mass(&self) -> f64 {
        self.dry_mass() + self.fuel_mass
    }

    fn validate(&self) -> SimResult<()> {
        if self.fuel_mass < 0.0 || self.structural_mass < 0.0 {
            return Err(SimError::invalid("stage has negative mass"));
        }
        if self.wet_mass() <= 0.0 && !self.engines.is_empty() {
            return Err(SimError::invalid("stage has engines but zero wet mass"));
        }
        for mount in &self.engines {
            if mount.engine.dry_mass < 0.0 {
                return Err(SimError::invalid("engine has negative dry mass"));
            }
        }
        Ok(())
    }
}

/// The mutable per-flight projection of a `StageConfig`. Derived once
/// at simulator construction and mutated only by the simulator.
#[derive(Debug, Clone)]
pub struct StageRuntime {
    pub engines: Vec<EngineMount>,
    pub fuel_remaining: f64,
    pub fuel_capacity: f64,
    pub dry_mass: f64,
    pub total_thrust_vacuum: f64,
    pub total_thrust_sea_level: f64,
    pub isp_vacuum: f64,
    pub isp_sea_level: f64,
    pub mass_flow_rate: f64,
}

impl StageRuntime {
    pub fn from_config(config: &StageConfig) -> SimResult<Self> {
        config.validate()?;

        let total_thrust_vacuum: f64 = config
            .engines
            .iter()
            .map(|m| m.engine.thrust_vacuum * m.count as f64)
            .sum();
        let total_thrust_sea_level: f64 = config
            .engines
            .iter()
            .map(|m| m.engine.thrust_sea_level * m.count as f64)
            .sum();

        let isp_vacuum = thrust_weighted_isp(config, total_thrust_vacuum, true);
        let isp_sea_level = thrust_weighted_isp(config, total_thrust_sea_level, false);

        let mass_flow_rate = propulsion::mass_flow_rate(total_thrust_vacuum, isp_vacuum);

        Ok(StageRuntime {
            engines: config.engines.clone(),
            fuel_remaining: config.fuel_mass,
            fuel_capacity: config.fuel_mass,
            dry_mass: config.dry_mass(),
            total_thrust_vacuum,
            total_thrust_sea_level,
            isp_vacuum,
            isp_sea_level,
            mass_flow_rate,
        })
    }

    /// Whether the stage's primary (first-listed) engine can be throttled.
    pub fn is_throttleable(&self) -> bool {
        self.engines.first().map(|m| m.engine.throttleable).unwrap_or(false)
    }

    /// Minimum throttle setting for the primary engine.
    pub fn min_throttle(&self) -> f64 {
        self.engines.first().map(|m| m.engine.min_throttle).unwrap_or(0.0)
    }

    pub fn total_mass(&self) -> f64 {
        self.dry_mass + self.fuel_remaining
    }

    pub fn launch_twr(&self, total_mass: f64) -> f64 {
        propulsion::thrust_to_weight(self.total_thrust_sea_level, total_mass, G0)
    }
}

fn thrust_weighted_isp(config: &StageConfig, total_thrust: f64, vacuum: bool) -> f64 {
    if total_thrust <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = config
        .engines
        .iter()
        .map(|m| {
            let thrust = if vacuum { m.engine.thrust_vacuum } else { m.engine.thrust_sea_level }
                * m.count as f64;
            let isp = if vacuum { m.engine.isp_vacuum } else { m.engine.isp_sea_level };
            thrust * isp
        })
        .sum();
    weighted / total_thrust
}

/// Standalone stage delta-v with `payload_mass` carried above it,
/// used by the Delta-v budgeting math independent of a live `StageRuntime`.
pub fn stage_delta_v(config: &StageConfig, payload_mass: f64) -> f64 {
    let total_thrust_vacuum: f64 = config
        .engines
        .iter()
        .map(|m| m.engine.thrust_vacuum * m.count as f64)
        .sum();
    let isp = thrust_weighted_isp(config, total_thrust_vacuum, true);
    propulsion::stage_delta_v(isp, config.wet_mass(), config.dry_mass(), payload_mass)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_engine() -> EngineDef {
        EngineDef {
            id: "test".into(),
            thrust_sea_level: 1_000_000.0,
            thrust_vacuum: 1_100_000.0,
            isp_sea_level: 280.0,
            isp_vacuum: 310.0,
            dry_mass: 500.0,
            throttleable: true,
            min_throttle: 0.4,
            restartable: false,
        }
    }

    fn test_stage() -> StageConfig {
        StageConfig {
            engines: vec![EngineMount { engine: test_engine(), count: 1 }],
            fuel_mass: 10_000.0,
            structural_mass: 1_000.0,
        }
    }

    #[test]
    fn dry_and_wet_mass() {
        let s = test_stage();
        assert_eq!(s.dry_mass(), 1_500.0);
        assert_eq!(s.wet_mass(), 11_500.0);
    }

    #[test]
    fn runtime_derives_thrust_weighted_isp() {
        let s = test_stage();
        let rt = StageRuntime::from_config(&s).unwrap();
        assert_eq!(rt.isp_vacuum, 310.0);
        assert_eq!(rt.total_thrust_vacuum, 1_100_000.0);
        assert!(rt.is_throttleable());
        assert_eq!(rt.min_throttle(), 0.4);
    }

    #[test]
    fn negative_mass_is_rejected() {
        let mut s = test_stage();
        s.fuel_mass = -1.0;
        assert!(StageRuntime::from_config(&s).is_err());
    }

    #[test]
    fn zero_wet_mass_with_engines_is_rejected() {
        let mut s = test_stage();
        s.fuel_mass = 0.0;
        s.structural_mass = 0.0;
        let mut e = test_engine();
        e.dry_mass = 0.0;
        s.engines = vec![EngineMount { engine: e, count: 1 }];
        assert!(StageRuntime::from_config(&s).is_err());
    }

    #[test]
    fn fuel_remaining_starts_full() {
        let s = test_stage();
        let rt = StageRuntime::from_config(&s).unwrap();
        assert_eq!(rt.fuel_remaining, 10_000.0);
    }
}
