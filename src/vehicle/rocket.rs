use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::vehicle::stage::{StageConfig, StageRuntime};

/// A complete, ordered vehicle assembly: one or more stages plus a
/// fixed payload, stacked bottom-up (index 0 ignites first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketConfig {
    pub name: String,
    pub stages: Vec<StageConfig>,
    pub payload_mass: f64,
    pub total_cost: f64,
}

impl RocketConfig {
    /// Validates the assembly and returns it unchanged, or a
    /// `SimError::InvalidConfig` describing the first problem found.
    pub fn validate(self) -> SimResult<Self> {
        if self.stages.is_empty() {
            return Err(SimError::invalid("rocket has no stages"));
        }
        if self.payload_mass < 0.0 {
            return Err(SimError::invalid("payload mass cannot be negative"));
        }
        if self.total_cost < 0.0 {
            return Err(SimError::invalid("total cost cannot be negative"));
        }
        for (i, stage) in self.stages.iter().enumerate() {
            if stage.engines.is_empty() {
                return Err(SimError::invalid(format!("stage {i} has no engines")));
            }
            if stage.fuel_mass < 0.0 || stage.structural_mass < 0.0 {
                return Err(SimError::invalid(format!("stage {i} has negative mass")));
            }
        }
        Ok(self)
    }

    /// Total wet mass of the whole stack, payload included.
    pub fn total_mass(&self) -> f64 {
        self.payload_mass + self.stages.iter().map(StageConfig::wet_mass).sum::<f64>()
    }

    /// Total dry mass of the whole stack, payload included.
    pub fn total_dry_mass(&self) -> f64 {
        self.payload_mass + self.stages.iter().map(StageConfig::dry_mass).sum::<f64>()
    }

    /// Mass carried above stage `index` at liftoff: payload plus every
    /// stage stacked on top of it.
    pub fn payload_above(&self, index: usize) -> f64 {
        self.payload_mass + self.stages[index + 1..].iter().map(StageConfig::wet_mass).sum::<f64>()
    }

    /// Theoretical vacuum delta-v budget for the whole stack, summed
    /// stage-by-stage bottom-up.
    pub fn total_delta_v(&self) -> f64 {
        self.stages
            .iter()
            .enumerate()
            .map(|(i, stage)| crate::vehicle::stage::stage_delta_v(stage, self.payload_above(i)))
            .sum()
    }

    pub fn stage_runtimes(&self) -> SimResult<Vec<StageRuntime>> {
        self.stages.iter().map(StageRuntime::from_config).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicle::engine::EngineDef;
    use crate::vehicle::stage::EngineMount;
    use approx::assert_relative_eq;

    fn engine() -> EngineDef {
        EngineDef {
            id: "kestrel".into(),
            thrust_sea_level: 400_000.0,
            thrust_vacuum: 440_000.0,
            isp_sea_level: 270.0,
            isp_vacuum: 300.0,
            dry_mass: 300.0,
            throttleable: true,
            min_throttle: 0.5,
            restartable: false,
        }
    }

    fn two_stage_rocket() -> RocketConfig {
        RocketConfig {
            name: "test-bird".into(),
            stages: vec![
                StageConfig {
                    engines: vec![EngineMount { engine: engine(), count: 1 }],
                    fuel_mass: 8_000.0,
                    structural_mass: 800.0,
                },
                StageConfig {
                    engines: vec![EngineMount { engine: engine(), count: 1 }],
                    fuel_mass: 2_000.0,
                    structural_mass: 300.0,
                },
            ],
            payload_mass: 500.0,
            total_cost: 1_000_000.0,
        }
    }

    #[test]
    fn validate_accepts_well_formed_rocket() {
        assert!(two_stage_rocket().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_stages() {
        let mut r = two_stage_rocket();
        r.stages.clear();
        assert!(r.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_payload() {
        let mut r = two_stage_rocket();
        r.payload_mass = -1.0;
        assert!(r.validate().is_err());
    }

    #[test]
    fn payload_above_folds_upper_stages() {
        let r = two_stage_rocket();
        // Stage 0 carries stage 1's wet mass plus the payload above it.
        assert_relative_eq!(r.payload_above(0), 500.0 + 2_300.0);
        assert_relative_eq!(r.payload_above(1), 500.0);
    }

    #[test]
    fn total_mass_sums_stack() {
        let r = two_stage_rocket();
        assert_relative_eq!(r.total_mass(), 500.0 + 8_800.0 + 2_300.0);
    }

    #[test]
    fn total_delta_v_is_positive_and_finite() {
        let r = two_stage_rocket();
        let dv = r.total_delta_v();
        assert!(dv > 0.0 && dv.is_finite());
    }

    #[test]
    fn stage_runtimes_match_stage_count() {
        let r = two_stage_rocket();
        let runtimes = r.stage_runtimes().unwrap();
        assert_eq!(runtimes.len(), 2);
    }
}
