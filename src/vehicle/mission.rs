use serde::{Deserialize, Serialize};

use crate::orbital::OrbitTarget;
use crate::sim::state::FlightResult;

/// How a bonus challenge's completion condition is expressed. `Predicate` bonuses are built in code (presets);
/// `MaxCost` and `LegacyCostText` are the two forms that survive a JSON
/// round trip.
#[derive(Clone, Serialize, Deserialize)]
pub enum BonusClause {
    /// Evaluated directly against the completed flight. Not serializable —
    /// deserializing a mission with a `Predicate` bonus is a programming
    /// error, not a data-format one, so it is simply skipped (see
    /// `#[serde(skip)]` below) rather than given a dummy encoding.
    #[serde(skip)]
    Predicate(fn(&FlightResult) -> bool),
    /// Completed the mission at or under this propellant cost.
    MaxCost(f64),
    /// Legacy free-text cost clause (`"max_cost:<number>"`), the format used
    /// by missions authored before the structured `MaxCost` form existed.
    LegacyCostText(String),
}

impl std::fmt::Debug for BonusClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BonusClause::Predicate(_) => write!(f, "Predicate(<fn>)"),
            BonusClause::MaxCost(v) => write!(f, "MaxCost({v})"),
            BonusClause::LegacyCostText(s) => write!(f, "LegacyCostText({s:?})"),
        }
    }
}

impl Default for BonusClause {
    fn default() -> Self {
        BonusClause::MaxCost(f64::INFINITY)
    }
}

/// An optional, extra-credit condition on top of a mission's base
/// requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusChallenge {
    pub id: String,
    pub description: String,
    pub star_value: u32,
    pub clause: BonusClause,
}

/// What a flight must accomplish to count as a pass. `target_orbit` is
/// optional: a mission with none simply asks the vehicle to reach and hold
/// any stable orbit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionRequirements {
    pub target_orbit: Option<OrbitTarget>,
    pub target_body: String,
    pub min_payload_mass: f64,
    pub max_budget: f64,
}

/// A playable mission: requirements, budget, optional bonus challenges, and
/// the educational topics it's tagged with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub tier: u32,
    pub requirements: MissionRequirements,
    pub budget: f64,
    pub bonus_challenges: Vec<BonusChallenge>,
    pub educational_topic_ids: Vec<String>,
}

impl Mission {
    /// A flight passes the mission's base requirement when its outcome is a
    /// success and the payload mass carried at least meets the minimum.
    pub fn base_requirement_met(&self, result: &FlightResult, payload_mass: f64) -> bool {
        result.outcome.is_success() && payload_mass >= self.requirements.min_payload_mass
    }
}

pub mod presets {
    use super::*;
    use crate::orbital::Bound;

    /// A first-flight suborbital hop: clear the Karman line, nothing more.
    pub fn suborbital_hop() -> Mission {
        Mission {
            id: "suborbital-hop".into(),
            tier: 1,
            requirements: MissionRequirements {
                target_orbit: Some(OrbitTarget::Suborbital { altitude_floor: 100_000.0 }),
                target_body: "Earth".into(),
                min_payload_mass: 0.0,
                max_budget: 500_000.0,
            },
            budget: 500_000.0,
            bonus_challenges: vec![BonusChallenge {
                id: "under-budget".into(),
                description: "Complete the hop for under 300,000 credits".into(),
                star_value: 1,
                clause: BonusClause::MaxCost(300_000.0),
            }],
            educational_topic_ids: vec!["atmospheric-drag".into(), "gravity-basics".into()],
        }
    }

    /// Reach a 300-500 km circular-ish low Earth orbit.
    pub fn leo_insertion() -> Mission {
        Mission {
            id: "leo-insertion".into(),
            tier: 2,
            requirements: MissionRequirements {
                target_orbit: Some(OrbitTarget::Orbital {
                    periapsis: Bound::new(300_000.0, 500_000.0),
                    apoapsis: Bound::new(300_000.0, 500_000.0),
                }),
                target_body: "Earth".into(),
                min_payload_mass: 100.0,
                max_budget: 2_000_000.0,
            },
            budget: 2_000_000.0,
            bonus_challenges: vec![BonusChallenge {
                id: "legacy-efficient".into(),
                description: "Reach orbit spending no more than 1,500,000 credits".into(),
                star_value: 2,
                clause: BonusClause::LegacyCostText("max_cost:1500000".into()),
            }],
            educational_topic_ids: vec!["orbital-mechanics".into(), "staging".into()],
        }
    }

    /// Geostationary transfer: a high apoapsis bound, no periapsis ceiling.
    pub fn geo_transfer() -> Mission {
        Mission {
            id: "geo-transfer".into(),
            tier: 3,
            requirements: MissionRequirements {
                target_orbit: Some(OrbitTarget::Orbital {
                    periapsis: Bound::at_least(300_000.0),
                    apoapsis: Bound::new(35_586_000.0, 35_986_000.0),
                }),
                target_body: "Earth".into(),
                min_payload_mass: 250.0,
                max_budget: 6_000_000.0,
            },
            budget: 6_000_000.0,
            bonus_challenges: Vec::new(),
            educational_topic_ids: vec!["hohmann-transfer".into(), "vis-viva".into()],
        }
    }
}
