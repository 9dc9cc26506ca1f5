pub mod engine;
pub mod mission;
pub mod rocket;
pub mod stage;

pub use engine::EngineDef;
pub use mission::{BonusChallenge, BonusClause, Mission, MissionRequirements};
pub use rocket::RocketConfig;
pub use stage::{EngineMount, StageConfig, StageRuntime};
