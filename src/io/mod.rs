//! JSON persistence for the serializable parts of the data model:
//! rocket assemblies, missions, flight results, and mission results.
//! Every persisted type carries a `version` field so a future schema change
//! can add fields without breaking old save files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::scoring::MissionResult;
use crate::sim::state::FlightResult;
use crate::vehicle::mission::Mission;
use crate::vehicle::rocket::RocketConfig;

pub const SCHEMA_VERSION: u32 = 1;

/// Wraps a payload with the schema version it was written under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub version: u32,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> Versioned<T> {
    pub fn new(payload: T) -> Self {
        Versioned { version: SCHEMA_VERSION, payload }
    }
}

fn to_json<T: Serialize>(value: &T) -> SimResult<String> {
    serde_json::to_string_pretty(&Versioned::new(value))
        .map_err(|e| SimError::invalid(format!("failed to serialize: {e}")))
}

fn from_json<T: for<'de> Deserialize<'de>>(text: &str) -> SimResult<T> {
    let versioned: Versioned<T> =
        serde_json::from_str(text).map_err(|e| SimError::invalid(format!("failed to parse: {e}")))?;
    Ok(versioned.payload)
}

fn write_to(path: &Path, json: &str) -> SimResult<()> {
    fs::write(path, json).map_err(|e| SimError::invalid(format!("failed to write {}: {e}", path.display())))
}

fn read_from(path: &Path) -> SimResult<String> {
    fs::read_to_string(path).map_err(|e| SimError::invalid(format!("failed to read {}: {e}", path.display())))
}

pub fn save_rocket(rocket: &RocketConfig, path: impl AsRef<Path>) -> SimResult<()> {
    write_to(path.as_ref(), &to_json(rocket)?)
}

pub fn load_rocket(path: impl AsRef<Path>) -> SimResult<RocketConfig> {
    from_json(&read_from(path.as_ref())?)
}

pub fn save_mission(mission: &Mission, path: impl AsRef<Path>) -> SimResult<()> {
    write_to(path.as_ref(), &to_json(mission)?)
}

pub fn load_mission(path: impl AsRef<Path>) -> SimResult<Mission> {
    from_json(&read_from(path.as_ref())?)
}

pub fn save_flight_result(result: &FlightResult, path: impl AsRef<Path>) -> SimResult<()> {
    write_to(path.as_ref(), &to_json(result)?)
}

pub fn save_mission_result(result: &MissionResult, path: impl AsRef<Path>) -> SimResult<()> {
    write_to(path.as_ref(), &to_json(result)?)
}
