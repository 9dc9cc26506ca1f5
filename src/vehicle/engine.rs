use serde::{Deserialize, Serialize};

/// A frozen engine definition, resolved by id from the builder's catalog.
/// The simulator never constructs these itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineDef {
    pub id: String,
    pub thrust_sea_level: f64,
    pub thrust_vacuum: f64,
    pub isp_sea_level: f64,
    pub isp_vacuum: f64,
    pub dry_mass: f64,
    pub throttleable: bool,
    pub min_throttle: f64,
    pub restartable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_def_roundtrips_through_json() {
        let e = EngineDef {
            id: "merlin-1d".into(),
            thrust_sea_level: 845_000.0,
            thrust_vacuum: 914_000.0,
            isp_sea_level: 282.0,
            isp_vacuum: 311.0,
            dry_mass: 470.0,
            throttleable: true,
            min_throttle: 0.4,
            restartable: true,
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: EngineDef = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
