use serde::{Deserialize, Serialize};

use crate::orbital::elements::OrbitalElements;

/// An inclusive numeric bound. `±INFINITY` sentinels mean "unbounded" on
/// that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
}

impl Bound {
    pub const ANY: Bound = Bound {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub fn new(min: f64, max: f64) -> Self {
        Bound { min, max }
    }

    pub fn at_least(min: f64) -> Self {
        Bound { min, max: f64::INFINITY }
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        if self.min.is_finite() && self.max.is_finite() {
            (self.min + self.max) / 2.0
        } else if self.min.is_finite() {
            self.min
        } else if self.max.is_finite() {
            self.max
        } else {
            0.0
        }
    }
}

/// A mission's orbital requirement, tagged explicitly rather than inferred
/// from an unbounded-periapsis sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OrbitTarget {
    /// Reach and hold a stable orbit whose periapsis/apoapsis fall within
    /// the given bounds.
    Orbital { periapsis: Bound, apoapsis: Bound },
    /// Reach (not necessarily hold) an altitude, no stable orbit required.
    /// `altitude_floor` is the minimum qualifying apoapsis/altitude.
    Suborbital { altitude_floor: f64 },
}

impl OrbitTarget {
    /// A stable orbit matches an `Orbital` target when periapsis and
    /// apoapsis each lie within the requested bounds.
    pub fn matches(&self, elements: &OrbitalElements) -> bool {
        match self {
            OrbitTarget::Orbital { periapsis, apoapsis } => {
                periapsis.contains(elements.periapsis) && apoapsis.contains(elements.apoapsis)
            }
            OrbitTarget::Suborbital { .. } => false,
        }
    }

    pub fn is_suborbital(&self) -> bool {
        matches!(self, OrbitTarget::Suborbital { .. })
    }
}
