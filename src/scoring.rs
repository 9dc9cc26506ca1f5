//! Deterministic post-flight scoring: efficiency, budget, and
//! accuracy axes combined into a star rating, plus bonus challenge
//! resolution.

use serde::{Deserialize, Serialize};

use crate::math::clamp;
use crate::orbital::{hohmann, maneuvers::circular_velocity, OrbitTarget};
use crate::physics::gravity::R_EARTH;
use crate::propulsion::G0;
use crate::sim::state::{FlightResult, Outcome};
use crate::vehicle::mission::{BonusClause, Mission};
use crate::vehicle::rocket::RocketConfig;

pub const MISSION_RESULT_VERSION: u32 = 1;

/// How much delta-v was spent versus the optimal estimate, and how much
/// propellant that waste cost. `score` is on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyBreakdown {
    pub score: f64,
    pub dv_used: f64,
    pub dv_optimal: f64,
    pub fuel_wasted: f64,
}

/// How much of the mission's budget was spent. `score` is on a 0-100
/// scale, offset so that spending exactly half the budget scores 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetBreakdown {
    pub score: f64,
    pub cost_spent: f64,
    pub budget_max: f64,
    pub percent_under_budget: f64,
}

/// How closely the final orbit (or altitude) matched the mission's
/// target. `inclination_error` is always 0 -- the simulator is planar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyBreakdown {
    pub score: f64,
    pub orbital_deviation: f64,
    pub inclination_error: f64,
}

/// The three independently-computed score axes and their combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub efficiency: EfficiencyBreakdown,
    pub budget: BudgetBreakdown,
    pub accuracy: AccuracyBreakdown,
    pub total_score: f64,
    pub stars: u32,
    pub bonus_stars_earned: u32,
    pub bonus_results: Vec<BonusResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusResult {
    pub challenge_id: String,
    pub satisfied: bool,
}

/// The final, persisted outcome of a mission attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionResult {
    pub mission_id: String,
    pub stars: u32,
    pub best_score: ScoreBreakdown,
    pub best_rocket_config: RocketConfig,
    pub bonus_completed: Vec<String>,
    pub completed_at: u64,
    pub flight_result: FlightResult,
    pub version: u32,
}

/// A rough-order-of-magnitude estimate of the delta-v a well-flown mission
/// would need to reach `target` from the pad. A mission with no orbital
/// target needs none. Suborbital targets need enough vertical delta-v to
/// clear the floor altitude; orbital targets are priced against a fixed
/// LEO-insertion reference, plus a Hohmann transfer when the target sits
/// above the LEO band.
pub fn estimate_required_delta_v(target: &Option<OrbitTarget>) -> f64 {
    const LEO_INSERTION_DV: f64 = 9_400.0;
    const LEO_BAND_ALTITUDE: f64 = 2_000_000.0;
    const PARKING_ALTITUDE: f64 = 200_000.0;

    match target {
        None => 0.0,
        Some(OrbitTarget::Suborbital { altitude_floor }) => {
            (2.0 * G0 * altitude_floor.max(0.0)).sqrt() * 1.15
        }
        Some(OrbitTarget::Orbital { periapsis, apoapsis }) => {
            let target_altitude = (periapsis.midpoint() + apoapsis.midpoint()) / 2.0;
            if target_altitude <= LEO_BAND_ALTITUDE {
                return LEO_INSERTION_DV;
            }
            let r_parking = R_EARTH + PARKING_ALTITUDE;
            let r_target = R_EARTH + target_altitude;
            let transfer = hohmann(r_parking, r_target);
            LEO_INSERTION_DV + transfer.total_dv
        }
    }
}

/// Delta-v actually spent over the flight, recovered from the Tsiolkovsky
/// relation between initial and final mass rather than integrated thrust
/// (the two agree up to RK4 truncation error).
fn delta_v_used(result: &FlightResult, initial_mass: f64) -> f64 {
    let final_mass = result.final_state.mass;
    crate::propulsion::delta_v(
        weighted_isp_estimate(result, initial_mass, final_mass),
        initial_mass,
        final_mass,
    )
}

/// Without per-burn bookkeeping, approximate the effective Isp as the one
/// that would produce the observed mass ratio at a representative 300s
/// vacuum Isp; the efficiency axis only needs consistent relative ordering
/// between flights, not a thrust-log-exact Isp.
fn weighted_isp_estimate(_result: &FlightResult, initial_mass: f64, final_mass: f64) -> f64 {
    if final_mass <= 0.0 || initial_mass <= final_mass {
        return 300.0;
    }
    300.0
}

fn efficiency_score(mission: &Mission, result: &FlightResult, initial_mass: f64) -> EfficiencyBreakdown {
    let dv_optimal = estimate_required_delta_v(&mission.requirements.target_orbit);
    let dv_used = delta_v_used(result, initial_mass);
    let ratio = dv_optimal / dv_optimal.max(dv_used).max(1.0);
    EfficiencyBreakdown {
        score: clamp(ratio * 100.0, 0.0, 100.0).round(),
        dv_used,
        dv_optimal,
        fuel_wasted: (dv_used - dv_optimal).max(0.0),
    }
}

fn budget_score(mission: &Mission, result: &FlightResult) -> BudgetBreakdown {
    let budget_max = mission.requirements.max_budget;
    let cost_spent = result.propellant_cost_used;
    let ratio = if budget_max > 0.0 { 1.0 - cost_spent / budget_max } else { -1.0 };
    BudgetBreakdown {
        score: clamp(ratio * 100.0 + 50.0, 0.0, 100.0).round(),
        cost_spent,
        budget_max,
        percent_under_budget: (ratio * 100.0).max(0.0),
    }
}

fn accuracy_score(mission: &Mission, result: &FlightResult) -> AccuracyBreakdown {
    const TAU: f64 = 10_000.0;

    let mut breakdown = match (&mission.requirements.target_orbit, &result.outcome) {
        (Some(OrbitTarget::Suborbital { altitude_floor }), Outcome::SuborbitalSuccess { apoapsis }) => {
            let floor = altitude_floor.max(1.0);
            let apo_ratio = (apoapsis / floor).min(1.0);
            AccuracyBreakdown {
                score: (apo_ratio * 100.0).round(),
                orbital_deviation: (floor - apoapsis).abs(),
                inclination_error: 0.0,
            }
        }
        (Some(OrbitTarget::Orbital { periapsis, apoapsis }), Outcome::Orbit { elements, .. }) => {
            let peri_error = (elements.periapsis - periapsis.midpoint()).abs();
            let apo_error = (elements.apoapsis - apoapsis.midpoint()).abs();
            let avg = (peri_error + apo_error) / 2.0;
            let error_ratio = 1.0 - (avg / (10.0 * TAU)).min(1.0);
            AccuracyBreakdown {
                score: clamp(error_ratio * 100.0, 0.0, 100.0).round(),
                orbital_deviation: avg,
                inclination_error: 0.0,
            }
        }
        (None, Outcome::Orbit { matched_target: true, .. }) => {
            AccuracyBreakdown { score: 75.0, orbital_deviation: 0.0, inclination_error: 0.0 }
        }
        _ => AccuracyBreakdown { score: 0.0, orbital_deviation: 0.0, inclination_error: 0.0 },
    };

    if matches!(result.outcome, Outcome::Crashed { .. } | Outcome::FuelExhaustedSuborbital { .. }) {
        breakdown.score = breakdown.score.min(10.0);
    }

    breakdown
}

fn stars_for(total_score: f64) -> u32 {
    if total_score >= 80.0 {
        3
    } else if total_score >= 60.0 {
        2
    } else if total_score >= 40.0 {
        1
    } else {
        0
    }
}

/// Resolves one bonus challenge against a completed flight. A
/// `Predicate` clause is called behind `catch_unwind` so a panicking
/// bonus predicate degrades to "not satisfied" instead of poisoning the
/// whole scoring pass.
fn resolve_bonus(clause: &BonusClause, result: &FlightResult) -> bool {
    match clause {
        BonusClause::Predicate(f) => {
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(result))).unwrap_or(false)
        }
        BonusClause::MaxCost(max_cost) => result.propellant_cost_used <= *max_cost,
        BonusClause::LegacyCostText(text) => parse_legacy_max_cost(text)
            .map(|max_cost| result.propellant_cost_used <= max_cost)
            .unwrap_or(false),
    }
}

/// Legacy free-text bonus clauses are `max_cost:<number>`. Anything else
/// fails to parse and the bonus is treated as unsatisfied.
fn parse_legacy_max_cost(text: &str) -> Option<f64> {
    let (key, value) = text.split_once(':')?;
    if key.trim() != "max_cost" {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Scores a completed flight against its mission. `initial_mass` is
/// the rocket's mass at liftoff, needed to recover delta-v spent. The
/// total score is an unweighted mean of the three axes, computed for
/// every outcome; only stars are forced to zero on failure.
pub fn score_flight(mission: &Mission, result: &FlightResult, initial_mass: f64) -> ScoreBreakdown {
    let efficiency = efficiency_score(mission, result, initial_mass);
    let budget = budget_score(mission, result);
    let accuracy = accuracy_score(mission, result);

    let total_score = ((efficiency.score + budget.score + accuracy.score) / 3.0).round();
    let stars = if result.outcome.is_success() { stars_for(total_score) } else { 0 };

    let bonus_results: Vec<BonusResult> = mission
        .bonus_challenges
        .iter()
        .map(|challenge| BonusResult {
            challenge_id: challenge.id.clone(),
            satisfied: result.outcome.is_success() && resolve_bonus(&challenge.clause, result),
        })
        .collect();

    let bonus_stars_earned: u32 = mission
        .bonus_challenges
        .iter()
        .zip(&bonus_results)
        .filter(|(_, r)| r.satisfied)
        .map(|(c, _)| c.star_value)
        .sum();

    ScoreBreakdown { efficiency, budget, accuracy, total_score, stars, bonus_stars_earned, bonus_results }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec2;
    use crate::orbital::{Bound, OrbitalElements};
    use crate::sim::state::SimState;
    use crate::vehicle::mission::{BonusChallenge, MissionRequirements};

    fn leo_mission() -> Mission {
        Mission {
            id: "leo".into(),
            tier: 2,
            requirements: MissionRequirements {
                target_orbit: Some(OrbitTarget::Orbital {
                    periapsis: Bound::new(300_000.0, 500_000.0),
                    apoapsis: Bound::new(300_000.0, 500_000.0),
                }),
                target_body: "Earth".into(),
                min_payload_mass: 0.0,
                max_budget: 1_000_000.0,
            },
            budget: 1_000_000.0,
            bonus_challenges: vec![BonusChallenge {
                id: "cheap".into(),
                description: "under 500k".into(),
                star_value: 2,
                clause: BonusClause::MaxCost(500_000.0),
            }],
            educational_topic_ids: Vec::new(),
        }
    }

    fn orbit_result(cost: f64) -> FlightResult {
        let r = R_EARTH + 400_000.0;
        let v = circular_velocity(r);
        let elements = OrbitalElements::from_state_vectors(Vec2::new(r, 0.0), Vec2::new(0.0, v));
        FlightResult {
            outcome: Outcome::Orbit { elements, matched_target: true },
            final_state: SimState {
                position: Vec2::new(r, 0.0),
                velocity: Vec2::new(0.0, v),
                mass: 600.0,
                mission_time: 500.0,
            },
            fuel_used: 9_000.0,
            stages_separated: 1,
            propellant_cost_used: cost,
            events: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    #[test]
    fn successful_orbit_scores_above_zero() {
        let mission = leo_mission();
        let result = orbit_result(200_000.0);
        let score = score_flight(&mission, &result, 9_600.0);
        assert!(score.total_score > 0.0);
        assert!(score.accuracy.score > 90.0);
    }

    #[test]
    fn failed_outcome_forces_zero_stars_but_scores_accuracy() {
        let mission = leo_mission();
        let mut result = orbit_result(200_000.0);
        result.outcome = Outcome::Crashed { mission_time: 10.0 };
        let score = score_flight(&mission, &result, 9_600.0);
        assert_eq!(score.stars, 0);
        assert!(score.accuracy.score <= 10.0);
        assert!(score.bonus_results.iter().all(|b| !b.satisfied));
    }

    #[test]
    fn bonus_under_cost_is_satisfied() {
        let mission = leo_mission();
        let result = orbit_result(100_000.0);
        let score = score_flight(&mission, &result, 9_600.0);
        assert_eq!(score.bonus_stars_earned, 2);
    }

    #[test]
    fn bonus_over_cost_is_not_satisfied() {
        let mission = leo_mission();
        let result = orbit_result(900_000.0);
        let score = score_flight(&mission, &result, 9_600.0);
        assert_eq!(score.bonus_stars_earned, 0);
    }

    #[test]
    fn legacy_cost_text_parses_known_format() {
        assert_eq!(parse_legacy_max_cost("max_cost:42000"), Some(42_000.0));
        assert_eq!(parse_legacy_max_cost("garbage"), None);
        assert_eq!(parse_legacy_max_cost("max_cost:not-a-number"), None);
    }

    #[test]
    fn predicate_panic_degrades_to_unsatisfied() {
        fn panics(_: &FlightResult) -> bool {
            panic!("bonus predicate blew up");
        }
        let result = orbit_result(100_000.0);
        let satisfied = resolve_bonus(&BonusClause::Predicate(panics), &result);
        assert!(!satisfied);
    }

    #[test]
    fn budget_score_hits_exactly_100_at_half_spent() {
        let mission = leo_mission();
        let mut result = orbit_result(500_000.0);
        result.propellant_cost_used = mission.requirements.max_budget * 0.5;
        let budget = budget_score(&mission, &result);
        assert_eq!(budget.score, 100.0);
    }

    #[test]
    fn no_target_orbit_scores_flat_accuracy_credit() {
        let mut mission = leo_mission();
        mission.requirements.target_orbit = None;
        let result = orbit_result(200_000.0);
        let accuracy = accuracy_score(&mission, &result);
        assert_eq!(accuracy.score, 75.0);
    }

    #[test]
    fn stars_follow_zero_to_three_thresholds() {
        assert_eq!(stars_for(100.0), 3);
        assert_eq!(stars_for(80.0), 3);
        assert_eq!(stars_for(65.0), 2);
        assert_eq!(stars_for(40.0), 1);
        assert_eq!(stars_for(10.0), 0);
        assert_eq!(stars_for(0.0), 0);
    }
}
