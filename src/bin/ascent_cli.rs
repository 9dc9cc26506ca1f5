use std::path::PathBuf;

use ascent_core::sim::FlightSimulator;
use ascent_core::vehicle::mission::presets;
use ascent_core::vehicle::RocketConfig;
use ascent_core::{io, scoring};
use clap::{Parser, Subcommand};

/// Drives a flight simulation from the command line: run a preset or saved
/// mission/rocket pair to termination and print the score.
#[derive(Parser)]
#[command(name = "ascent-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fly a rocket against a built-in preset mission.
    Fly {
        /// Path to a rocket JSON file, as written by `ascent-core::io::save_rocket`.
        #[arg(long)]
        rocket: PathBuf,
        /// Which preset mission to fly: suborbital-hop, leo-insertion, geo-transfer.
        #[arg(long, default_value = "suborbital-hop")]
        mission: String,
        /// Credits charged per kilogram of propellant burned.
        #[arg(long, default_value_t = 10.0)]
        cost_per_kg: f64,
        /// Seconds of mission time simulated per tick.
        #[arg(long, default_value_t = 1.0)]
        dt: f64,
        /// Hard cap on ticks, so a flight that never resolves still exits.
        #[arg(long, default_value_t = 100_000)]
        max_ticks: u64,
        /// Where to write the resulting MissionResult as JSON.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the built-in preset missions.
    Missions,
}

fn resolve_preset(name: &str) -> Option<ascent_core::vehicle::mission::Mission> {
    match name {
        "suborbital-hop" => Some(presets::suborbital_hop()),
        "leo-insertion" => Some(presets::leo_insertion()),
        "geo-transfer" => Some(presets::geo_transfer()),
        _ => None,
    }
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Missions => {
            println!("suborbital-hop\nleo-insertion\ngeo-transfer");
        }
        Command::Fly { rocket, mission, cost_per_kg, dt, max_ticks, out } => {
            if let Err(err) = fly(&rocket, &mission, cost_per_kg, dt, max_ticks, out.as_deref()) {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
    }
}

fn fly(
    rocket_path: &std::path::Path,
    mission_name: &str,
    cost_per_kg: f64,
    dt: f64,
    max_ticks: u64,
    out: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rocket: RocketConfig = io::load_rocket(rocket_path)?;
    let mission = resolve_preset(mission_name)
        .ok_or_else(|| format!("unknown preset mission: {mission_name}"))?;

    let initial_mass = rocket.total_mass();
    let rocket_config = rocket.clone();
    let mut sim = FlightSimulator::new(rocket, mission.clone(), cost_per_kg)?;
    sim.start();

    let mut ticks = 0;
    while !sim.is_terminated() && ticks < max_ticks {
        sim.tick(dt);
        ticks += 1;
    }

    let result = sim
        .into_result()
        .ok_or("flight did not terminate within max_ticks")?;
    let score = scoring::score_flight(&mission, &result, initial_mass);

    println!("outcome: {:?}", result.outcome);
    println!(
        "efficiency {:.0}  budget {:.0}  accuracy {:.0}  total {:.0}  stars {}",
        score.efficiency.score, score.budget.score, score.accuracy.score, score.total_score, score.stars
    );
    if !score.bonus_results.is_empty() {
        println!("bonus stars earned: {}", score.bonus_stars_earned);
    }

    if let Some(out_path) = out {
        let bonus_completed = score
            .bonus_results
            .iter()
            .filter(|r| r.satisfied)
            .map(|r| r.challenge_id.clone())
            .collect();
        let completed_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let mission_result = scoring::MissionResult {
            mission_id: mission.id.clone(),
            stars: score.stars,
            best_score: score,
            best_rocket_config: rocket_config,
            bonus_completed,
            completed_at,
            flight_result: result,
            version: scoring::MISSION_RESULT_VERSION,
        };
        io::save_mission_result(&mission_result, out_path)?;
    }

    Ok(())
}
