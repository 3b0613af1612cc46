//! autobalance_sim - run a boss encounter through the scaling engine
//!
//! Builds a sandbox dungeon with one boss and a party, pulls the boss, fights
//! seeded melee rounds, then reports what the engine did to the encounter.

mod simulation;

use anyhow::{Context, Result};
use autobalance_core::{default_policy, load_policy, ScalingEngine};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simulation::{EncounterReport, EncounterSetup};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "autobalance_sim", about = "Simulate a boss pull under player-count scaling")]
struct Cli {
    /// Policy file (TOML); the shipped default policy when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Players in the dungeon
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=40))]
    players: u32,

    /// Override BaselinePlayers from the policy
    #[arg(long)]
    baseline: Option<u32>,

    /// Maximum number of melee rounds
    #[arg(long, default_value = "30")]
    rounds: u32,

    /// RNG seed for damage rolls
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut policy = match &cli.config {
        Some(path) => load_policy(path)
            .with_context(|| format!("failed to load policy from {}", path.display()))?,
        None => default_policy(),
    };
    if let Some(baseline) = cli.baseline {
        policy.baseline_players = baseline;
    }
    info!(
        players = cli.players,
        baseline = policy.effective_baseline(),
        model = ?policy.model,
        strategy = ?policy.strategy,
        seed = cli.seed,
        "simulation_start"
    );

    let engine = ScalingEngine::from_config(policy);
    let setup = EncounterSetup {
        players: cli.players,
        rounds: cli.rounds,
        ..EncounterSetup::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    let report = simulation::run(&engine, &setup, &mut rng);

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{json}");
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &EncounterReport) {
    println!(
        "Party:    {} player(s), {} counted",
        report.players, report.relevant_players
    );
    println!("Policy:   {:?} model, {:?} strategy", report.model, report.strategy);
    println!(
        "Factors:  health x{:.3}, damage x{:.3}",
        report.health_factor, report.damage_factor
    );
    println!(
        "Boss HP:  {} base -> {} engaged -> {} after ({} left at end)",
        report.boss_max_health_before,
        report.boss_max_health_engaged,
        report.boss_max_health_after,
        report.boss_health_at_end
    );
    println!(
        "Fight:    {} round(s), {} dealt, {} taken",
        report.rounds_fought, report.damage_dealt, report.damage_taken
    );

    let outcome = if report.boss_killed {
        "boss killed"
    } else if report.party_wiped {
        "party wiped"
    } else {
        "boss evaded"
    };
    println!("Outcome:  {outcome}");
}
