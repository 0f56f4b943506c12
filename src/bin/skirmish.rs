//! Headless Skirmish Runner
//!
//! Loads the unit catalog, musters an enemy army for a points budget, rolls
//! a random player army for the same budget, and fights the battle to
//! completion. Prints a JSON or text report of the outcome.

use std::path::PathBuf;

use clap::Parser;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use warline::battle::{
    deploy_position, load_catalog, muster_army, Army, AttackLog, BasicTactics, BattleRunner,
    BattleState, RealtimePacing, Unit, UnitTemplate, PLAYER_DEPLOY_X, PLAYER_DEPLOY_Y,
};
use warline::core::Result;

/// Headless skirmish runner - mustered enemy vs random player roster
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Fight an auto-battle between a mustered enemy and a random player army")]
struct Args {
    /// Unit catalog both armies draw from
    #[arg(long, default_value = "data/units.toml")]
    catalog: PathBuf,

    /// Points budget per side
    #[arg(long, default_value_t = 1000)]
    budget: u32,

    /// Random seed for the player roster (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log every resolved attack to stderr
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Space out turns and rounds in real time
    #[arg(long)]
    paced: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct SkirmishReport {
    outcome: String,
    rounds: u32,
    player_survivors: usize,
    enemy_survivors: usize,
    player_points: u32,
    enemy_points: u32,
    seed: u64,
}

/// Prints resolved attacks to stderr
struct StderrLog;

impl AttackLog for StderrLog {
    fn record(&mut self, attacker: &Unit, target: &Unit) {
        eprintln!(
            "  {} hits {} ({} health left)",
            attacker.name, target.name, target.health
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let catalog = load_catalog(&args.catalog)?;

    let enemy_army = muster_army(&catalog, args.budget);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let player_army = roll_player_army(&catalog, args.budget, &mut rng);

    tracing::info!(
        "player fields {} units ({} points), enemy fields {} units ({} points)",
        player_army.units.len(),
        player_army.points,
        enemy_army.units.len(),
        enemy_army.points
    );

    let state = BattleState::new(player_army, enemy_army);
    let mut runner = BattleRunner::new(state, Box::new(BasicTactics));
    if args.verbose {
        runner.set_attack_log(Some(Box::new(StderrLog)));
    }
    if args.paced {
        runner.set_pacing(Box::new(RealtimePacing::default()));
    }

    let outcome = runner.run_to_completion();
    let state = runner.into_state();

    let report = SkirmishReport {
        outcome: format!("{:?}", outcome),
        rounds: state.round,
        player_survivors: state.player_army.alive_count(),
        enemy_survivors: state.enemy_army.alive_count(),
        player_points: state.player_army.points,
        enemy_points: state.enemy_army.points,
        seed,
    };

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        "text" => {
            println!("Skirmish Result");
            println!("===============");
            println!("Outcome: {}", report.outcome);
            println!("Rounds: {}", report.rounds);
            println!(
                "Player survivors: {} ({} points fielded)",
                report.player_survivors, report.player_points
            );
            println!(
                "Enemy survivors: {} ({} points fielded)",
                report.enemy_survivors, report.enemy_points
            );
            println!("Seed: {}", report.seed);
        }
        other => {
            eprintln!("Unknown format '{}', defaulting to json", other);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Roll a random player roster: pick affordable templates uniformly until
/// the budget runs dry, deploying in a block along the left edge.
fn roll_player_army(catalog: &[UnitTemplate], max_points: u32, rng: &mut ChaCha8Rng) -> Army {
    let mut units = Vec::new();
    let mut remaining = max_points;
    let mut spent = 0;

    loop {
        let affordable: Vec<&UnitTemplate> = catalog
            .iter()
            .filter(|t| t.cost > 0 && t.cost <= remaining)
            .collect();
        let Some(template) = affordable.choose(rng) else {
            break;
        };

        let ordinal = units.len() + 1;
        let position = deploy_position(ordinal, PLAYER_DEPLOY_X, PLAYER_DEPLOY_Y);
        units.push(template.spawn(ordinal, position));
        remaining -= template.cost;
        spent += template.cost;
    }

    Army::new(units, spent)
}
