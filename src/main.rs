//! Demo runner: both sides play automatically and the narration is printed.

use anyhow::{bail, Context, Result};
use clap::Parser;
use creature_battle::{
    BattleConfig, BattleEngine, BattlePhase, Behavior, CreatureSource, RandomMoveAi,
    RecordRegistry, Side, TurnRng,
};
use std::path::PathBuf;

/// Run a random battle between two creatures
#[derive(Parser)]
#[command(name = "creature-battle")]
#[command(about = "Turn-based creature battle demo", long_about = None)]
#[command(version)]
struct Args {
    /// JSON array of creature records
    #[arg(long, default_value = "data/creatures.json")]
    records: PathBuf,

    /// Name of the player's creature
    #[arg(long, default_value = "pikachu")]
    creature: String,

    /// Name of the opponent; a wild opponent is drawn when omitted
    #[arg(long)]
    opponent: Option<String>,

    /// RON engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible battle
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many turns
    #[arg(long, default_value_t = 500)]
    max_turns: u32,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BattleConfig::from_path(path)?,
        None => BattleConfig::default(),
    }
    .with_env_overrides()?;
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let records = std::fs::read_to_string(&args.records)
        .with_context(|| format!("failed to read {}", args.records.display()))?;
    let registry = RecordRegistry::from_json_str(&records)
        .with_context(|| format!("failed to parse {}", args.records.display()))?;

    let player = registry
        .by_name(&args.creature)
        .with_context(|| format!("no creature named '{}'", args.creature))?;

    let mut player_rng = match config.seed {
        Some(seed) => TurnRng::from_seed(seed.wrapping_add(1)),
        None => TurnRng::new_random(),
    };
    let player_ai = RandomMoveAi::new();

    let mut engine = BattleEngine::new(config)?;
    match &args.opponent {
        Some(name) => {
            let opponent = registry
                .by_name(name)
                .with_context(|| format!("no creature named '{}'", name))?;
            engine.start_encounter_against(&player, &opponent)?;
        }
        None => engine.start_encounter_from_source(&player, &registry)?,
    }

    let mut cursor = 0;
    while engine.snapshot().phase() == BattlePhase::InProgress {
        if engine.snapshot().turn_number() > args.max_turns {
            bail!("battle still running after {} turns", args.max_turns);
        }

        let session = engine.snapshot();
        match session.side_to_act() {
            Side::First => {
                let choice = match (session.combatant(Side::First), session.combatant(Side::Second)) {
                    (Some(me), Some(foe)) => player_ai.choose_move(me, foe, &mut player_rng),
                    _ => None,
                };
                match choice {
                    Some(index) => engine.submit_move(index)?,
                    None => engine.pass_turn()?,
                };
            }
            Side::Second => {
                engine.trigger_automated_turn()?;
            }
        }

        let log = engine.snapshot().log();
        for line in log.since(cursor) {
            println!("{}", line);
        }
        cursor = log.len();
    }

    if let Some(winner) = engine.snapshot().phase().winner() {
        tracing::info!(?winner, "battle finished");
    }
    Ok(())
}
