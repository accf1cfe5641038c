//! Player - self-play runner for knight-move Isolation
//!
//! Plays a series of games between two configured players:
//! 1. Loads config.toml (plus env overrides) and applies CLI flags
//! 2. Builds a `CustomPlayer` per seat
//! 3. Plays the games and logs each result and the final tally

use anyhow::Result;
use clap::Parser;
use games_isolation::Isolation;
use player::{run_match, PlayerSettings};
use tracing::info;

mod config;

use crate::config::{Config, CENTRAL_CONFIG};

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let base = PlayerSettings::from_central(&CENTRAL_CONFIG)?.with_time_budget(config.time_budget());
    let first = base.clone().with_strategy(config.first_strategy()?);
    let second = base.with_strategy(config.second_strategy()?);

    info!(
        games = config.games,
        first = %first.strategy,
        second = %second.strategy,
        time_budget_ms = config.time_budget_ms,
        seed = config.seed,
        "Starting match"
    );

    let summary = run_match::<Isolation>(&first, &second, config.games, config.seed)?;

    info!(
        games = summary.games,
        first_wins = summary.wins[0],
        second_wins = summary.wins[1],
        draws = summary.draws,
        "Match complete"
    );

    Ok(())
}
