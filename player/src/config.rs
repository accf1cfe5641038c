//! Configuration for the player binary
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig, Strategy};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
pub static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_strategy() -> String {
    CENTRAL_CONFIG.player.strategy.clone()
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.common.seed
}

fn default_time_budget_ms() -> u64 {
    CENTRAL_CONFIG.player.time_budget_ms
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "player")]
#[command(about = "Isolation player - self-play between two search strategies")]
#[command(
    long_about = "Plays games of knight-move Isolation between two players and logs the results.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    pub games: u32,

    /// Strategy of the player that moves first (mcts, alphabeta, pvs, minimax)
    #[arg(long, default_value_t = default_strategy())]
    pub first: String,

    /// Strategy of the player that moves second
    #[arg(long, default_value_t = default_strategy())]
    pub second: String,

    /// RNG seed (0 for entropy)
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Internal deadline per move in milliseconds
    #[arg(long, default_value_t = default_time_budget_ms())]
    pub time_budget_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.games == 0 {
            return Err(anyhow!("games must be greater than 0"));
        }

        if self.time_budget_ms == 0 {
            return Err(anyhow!("time_budget_ms must be greater than 0"));
        }

        self.first_strategy()?;
        self.second_strategy()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn first_strategy(&self) -> Result<Strategy> {
        Ok(self.first.parse::<Strategy>()?)
    }

    pub fn second_strategy(&self) -> Result<Strategy> {
        Ok(self.second.parse::<Strategy>()?)
    }

    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }
}
