//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time, so the binary and the
//! libraries always agree on defaults.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    player: PlayerDefaults,
    mcts: MctsDefaults,
    minimax: MinimaxDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct PlayerDefaults {
    strategy: String,
    opening_plies: u32,
    time_budget_ms: u64,
}

#[derive(Debug, Deserialize)]
struct MctsDefaults {
    exploration: f64,
    epsilon: f64,
    max_rollout_depth: u32,
    leaf_evaluator: String,
    eval_depth: u32,
}

#[derive(Debug, Deserialize)]
struct MinimaxDefaults {
    depth: u32,
    max_depth: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}
pub fn seed() -> u64 {
    DEFAULTS.common.seed
}

// Player
pub fn strategy() -> &'static str {
    &DEFAULTS.player.strategy
}
pub fn opening_plies() -> u32 {
    DEFAULTS.player.opening_plies
}
pub fn time_budget_ms() -> u64 {
    DEFAULTS.player.time_budget_ms
}

// MCTS
pub fn exploration() -> f64 {
    DEFAULTS.mcts.exploration
}
pub fn epsilon() -> f64 {
    DEFAULTS.mcts.epsilon
}
pub fn max_rollout_depth() -> u32 {
    DEFAULTS.mcts.max_rollout_depth
}
pub fn leaf_evaluator() -> &'static str {
    &DEFAULTS.mcts.leaf_evaluator
}
pub fn eval_depth() -> u32 {
    DEFAULTS.mcts.eval_depth
}

// Minimax
pub fn depth() -> u32 {
    DEFAULTS.minimax.depth
}
pub fn max_depth() -> u32 {
    DEFAULTS.minimax.max_depth
}
