//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use crate::kinds::{ConfigError, LeafEvaluatorKind, Strategy};
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_strategy() -> String {
    defaults::strategy().into()
}
fn d_opening_plies() -> u32 {
    defaults::opening_plies()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_exploration() -> f64 {
    defaults::exploration()
}
fn d_epsilon() -> f64 {
    defaults::epsilon()
}
fn d_max_rollout_depth() -> u32 {
    defaults::max_rollout_depth()
}
fn d_leaf_evaluator() -> String {
    defaults::leaf_evaluator().into()
}
fn d_eval_depth() -> u32 {
    defaults::eval_depth()
}
fn d_depth() -> u32 {
    defaults::depth()
}
fn d_max_depth() -> u32 {
    defaults::max_depth()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
    #[serde(default)]
    pub minimax: MinimaxConfig,
}

/// Common configuration shared by all components
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
    /// RNG seed. 0 means seed from entropy.
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
            seed: defaults::seed(),
        }
    }
}

/// Move selection configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlayerConfig {
    #[serde(default = "d_strategy")]
    pub strategy: String,
    /// Plies played at random before any search runs
    #[serde(default = "d_opening_plies")]
    pub opening_plies: u32,
    /// Internal deadline per move, in milliseconds
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
}

impl PlayerConfig {
    /// Parse the configured strategy name.
    pub fn strategy(&self) -> Result<Strategy, ConfigError> {
        self.strategy.parse()
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            strategy: defaults::strategy().into(),
            opening_plies: defaults::opening_plies(),
            time_budget_ms: defaults::time_budget_ms(),
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_exploration")]
    pub exploration: f64,
    #[serde(default = "d_epsilon")]
    pub epsilon: f64,
    #[serde(default = "d_max_rollout_depth")]
    pub max_rollout_depth: u32,
    /// "rollout" or "alphabeta"
    #[serde(default = "d_leaf_evaluator")]
    pub leaf_evaluator: String,
    /// Search depth of the alpha-beta leaf evaluator
    #[serde(default = "d_eval_depth")]
    pub eval_depth: u32,
}

impl MctsConfig {
    /// Parse the configured leaf evaluator name.
    pub fn leaf_evaluator(&self) -> Result<LeafEvaluatorKind, ConfigError> {
        self.leaf_evaluator.parse()
    }
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration: defaults::exploration(),
            epsilon: defaults::epsilon(),
            max_rollout_depth: defaults::max_rollout_depth(),
            leaf_evaluator: defaults::leaf_evaluator().into(),
            eval_depth: defaults::eval_depth(),
        }
    }
}

/// Exact search configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Fixed depth for plain minimax
    #[serde(default = "d_depth")]
    pub depth: u32,
    /// Deepest iteration for time-bounded alpha-beta and PVS
    #[serde(default = "d_max_depth")]
    pub max_depth: u32,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            depth: defaults::depth(),
            max_depth: defaults::max_depth(),
        }
    }
}
