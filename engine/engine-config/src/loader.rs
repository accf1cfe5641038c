//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::CentralConfig;
use std::path::Path;
use tracing::{debug, info, warn};

/// Standard locations to search for config.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "config.toml",    // Current directory
    "../config.toml", // Parent directory (when running from subdirectory)
];

/// Load the central configuration from config.toml.
///
/// Searches for config.toml in the following order:
/// 1. Path specified by ISOLATION_CONFIG environment variable
/// 2. Current directory (config.toml)
/// 3. Parent directory (../config.toml)
///
/// After loading, environment variable overrides are applied.
pub fn load_config() -> CentralConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("ISOLATION_CONFIG") {
        let path = Path::new(&path);
        if path.exists() {
            info!("Loading config from ISOLATION_CONFIG: {}", path.display());
            return load_from_path(path);
        }
        warn!(
            "ISOLATION_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(path);
        }
    }

    // Fall back to defaults
    debug!("No config.toml found, using built-in defaults");
    apply_env_overrides(CentralConfig::default())
}

/// Load configuration from a specific path.
///
/// Unreadable or malformed files fall back to the built-in defaults with a
/// warning; environment overrides are applied either way.
pub fn load_from_path(path: &Path) -> CentralConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(CentralConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(CentralConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (i32, u64, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: ISOLATION_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: CentralConfig) -> CentralConfig {
    // Common
    env_override!(config, common.log_level, "ISOLATION_COMMON_LOG_LEVEL");
    env_override!(config, common.seed, "ISOLATION_COMMON_SEED", parse);

    // Player
    env_override!(config, player.strategy, "ISOLATION_PLAYER_STRATEGY");
    env_override!(
        config,
        player.opening_plies,
        "ISOLATION_PLAYER_OPENING_PLIES",
        parse
    );
    env_override!(
        config,
        player.time_budget_ms,
        "ISOLATION_PLAYER_TIME_BUDGET_MS",
        parse
    );

    // MCTS
    env_override!(
        config,
        mcts.exploration,
        "ISOLATION_MCTS_EXPLORATION",
        parse
    );
    env_override!(config, mcts.epsilon, "ISOLATION_MCTS_EPSILON", parse);
    env_override!(
        config,
        mcts.max_rollout_depth,
        "ISOLATION_MCTS_MAX_ROLLOUT_DEPTH",
        parse
    );
    env_override!(
        config,
        mcts.leaf_evaluator,
        "ISOLATION_MCTS_LEAF_EVALUATOR"
    );
    env_override!(
        config,
        mcts.eval_depth,
        "ISOLATION_MCTS_EVAL_DEPTH",
        parse
    );

    // Minimax
    env_override!(config, minimax.depth, "ISOLATION_MINIMAX_DEPTH", parse);
    env_override!(
        config,
        minimax.max_depth,
        "ISOLATION_MINIMAX_MAX_DEPTH",
        parse
    );

    config
}
