//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the search crates and the `player` binary.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`ISOLATION_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! ISOLATION_<SECTION>_<KEY>=value
//!
//! Examples:
//!     ISOLATION_COMMON_LOG_LEVEL=debug
//!     ISOLATION_COMMON_SEED=42
//!     ISOLATION_PLAYER_STRATEGY=pvs
//!     ISOLATION_PLAYER_TIME_BUDGET_MS=50
//!     ISOLATION_MCTS_EXPLORATION=0.8
//! ```

mod defaults;
mod kinds;
mod loader;
mod structs;

pub use defaults::*;
pub use kinds::{ConfigError, LeafEvaluatorKind, Strategy};
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
