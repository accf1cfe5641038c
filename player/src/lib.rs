//! Isolation player.
//!
//! [`CustomPlayer`] picks one legal move per call under a wall-clock budget:
//! random during the opening plies, then MCTS (the default) or an iteratively
//! deepened exact search. [`selfplay`] pits two players against each other.

pub mod agent;
pub mod selfplay;

pub use agent::{CustomPlayer, MoveContext, PlayerError, PlayerSettings};
pub use engine_config::{LeafEvaluatorKind, Strategy};
pub use selfplay::{play_game, run_match, GameRecord, MatchSummary};
