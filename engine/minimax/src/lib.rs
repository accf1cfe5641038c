//! Exact adversarial search for engine-core games.
//!
//! Three fixed-depth searches share one root driver and differ only in how
//! they treat the `[alpha, beta]` window:
//!
//! - **Minimax**: no pruning, the reference answer
//! - **Alpha-beta**: prunes subtrees that cannot change the decision
//! - **PVS**: probes every non-first sibling with a null window and
//!   re-searches only when the probe says it could raise the bound
//!
//! At depth 0 non-terminal positions are scored by a [`Heuristic`]
//! (mobility by default). Terminal positions score `utility * WIN_SCORE`, so
//! any proven result dominates every heuristic value.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameState;
//! use games_isolation::Isolation;
//! use minimax::{MinimaxSearch, MobilityHeuristic};
//!
//! let state = Isolation::new().result(&games_isolation::Cell(48)).result(&games_isolation::Cell(0));
//! let mut search = MinimaxSearch::new(MobilityHeuristic);
//! let outcome = search.alpha_beta(&state, 3).unwrap();
//! assert!(state.actions().contains(&outcome.action));
//! ```

pub mod deepening;
pub mod heuristic;
pub mod search;

pub use heuristic::{Heuristic, MobilityHeuristic, WIN_SCORE};
pub use search::{Algorithm, MinimaxError, MinimaxSearch, SearchOutcome, NULL_WINDOW};
