//! Time-bounded Monte Carlo Tree Search with UCT selection.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` [`GameState`](engine_core::GameState)
//! trait.
//!
//! # Overview
//!
//! Each iteration consists of four phases:
//!
//! 1. **Selection**: Descend from the root with UCT while every action of the
//!    current node has been tried
//! 2. **Expansion**: Pick one untried action at random and add its child
//! 3. **Evaluation**: Score the new node with a [`LeafEvaluator`] (random
//!    playout or shallow alpha-beta), or with its outcome if terminal
//! 4. **Backpropagation**: Walk back to the root, negating the reward at each
//!    level since turns alternate
//!
//! Iterations run until a wall-clock deadline. The recommended move is the
//! most visited root child.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameState;
//! use games_isolation::{Cell, Isolation};
//! use mcts::{run_mcts, MctsConfig, RolloutEvaluator};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let state = Isolation::new().result(&Cell(48)).result(&Cell(0));
//! let evaluator = RolloutEvaluator::default();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let result = run_mcts(&state, &evaluator, MctsConfig::default(), &mut rng).unwrap();
//! assert!(state.actions().contains(&result.action));
//! ```
//!
//! # Architecture
//!
//! ```text
//! MctsSearch
//!   ├── MctsTree (arena of MctsNode, indexed by NodeId)
//!   ├── LeafEvaluator (RolloutEvaluator / AlphaBetaEvaluator)
//!   └── MctsConfig (exploration, epsilon, time budget)
//! ```

pub mod config;
pub mod evaluator;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use evaluator::{
    AlphaBetaEvaluator, LeafEvaluator, RolloutEvaluator, RolloutPolicy, UniformRollout,
};
pub use node::{MctsNode, NodeId};
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
