//! MCTS search implementation.
//!
//! Implements the core MCTS loop:
//! 1. Selection: Descend with UCT while nodes are fully expanded
//! 2. Expansion: Add one untried action as a new child
//! 3. Evaluation: Terminal outcome, or the leaf evaluator's estimate
//! 4. Backpropagation: Update statistics along the path, flipping sign per ply
//!
//! The driver checks the clock before every iteration and never interrupts
//! one that has started.

use std::time::{Duration, Instant};

use engine_core::{mover_outcome, random_action, GameState};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::evaluator::LeafEvaluator;
use crate::tree::MctsTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("No legal moves available")]
    NoLegalMoves,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<A> {
    /// Recommended action (most visited root child)
    pub action: A,

    /// Mean reward of the recommended child for the side to move at the root.
    /// 0.0 when the action is a fallback.
    pub value: f64,

    /// Iterations completed by this call
    pub iterations: u32,

    /// Total nodes in the tree after the search
    pub tree_nodes: usize,

    /// Wall-clock time spent in this call
    pub elapsed: Duration,

    /// True when no child was expanded and the action was picked at random
    pub fallback: bool,
}

/// MCTS search state.
pub struct MctsSearch<'a, S: GameState, E> {
    tree: MctsTree<S>,
    evaluator: &'a E,
    config: MctsConfig,
}

impl<'a, S, E> MctsSearch<'a, S, E>
where
    S: GameState,
    E: LeafEvaluator<S>,
{
    /// Create a new MCTS search rooted at `state`.
    ///
    /// Fails with [`SearchError::NoLegalMoves`] if `state` is terminal.
    pub fn new(state: S, evaluator: &'a E, config: MctsConfig) -> Result<Self, SearchError> {
        if state.terminal_test() {
            return Err(SearchError::NoLegalMoves);
        }

        Ok(Self {
            tree: MctsTree::new(state),
            evaluator,
            config,
        })
    }

    /// Run until the configured time budget is spent.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult<S::Action>, SearchError> {
        let deadline = Instant::now() + self.config.time_budget;
        self.run_for(deadline, rng)
    }

    /// Run iterations until `deadline`. The clock is read at the top of
    /// each iteration, so a deadline already in the past runs none.
    pub fn run_for(
        &mut self,
        deadline: Instant,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult<S::Action>, SearchError> {
        let start = Instant::now();
        let mut iterations = 0u32;

        while Instant::now() < deadline {
            self.iterate(rng);
            iterations += 1;
        }

        self.finish(iterations, start, rng)
    }

    /// Run exactly `k` iterations, ignoring the clock.
    pub fn run_iterations(
        &mut self,
        k: u32,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult<S::Action>, SearchError> {
        let start = Instant::now();
        for _ in 0..k {
            self.iterate(rng);
        }
        self.finish(k, start, rng)
    }

    /// Run a single iteration (select -> expand -> evaluate -> backpropagate).
    fn iterate(&mut self, rng: &mut ChaCha20Rng) {
        let selected = self
            .tree
            .select(self.config.exploration, self.config.epsilon);
        let node_id = self.tree.expand(selected, rng);

        let node = self.tree.get(node_id);
        let value = if node.is_terminal {
            mover_outcome(&node.state) as f64
        } else {
            self.evaluator.evaluate(&node.state, rng)
        };

        trace!(
            node = node_id.0,
            ply = node.state.ply_count(),
            terminal = node.is_terminal,
            value,
            "Iteration"
        );

        self.tree.backpropagate(node_id, value);
    }

    fn finish(
        &self,
        iterations: u32,
        start: Instant,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult<S::Action>, SearchError> {
        let stats = self.tree.stats();

        let (action, value, fallback) = match self.tree.best_child() {
            Some(child_id) => {
                let child = self.tree.get(child_id);
                match child.action {
                    Some(action) => (action, child.mean_reward(), false),
                    None => return Err(SearchError::NoLegalMoves),
                }
            }
            None => {
                let root = &self.tree.get(self.tree.root()).state;
                let action = random_action(root, rng).ok_or(SearchError::NoLegalMoves)?;
                debug!("No root child expanded, falling back to a random move");
                (action, 0.0, true)
            }
        };

        debug!(
            iterations,
            nodes = stats.total_nodes,
            root_visits = stats.root_visits,
            root_children = stats.root_children,
            max_depth = stats.max_depth,
            value,
            "MCTS search complete"
        );

        Ok(SearchResult {
            action,
            value,
            iterations,
            tree_nodes: stats.total_nodes,
            elapsed: start.elapsed(),
            fallback,
        })
    }

    /// Get the tree (for debugging/analysis).
    pub fn tree(&self) -> &MctsTree<S> {
        &self.tree
    }
}

/// Convenience function to run a time-bounded MCTS search.
pub fn run_mcts<S, E>(
    state: &S,
    evaluator: &E,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<S::Action>, SearchError>
where
    S: GameState,
    E: LeafEvaluator<S>,
{
    let mut search = MctsSearch::new(state.clone(), evaluator, config)?;
    search.run(rng)
}
