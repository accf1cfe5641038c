//! Iterative deepening under a wall-clock deadline.
//!
//! Depth 1 always runs to completion with no deadline attached, so a legal
//! move is available however tight the budget. Each deeper iteration either
//! completes and replaces the answer, or hits the deadline and is dropped.

use std::time::Instant;

use engine_core::GameState;
use tracing::debug;

use crate::heuristic::{Heuristic, WIN_SCORE};
use crate::search::{Algorithm, MinimaxError, MinimaxSearch, SearchOutcome};

impl<H> MinimaxSearch<H> {
    /// Deepen from 1 to `max_depth` plies until `deadline`, returning the
    /// deepest completed result. `nodes` in the result covers every iteration.
    pub fn iterative_deepening<S>(
        &mut self,
        state: &S,
        max_depth: u32,
        deadline: Instant,
        algorithm: Algorithm,
    ) -> Result<SearchOutcome<S::Action>, MinimaxError>
    where
        S: GameState,
        H: Heuristic<S>,
    {
        let mut best: Option<SearchOutcome<S::Action>> = None;
        let mut total_nodes = 0u64;

        for depth in 1..=max_depth.max(1) {
            if depth > 1 && Instant::now() >= deadline {
                break;
            }
            self.set_deadline((depth > 1).then_some(deadline));

            match self.search(state, depth, algorithm) {
                Ok(outcome) => {
                    total_nodes += outcome.nodes;
                    let decided = outcome.score.abs() >= WIN_SCORE;
                    best = Some(outcome);
                    if decided {
                        break;
                    }
                }
                Err(MinimaxError::DeadlineExceeded) => {
                    debug!(depth, "Iteration abandoned at deadline");
                    break;
                }
                Err(e) => {
                    self.set_deadline(None);
                    return Err(e);
                }
            }
        }
        self.set_deadline(None);

        let mut outcome = best.ok_or(MinimaxError::NoLegalMoves)?;
        outcome.nodes = total_nodes;
        Ok(outcome)
    }
}
