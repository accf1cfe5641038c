//! Fixed-depth minimax, alpha-beta and principal variation search.
//!
//! Max and min plies are decided by comparing the side to move against the
//! root player, so the search never assumes a particular turn order. Every
//! window search is fail-soft: a result at or below `alpha` is an upper bound
//! on the true value, a result at or above `beta` a lower bound, anything in
//! between is exact. PVS relies on that to trust its null-window probes.

use std::time::Instant;

use engine_core::{GameState, PlayerId};
use thiserror::Error;
use tracing::trace;

use crate::heuristic::{terminal_score, Heuristic};

/// Width of the PVS probe window. Heuristic and terminal scores are whole
/// numbers, so a window of one separates "no better" from "better".
pub const NULL_WINDOW: f32 = 1.0;

/// Errors that can occur during exact search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MinimaxError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Search deadline expired before the iteration completed")]
    DeadlineExceeded,
}

/// Which window discipline the root driver applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
    Pvs,
}

/// Result of one exact search.
#[derive(Debug, Clone)]
pub struct SearchOutcome<A> {
    /// Best action at the root (first one wins ties)
    pub action: A,

    /// Backed-up score of `action` from the root player's perspective
    pub score: f32,

    /// Positions visited, root included
    pub nodes: u64,

    /// Depth the score was computed at
    pub depth: u32,
}

/// Exact search state.
#[derive(Debug)]
pub struct MinimaxSearch<H> {
    heuristic: H,
    nodes: u64,
    deadline: Option<Instant>,
    stopped: bool,
}

impl<H> MinimaxSearch<H> {
    /// Create a search that scores depth-limited leaves with `heuristic`.
    pub fn new(heuristic: H) -> Self {
        Self {
            heuristic,
            nodes: 0,
            deadline: None,
            stopped: false,
        }
    }

    pub(crate) fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
        self.stopped = false;
    }

    /// Deadline check, sampled every 64 nodes.
    #[inline]
    fn out_of_time(&mut self) -> bool {
        if self.stopped {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if self.nodes & 63 == 0 && Instant::now() >= deadline {
                self.stopped = true;
            }
        }
        self.stopped
    }
}

impl<H> MinimaxSearch<H> {
    /// Plain minimax to `depth` plies. Reference result for the pruned searches.
    pub fn minimax<S>(&mut self, state: &S, depth: u32) -> Result<SearchOutcome<S::Action>, MinimaxError>
    where
        S: GameState,
        H: Heuristic<S>,
    {
        self.search(state, depth, Algorithm::Minimax)
    }

    /// Alpha-beta to `depth` plies. Chooses the same action as [`Self::minimax`].
    pub fn alpha_beta<S>(&mut self, state: &S, depth: u32) -> Result<SearchOutcome<S::Action>, MinimaxError>
    where
        S: GameState,
        H: Heuristic<S>,
    {
        self.search(state, depth, Algorithm::AlphaBeta)
    }

    /// Principal variation search to `depth` plies.
    pub fn pvs<S>(&mut self, state: &S, depth: u32) -> Result<SearchOutcome<S::Action>, MinimaxError>
    where
        S: GameState,
        H: Heuristic<S>,
    {
        self.search(state, depth, Algorithm::Pvs)
    }

    /// Run `algorithm` from `state` to `depth` plies (at least one).
    ///
    /// Root children are searched in `actions()` order; a later child replaces
    /// the incumbent only with a strictly greater score.
    pub fn search<S>(
        &mut self,
        state: &S,
        depth: u32,
        algorithm: Algorithm,
    ) -> Result<SearchOutcome<S::Action>, MinimaxError>
    where
        S: GameState,
        H: Heuristic<S>,
    {
        let actions = state.actions();
        if actions.is_empty() {
            return Err(MinimaxError::NoLegalMoves);
        }

        let depth = depth.max(1);
        let perspective = state.player();
        self.nodes = 1;

        let mut alpha = f32::NEG_INFINITY;
        let beta = f32::INFINITY;
        let mut best: Option<(S::Action, f32)> = None;

        for (i, action) in actions.iter().enumerate() {
            let child = state.result(action);
            let value = match algorithm {
                Algorithm::Minimax => self.minimax_value(&child, depth - 1, perspective),
                Algorithm::AlphaBeta => {
                    self.alpha_beta_value(&child, depth - 1, alpha, beta, perspective)
                }
                Algorithm::Pvs if i == 0 => self.pvs_value(&child, depth - 1, alpha, beta, perspective),
                Algorithm::Pvs => {
                    let probe =
                        self.pvs_value(&child, depth - 1, alpha, alpha + NULL_WINDOW, perspective);
                    if probe > alpha {
                        self.pvs_value(&child, depth - 1, alpha, beta, perspective)
                    } else {
                        probe
                    }
                }
            };

            if self.stopped {
                return Err(MinimaxError::DeadlineExceeded);
            }

            if best.map_or(true, |(_, score)| value > score) {
                best = Some((*action, value));
            }
            alpha = alpha.max(value);
        }

        let (action, score) = best.ok_or(MinimaxError::NoLegalMoves)?;

        trace!(
            ?algorithm,
            depth,
            nodes = self.nodes,
            score,
            ?action,
            "Exact search complete"
        );

        Ok(SearchOutcome {
            action,
            score,
            nodes: self.nodes,
            depth,
        })
    }

    fn leaf_value<S>(&self, state: &S, depth: u32, perspective: PlayerId) -> Option<f32>
    where
        S: GameState,
        H: Heuristic<S>,
    {
        if state.terminal_test() {
            Some(terminal_score(state, perspective))
        } else if depth == 0 {
            Some(self.heuristic.evaluate(state, perspective))
        } else {
            None
        }
    }

    fn minimax_value<S>(&mut self, state: &S, depth: u32, perspective: PlayerId) -> f32
    where
        S: GameState,
        H: Heuristic<S>,
    {
        self.nodes += 1;
        if self.out_of_time() {
            return 0.0;
        }
        if let Some(value) = self.leaf_value(state, depth, perspective) {
            return value;
        }

        let maximizing = state.player() == perspective;
        let children = state
            .actions()
            .into_iter()
            .map(|a| self.minimax_value(&state.result(&a), depth - 1, perspective));

        if maximizing {
            children.fold(f32::NEG_INFINITY, f32::max)
        } else {
            children.fold(f32::INFINITY, f32::min)
        }
    }

    fn alpha_beta_value<S>(
        &mut self,
        state: &S,
        depth: u32,
        mut alpha: f32,
        mut beta: f32,
        perspective: PlayerId,
    ) -> f32
    where
        S: GameState,
        H: Heuristic<S>,
    {
        self.nodes += 1;
        if self.out_of_time() {
            return 0.0;
        }
        if let Some(value) = self.leaf_value(state, depth, perspective) {
            return value;
        }

        if state.player() == perspective {
            let mut value = f32::NEG_INFINITY;
            for action in state.actions() {
                let child = state.result(&action);
                value = value.max(self.alpha_beta_value(&child, depth - 1, alpha, beta, perspective));
                if value >= beta {
                    return value;
                }
                alpha = alpha.max(value);
            }
            value
        } else {
            let mut value = f32::INFINITY;
            for action in state.actions() {
                let child = state.result(&action);
                value = value.min(self.alpha_beta_value(&child, depth - 1, alpha, beta, perspective));
                if value <= alpha {
                    return value;
                }
                beta = beta.min(value);
            }
            value
        }
    }

    fn pvs_value<S>(
        &mut self,
        state: &S,
        depth: u32,
        mut alpha: f32,
        mut beta: f32,
        perspective: PlayerId,
    ) -> f32
    where
        S: GameState,
        H: Heuristic<S>,
    {
        self.nodes += 1;
        if self.out_of_time() {
            return 0.0;
        }
        if let Some(value) = self.leaf_value(state, depth, perspective) {
            return value;
        }

        let maximizing = state.player() == perspective;
        let mut value = if maximizing {
            f32::NEG_INFINITY
        } else {
            f32::INFINITY
        };

        for (i, action) in state.actions().iter().enumerate() {
            let child = state.result(action);
            let score = if i == 0 {
                self.pvs_value(&child, depth - 1, alpha, beta, perspective)
            } else if maximizing {
                // Can this sibling beat alpha at all?
                let probe = self.pvs_value(&child, depth - 1, alpha, alpha + NULL_WINDOW, perspective);
                if probe > alpha && probe < beta {
                    self.pvs_value(&child, depth - 1, alpha, beta, perspective)
                } else {
                    probe
                }
            } else {
                // Can this sibling drop below beta at all?
                let probe = self.pvs_value(&child, depth - 1, beta - NULL_WINDOW, beta, perspective);
                if probe < beta && probe > alpha {
                    self.pvs_value(&child, depth - 1, alpha, beta, perspective)
                } else {
                    probe
                }
            };

            if maximizing {
                value = value.max(score);
                if value >= beta {
                    return value;
                }
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                if value <= alpha {
                    return value;
                }
                beta = beta.min(value);
            }
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::WIN_SCORE;
    use games_isolation::{Cell, Isolation};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use std::rc::Rc;

    /// One node of an explicit game tree.
    #[derive(Debug)]
    struct Spec {
        children: Vec<usize>,
        /// Terminal payoff for the first player
        payoff: f32,
        /// Heuristic value for the first player
        estimate: f32,
    }

    /// Game played on an explicit tree; actions are child node ids.
    #[derive(Debug, Clone)]
    struct TreeGame {
        nodes: Rc<Vec<Spec>>,
        at: usize,
        ply: u32,
    }

    impl TreeGame {
        fn new(nodes: Vec<Spec>) -> Self {
            Self {
                nodes: Rc::new(nodes),
                at: 0,
                ply: 0,
            }
        }
    }

    impl GameState for TreeGame {
        type Action = usize;

        fn actions(&self) -> Vec<usize> {
            self.nodes[self.at].children.clone()
        }

        fn result(&self, action: &usize) -> Self {
            Self {
                nodes: Rc::clone(&self.nodes),
                at: *action,
                ply: self.ply + 1,
            }
        }

        fn terminal_test(&self) -> bool {
            self.nodes[self.at].children.is_empty()
        }

        fn utility(&self, player: PlayerId) -> f32 {
            if !self.terminal_test() {
                return 0.0;
            }
            let payoff = self.nodes[self.at].payoff;
            if player == PlayerId::FIRST {
                payoff
            } else {
                -payoff
            }
        }

        fn player(&self) -> PlayerId {
            PlayerId((self.ply % 2) as u8)
        }

        fn ply_count(&self) -> u32 {
            self.ply
        }
    }

    fn estimate(state: &TreeGame, perspective: PlayerId) -> f32 {
        let value = state.nodes[state.at].estimate;
        if perspective == PlayerId::FIRST {
            value
        } else {
            -value
        }
    }

    fn leaf(payoff: f32) -> Spec {
        Spec {
            children: vec![],
            payoff,
            estimate: 0.0,
        }
    }

    fn inner(children: Vec<usize>, estimate: f32) -> Spec {
        Spec {
            children,
            payoff: 0.0,
            estimate,
        }
    }

    /// Random tree where every internal node has `branching` children.
    fn random_tree(rng: &mut ChaCha20Rng, depth: u32, branching: usize) -> Vec<Spec> {
        fn build(
            nodes: &mut Vec<Spec>,
            rng: &mut ChaCha20Rng,
            depth: u32,
            branching: usize,
        ) -> usize {
            let id = nodes.len();
            // Some branches end early so terminal scores mix with estimates
            if depth == 0 || (depth < 3 && rng.gen_bool(0.15)) {
                nodes.push(leaf(rng.gen_range(-1..=1) as f32));
                return id;
            }
            nodes.push(inner(vec![], rng.gen_range(-8..=8) as f32));
            let children = (0..branching)
                .map(|_| build(nodes, rng, depth - 1, branching))
                .collect();
            nodes[id].children = children;
            id
        }

        let mut nodes = Vec::new();
        build(&mut nodes, rng, depth, branching);
        nodes
    }

    /// Root (P1) with three moves: a quiet line, an immediate win, another quiet line.
    fn win_in_one() -> TreeGame {
        TreeGame::new(vec![
            inner(vec![1, 4, 5], 0.0), // 0: root
            inner(vec![2, 3], 2.0),    // 1: quiet
            leaf(-1.0),                // 2
            leaf(0.0),                 // 3
            leaf(1.0),                 // 4: P2 stuck, P1 wins
            inner(vec![6], 5.0),       // 5: quiet, looks good
            leaf(-1.0),                // 6
        ])
    }

    #[test]
    fn test_alpha_beta_takes_immediate_win() {
        let game = win_in_one();
        for depth in 1..=3 {
            let mut search = MinimaxSearch::new(estimate);
            let outcome = search.alpha_beta(&game, depth).unwrap();
            assert_eq!(outcome.action, 4, "depth {depth}");
            assert_eq!(outcome.score, WIN_SCORE);
        }
    }

    #[test]
    fn test_depth_one_uses_heuristic_for_quiet_moves() {
        let game = win_in_one();
        let mut search = MinimaxSearch::new(estimate);
        let outcome = search.minimax(&game, 1).unwrap();
        // Win still beats the 5.0 estimate of node 5
        assert_eq!(outcome.action, 4);
        assert_eq!(outcome.depth, 1);
    }

    #[test]
    fn test_minimax_backs_up_min_value() {
        // Root -> A: P2 chooses between a P1 win and a P1 loss
        //      -> B: both replies draw
        let game = TreeGame::new(vec![
            inner(vec![1, 4], 0.0),
            inner(vec![2, 3], 0.0),
            leaf(1.0),
            leaf(-1.0),
            inner(vec![5, 6], 0.0),
            leaf(0.0),
            leaf(0.0),
        ]);

        let outcome = MinimaxSearch::new(estimate).minimax(&game, 2).unwrap();
        assert_eq!(outcome.action, 4);
        assert_eq!(outcome.score, 0.0);

        // One ply short the heuristic cannot see P2's refutation
        let shallow = MinimaxSearch::new(estimate).minimax(&game, 1).unwrap();
        assert_eq!(shallow.action, 1);
    }

    #[test]
    fn test_pruning_never_changes_the_decision() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        for trial in 0..40 {
            let game = TreeGame::new(random_tree(&mut rng, 5, 3));
            for depth in 1..=5 {
                let plain = MinimaxSearch::new(estimate).minimax(&game, depth).unwrap();
                let pruned = MinimaxSearch::new(estimate).alpha_beta(&game, depth).unwrap();
                let pvs = MinimaxSearch::new(estimate).pvs(&game, depth).unwrap();

                assert_eq!(plain.action, pruned.action, "trial {trial} depth {depth}");
                assert_eq!(plain.score, pruned.score, "trial {trial} depth {depth}");
                assert_eq!(plain.action, pvs.action, "trial {trial} depth {depth}");
                assert_eq!(plain.score, pvs.score, "trial {trial} depth {depth}");
                assert!(pruned.nodes <= plain.nodes);
            }
        }
    }

    #[test]
    fn test_alpha_beta_prunes_on_isolation() {
        let state = Isolation::new()
            .result(&Cell::at(5, 4).unwrap())
            .result(&Cell::at(3, 3).unwrap());

        let plain = MinimaxSearch::new(crate::MobilityHeuristic)
            .minimax(&state, 3)
            .unwrap();
        let pruned = MinimaxSearch::new(crate::MobilityHeuristic)
            .alpha_beta(&state, 3)
            .unwrap();

        assert_eq!(plain.action, pruned.action);
        assert_eq!(plain.score, pruned.score);
        assert!(pruned.nodes < plain.nodes);
        assert!(state.actions().contains(&pruned.action));
    }

    #[test]
    fn test_terminal_root_is_an_error() {
        let game = TreeGame::new(vec![leaf(1.0)]);
        let mut search = MinimaxSearch::new(estimate);
        assert_eq!(
            search.alpha_beta(&game, 3).unwrap_err(),
            MinimaxError::NoLegalMoves
        );
    }

    #[test]
    fn test_depth_zero_is_clamped_to_one() {
        let game = win_in_one();
        let mut search = MinimaxSearch::new(estimate);
        let outcome = search.alpha_beta(&game, 0).unwrap();
        assert_eq!(outcome.depth, 1);
        assert_eq!(outcome.action, 4);
    }

    #[test]
    fn test_first_action_wins_ties() {
        let game = TreeGame::new(vec![
            inner(vec![1, 2, 3], 0.0),
            inner(vec![4], 1.0),
            inner(vec![5], 1.0),
            inner(vec![6], 1.0),
            leaf(0.0),
            leaf(0.0),
            leaf(0.0),
        ]);
        let outcome = MinimaxSearch::new(estimate).alpha_beta(&game, 1).unwrap();
        assert_eq!(outcome.action, 1);
    }
}
