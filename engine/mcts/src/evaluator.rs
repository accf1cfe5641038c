//! Leaf evaluation for MCTS.
//!
//! A leaf evaluator estimates the value of a freshly expanded node. Every
//! evaluator answers from the point of view of the player who moved INTO the
//! evaluated position, which is the perspective the tree stores rewards in.
//!
//! Two evaluators are provided:
//! - [`RolloutEvaluator`]: plays moves chosen by a [`RolloutPolicy`] until the
//!   game ends and reports the result.
//! - [`AlphaBetaEvaluator`]: runs a shallow alpha-beta search and squashes the
//!   score into `[-1, 1]`.

use engine_core::{mover_outcome, GameState};
use minimax::{Heuristic, MinimaxSearch, MobilityHeuristic};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Picks moves during a playout.
pub trait RolloutPolicy<S: GameState> {
    /// Choose one of `actions` (never empty) in `state`.
    fn choose(&self, state: &S, actions: &[S::Action], rng: &mut ChaCha20Rng) -> S::Action;
}

/// Uniformly random playout moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformRollout;

impl<S: GameState> RolloutPolicy<S> for UniformRollout {
    #[inline]
    fn choose(&self, _state: &S, actions: &[S::Action], rng: &mut ChaCha20Rng) -> S::Action {
        actions[rng.gen_range(0..actions.len())]
    }
}

/// Trait for leaf evaluators.
pub trait LeafEvaluator<S: GameState> {
    /// Value of `state` in `[-1, 1]` for the player who just moved into it.
    fn evaluate(&self, state: &S, rng: &mut ChaCha20Rng) -> f64;
}

/// Random rollout evaluator that plays to a terminal state.
/// Returns the game outcome as the value estimate.
#[derive(Debug, Clone)]
pub struct RolloutEvaluator<P = UniformRollout> {
    pub policy: P,

    /// Maximum rollout depth to prevent runaway games. Hitting it scores 0.
    pub max_depth: u32,
}

impl Default for RolloutEvaluator {
    fn default() -> Self {
        Self {
            policy: UniformRollout,
            max_depth: 200,
        }
    }
}

impl RolloutEvaluator {
    pub fn new(max_depth: u32) -> Self {
        Self {
            policy: UniformRollout,
            max_depth,
        }
    }
}

impl<P> RolloutEvaluator<P> {
    /// Rollout evaluator driven by a custom move policy.
    pub fn with_policy(policy: P, max_depth: u32) -> Self {
        Self { policy, max_depth }
    }
}

impl<S, P> LeafEvaluator<S> for RolloutEvaluator<P>
where
    S: GameState,
    P: RolloutPolicy<S>,
{
    fn evaluate(&self, state: &S, rng: &mut ChaCha20Rng) -> f64 {
        let mover = state.player().opponent();
        let mut current = state.clone();

        for _ in 0..self.max_depth {
            if current.terminal_test() {
                return current.utility(mover) as f64;
            }
            let actions = current.actions();
            let action = self.policy.choose(&current, &actions, rng);
            current = current.result(&action);
        }

        if current.terminal_test() {
            current.utility(mover) as f64
        } else {
            0.0
        }
    }
}

/// Shallow alpha-beta evaluation of a leaf.
///
/// The search score is for the side to move, so it is negated before being
/// squashed with `tanh(score / scale)`. Proven results saturate at ±1.
#[derive(Debug, Clone)]
pub struct AlphaBetaEvaluator<H = MobilityHeuristic> {
    pub heuristic: H,
    pub depth: u32,
    pub scale: f32,
}

impl Default for AlphaBetaEvaluator {
    fn default() -> Self {
        Self::new(2)
    }
}

impl AlphaBetaEvaluator {
    pub fn new(depth: u32) -> Self {
        Self {
            heuristic: MobilityHeuristic,
            depth,
            scale: 4.0,
        }
    }
}

impl<S, H> LeafEvaluator<S> for AlphaBetaEvaluator<H>
where
    S: GameState,
    H: Heuristic<S> + Clone,
{
    fn evaluate(&self, state: &S, _rng: &mut ChaCha20Rng) -> f64 {
        if state.terminal_test() {
            return mover_outcome(state) as f64;
        }

        MinimaxSearch::new(self.heuristic.clone())
            .alpha_beta(state, self.depth)
            .map_or(0.0, |outcome| (-outcome.score / self.scale).tanh() as f64)
    }
}
