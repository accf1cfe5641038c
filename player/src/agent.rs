//! Move selection for a single seat.
//!
//! `CustomPlayer::get_action` is the entry point a match runner calls once per
//! turn. It always answers with a legal action for any non-terminal state:
//! random during the opening, then whichever search the settings select,
//! bounded by the per-move time budget.

use std::time::{Duration, Instant};

use engine_config::{CentralConfig, ConfigError, LeafEvaluatorKind, Strategy};
use engine_core::{random_action, Mobility};
use mcts::{
    AlphaBetaEvaluator, LeafEvaluator, MctsConfig, MctsSearch, RolloutEvaluator, SearchError,
    SearchResult,
};
use minimax::{Algorithm, MinimaxError, MinimaxSearch, MobilityHeuristic};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by [`CustomPlayer::get_action`].
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("MCTS search failed: {0}")]
    Mcts(#[from] SearchError),

    #[error("Exact search failed: {0}")]
    Minimax(#[from] MinimaxError),
}

/// Everything a player needs to choose moves.
#[derive(Debug, Clone)]
pub struct PlayerSettings {
    pub strategy: Strategy,

    /// Plies played uniformly at random before any search runs
    pub opening_plies: u32,

    /// Internal deadline per move
    pub time_budget: Duration,

    /// UCT parameters (its time budget mirrors `time_budget`)
    pub mcts: MctsConfig,

    pub leaf_evaluator: LeafEvaluatorKind,

    /// Depth of the alpha-beta leaf evaluator
    pub eval_depth: u32,

    /// Deepest iteration for the plain minimax strategy
    pub minimax_depth: u32,

    /// Deepest iteration for the alpha-beta and PVS strategies
    pub max_depth: u32,

    /// RNG seed; 0 seeds from entropy
    pub seed: u64,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            opening_plies: 2,
            time_budget: Duration::from_millis(15),
            mcts: MctsConfig::default(),
            leaf_evaluator: LeafEvaluatorKind::default(),
            eval_depth: 2,
            minimax_depth: 3,
            max_depth: 8,
            seed: 0,
        }
    }
}

impl PlayerSettings {
    /// Build settings from the central configuration.
    pub fn from_central(config: &CentralConfig) -> Result<Self, ConfigError> {
        let time_budget = Duration::from_millis(config.player.time_budget_ms);
        Ok(Self {
            strategy: config.player.strategy()?,
            opening_plies: config.player.opening_plies,
            time_budget,
            mcts: MctsConfig::default()
                .with_exploration(config.mcts.exploration)
                .with_epsilon(config.mcts.epsilon)
                .with_max_rollout_depth(config.mcts.max_rollout_depth)
                .with_time_budget(time_budget),
            leaf_evaluator: config.mcts.leaf_evaluator()?,
            eval_depth: config.mcts.eval_depth,
            minimax_depth: config.minimax.depth,
            max_depth: config.minimax.max_depth,
            seed: config.common.seed,
        })
    }

    /// Builder pattern: set strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder pattern: set per-move time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self.mcts.time_budget = budget;
        self
    }

    /// Builder pattern: set RNG seed (0 = entropy).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder pattern: set the number of random opening plies.
    pub fn with_opening_plies(mut self, plies: u32) -> Self {
        self.opening_plies = plies;
        self
    }

    /// Builder pattern: set MCTS leaf evaluator.
    pub fn with_leaf_evaluator(mut self, kind: LeafEvaluatorKind) -> Self {
        self.leaf_evaluator = kind;
        self
    }
}

/// Summary of the previous move, kept for the next turn.
///
/// Search never reads it; it exists for logging and inspection.
#[derive(Debug, Clone)]
pub struct MoveContext<A> {
    /// Ply at which the move was chosen
    pub ply: u32,

    /// Search used, or None for a random opening move
    pub strategy: Option<Strategy>,

    pub action: A,

    /// MCTS iterations or exact-search nodes spent on the move
    pub work: u64,

    /// Deepest completed exact-search iteration
    pub depth: Option<u32>,

    /// True when MCTS produced no child and the move was random
    pub fallback: bool,

    pub elapsed: Duration,
}

/// Time-bounded player for any game exposing piece mobility.
pub struct CustomPlayer<S: Mobility> {
    settings: PlayerSettings,
    rng: ChaCha20Rng,
    context: Option<MoveContext<S::Action>>,
}

impl<S: Mobility> CustomPlayer<S> {
    /// Create a player. All of its randomness comes from one ChaCha20 stream,
    /// seeded from `settings.seed` (or entropy when it is 0).
    pub fn new(settings: PlayerSettings) -> Self {
        let rng = if settings.seed == 0 {
            ChaCha20Rng::from_entropy()
        } else {
            ChaCha20Rng::seed_from_u64(settings.seed)
        };
        Self {
            settings,
            rng,
            context: None,
        }
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Summary of the last move this player made.
    pub fn context(&self) -> Option<&MoveContext<S::Action>> {
        self.context.as_ref()
    }

    /// Choose an action for the side to move in `state`.
    ///
    /// Fails only if `state` is terminal.
    pub fn get_action(&mut self, state: &S) -> Result<S::Action, PlayerError> {
        if state.terminal_test() {
            return Err(PlayerError::NoLegalMoves);
        }

        let start = Instant::now();
        let deadline = start + self.settings.time_budget;
        let ply = state.ply_count();

        let context = if ply < self.settings.opening_plies {
            let action = random_action(state, &mut self.rng).ok_or(PlayerError::NoLegalMoves)?;
            MoveContext {
                ply,
                strategy: None,
                action,
                work: 0,
                depth: None,
                fallback: false,
                elapsed: start.elapsed(),
            }
        } else {
            self.search(state, deadline, start)?
        };

        debug!(
            ply,
            strategy = context.strategy.map_or("opening", Strategy::as_str),
            action = ?context.action,
            work = context.work,
            depth = ?context.depth,
            fallback = context.fallback,
            elapsed_us = context.elapsed.as_micros() as u64,
            "Move chosen"
        );

        let action = context.action;
        self.context = Some(context);
        Ok(action)
    }

    fn search(
        &mut self,
        state: &S,
        deadline: Instant,
        start: Instant,
    ) -> Result<MoveContext<S::Action>, PlayerError> {
        let strategy = self.settings.strategy;
        let ply = state.ply_count();

        let algorithm = match strategy {
            Strategy::Mcts => {
                let result = match self.settings.leaf_evaluator {
                    LeafEvaluatorKind::Rollout => {
                        let evaluator =
                            RolloutEvaluator::new(self.settings.mcts.max_rollout_depth);
                        mcts_move(state, &evaluator, &self.settings.mcts, deadline, &mut self.rng)?
                    }
                    LeafEvaluatorKind::AlphaBeta => {
                        let evaluator = AlphaBetaEvaluator::new(self.settings.eval_depth);
                        mcts_move(state, &evaluator, &self.settings.mcts, deadline, &mut self.rng)?
                    }
                };
                return Ok(MoveContext {
                    ply,
                    strategy: Some(strategy),
                    action: result.action,
                    work: result.iterations as u64,
                    depth: None,
                    fallback: result.fallback,
                    elapsed: start.elapsed(),
                });
            }
            Strategy::AlphaBeta => Algorithm::AlphaBeta,
            Strategy::Pvs => Algorithm::Pvs,
            Strategy::Minimax => Algorithm::Minimax,
        };

        let max_depth = match algorithm {
            Algorithm::Minimax => self.settings.minimax_depth,
            _ => self.settings.max_depth,
        };
        let outcome = MinimaxSearch::new(MobilityHeuristic).iterative_deepening(
            state,
            max_depth,
            deadline,
            algorithm,
        )?;

        Ok(MoveContext {
            ply,
            strategy: Some(strategy),
            action: outcome.action,
            work: outcome.nodes,
            depth: Some(outcome.depth),
            fallback: false,
            elapsed: start.elapsed(),
        })
    }
}

fn mcts_move<S, E>(
    state: &S,
    evaluator: &E,
    config: &MctsConfig,
    deadline: Instant,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<S::Action>, SearchError>
where
    S: Mobility,
    E: LeafEvaluator<S>,
{
    let mut search = MctsSearch::new(state.clone(), evaluator, config.clone())?;
    search.run_for(deadline, rng)
}
