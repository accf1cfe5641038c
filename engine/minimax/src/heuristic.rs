//! Static evaluation for depth-limited leaves.

use engine_core::{GameState, Mobility, PlayerId};

/// Score of a proven win. Terminal utilities are scaled by this so that a
/// decided game always outranks any heuristic estimate.
pub const WIN_SCORE: f32 = 10_000.0;

/// Static evaluation of a non-terminal position.
///
/// Higher is better for `perspective`. Implemented for closures so tests and
/// callers can plug in ad-hoc evaluations.
pub trait Heuristic<S: GameState> {
    fn evaluate(&self, state: &S, perspective: PlayerId) -> f32;
}

impl<S, F> Heuristic<S> for F
where
    S: GameState,
    F: Fn(&S, PlayerId) -> f32,
{
    fn evaluate(&self, state: &S, perspective: PlayerId) -> f32 {
        self(state, perspective)
    }
}

/// Own liberties minus opponent liberties.
#[derive(Debug, Clone, Copy, Default)]
pub struct MobilityHeuristic;

impl<S: Mobility> Heuristic<S> for MobilityHeuristic {
    fn evaluate(&self, state: &S, perspective: PlayerId) -> f32 {
        let own = state.mobility(perspective) as f32;
        let opp = state.mobility(perspective.opponent()) as f32;
        own - opp
    }
}

/// Exact score of a terminal position for `perspective`.
#[inline]
pub fn terminal_score<S: GameState>(state: &S, perspective: PlayerId) -> f32 {
    state.utility(perspective) * WIN_SCORE
}
