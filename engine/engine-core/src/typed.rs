//! Typed game-state traits.
//!
//! A `GameState` is a value: `result` returns the successor and never mutates
//! the receiver, so search code can keep snapshots in tree nodes freely.

use std::fmt::Debug;

/// Identifier of one side in a two-player game (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const FIRST: PlayerId = PlayerId(0);
    pub const SECOND: PlayerId = PlayerId(1);

    /// The other side.
    #[inline]
    pub fn opponent(self) -> PlayerId {
        PlayerId(1 - (self.0 & 1))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

/// Immutable position of a two-player, perfect-information, zero-sum game.
///
/// # Contract
///
/// * Turns alternate strictly: `s.result(a).player() == s.player().opponent()`.
///   Backpropagation flips the reward sign once per tree level and relies on it.
/// * `actions()` is empty exactly when `terminal_test()` is true.
/// * `actions()` returns the same order for equal states, which keeps seeded
///   searches reproducible.
/// * `utility(p)` is `+1.0` if `p` has won, `-1.0` if `p` has lost and `0.0`
///   otherwise (draws and non-terminal states).
///
/// # Example
///
/// ```rust
/// use engine_core::{GameState, PlayerId};
///
/// /// Players alternately remove one or two stones; taking the last stone wins.
/// #[derive(Debug, Clone)]
/// struct Nim { stones: u8, to_move: PlayerId, plies: u32 }
///
/// impl GameState for Nim {
///     type Action = u8;
///
///     fn actions(&self) -> Vec<u8> {
///         (1..=self.stones.min(2)).collect()
///     }
///     fn result(&self, action: &u8) -> Self {
///         Nim { stones: self.stones - action, to_move: self.to_move.opponent(), plies: self.plies + 1 }
///     }
///     fn terminal_test(&self) -> bool {
///         self.stones == 0
///     }
///     fn utility(&self, player: PlayerId) -> f32 {
///         if !self.terminal_test() { 0.0 }
///         else if player == self.to_move { -1.0 } else { 1.0 }
///     }
///     fn player(&self) -> PlayerId {
///         self.to_move
///     }
///     fn ply_count(&self) -> u32 {
///         self.plies
///     }
/// }
///
/// let start = Nim { stones: 3, to_move: PlayerId::FIRST, plies: 0 };
/// assert_eq!(start.actions(), vec![1, 2]);
/// assert_eq!(start.result(&2).result(&1).utility(PlayerId::SECOND), 1.0);
/// ```
pub trait GameState: Clone + Debug {
    /// Move type - small and copyable
    type Action: Copy + Eq + Debug;

    /// Legal actions for the side to move. Empty on terminal states.
    fn actions(&self) -> Vec<Self::Action>;

    /// Successor state after `action`. The receiver is left untouched.
    fn result(&self, action: &Self::Action) -> Self;

    /// Whether the game is over.
    fn terminal_test(&self) -> bool;

    /// Terminal payoff from `player`'s point of view, in {-1, 0, +1}.
    fn utility(&self, player: PlayerId) -> f32;

    /// Side to move.
    fn player(&self) -> PlayerId;

    /// Number of plies played since the initial position.
    fn ply_count(&self) -> u32;
}

/// Piece-location queries for games where each side owns a single piece.
///
/// Only mobility-style evaluation uses this; tree search itself never does.
pub trait Mobility: GameState {
    type Location: Copy + Eq + Debug;

    /// Where `player`'s piece stands, or `None` before it has been placed.
    fn location(&self, player: PlayerId) -> Option<Self::Location>;

    /// Open squares reachable in one move from `location`.
    /// With `None`, every open square (the placement moves).
    fn liberties(&self, location: Option<Self::Location>) -> Vec<Self::Location>;

    /// Number of squares `player`'s piece could move to right now.
    fn mobility(&self, player: PlayerId) -> usize {
        self.liberties(self.location(player)).len()
    }
}
