//! Shared helpers for search code built on `GameState`.
//!
//! These pin down the one perspective convention used by every search crate:
//! outcomes attached to a position are reported for the player who moved INTO
//! that position (the opponent of the side now to move).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::typed::GameState;

/// Terminal utility of `state` for the player who just moved.
///
/// # Example
/// ```
/// # use engine_core::{GameState, PlayerId, mover_outcome};
/// # #[derive(Debug, Clone)]
/// # struct Done(PlayerId);
/// # impl GameState for Done {
/// #     type Action = u8;
/// #     fn actions(&self) -> Vec<u8> { vec![] }
/// #     fn result(&self, _: &u8) -> Self { self.clone() }
/// #     fn terminal_test(&self) -> bool { true }
/// #     fn utility(&self, p: PlayerId) -> f32 { if p == self.0 { -1.0 } else { 1.0 } }
/// #     fn player(&self) -> PlayerId { self.0 }
/// #     fn ply_count(&self) -> u32 { 7 }
/// # }
/// // Side to move is stuck and loses, so whoever moved last has won.
/// assert_eq!(mover_outcome(&Done(PlayerId::SECOND)), 1.0);
/// ```
#[inline]
pub fn mover_outcome<S: GameState>(state: &S) -> f32 {
    state.utility(state.player().opponent())
}

/// Uniformly random legal action, or `None` on a terminal state.
pub fn random_action<S: GameState, R: Rng + ?Sized>(state: &S, rng: &mut R) -> Option<S::Action> {
    state.actions().choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::PlayerId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    /// Count-down game: each ply subtracts 1 or 2, reaching zero wins.
    #[derive(Debug, Clone)]
    struct Countdown {
        left: u8,
        to_move: PlayerId,
    }

    impl GameState for Countdown {
        type Action = u8;

        fn actions(&self) -> Vec<u8> {
            (1..=self.left.min(2)).collect()
        }

        fn result(&self, action: &u8) -> Self {
            Countdown {
                left: self.left - action,
                to_move: self.to_move.opponent(),
            }
        }

        fn terminal_test(&self) -> bool {
            self.left == 0
        }

        fn utility(&self, player: PlayerId) -> f32 {
            match (self.terminal_test(), player == self.to_move) {
                (false, _) => 0.0,
                (true, true) => -1.0,
                (true, false) => 1.0,
            }
        }

        fn player(&self) -> PlayerId {
            self.to_move
        }

        fn ply_count(&self) -> u32 {
            0
        }
    }

    #[test]
    fn test_mover_outcome_terminal() {
        let state = Countdown {
            left: 1,
            to_move: PlayerId::FIRST,
        }
        .result(&1);
        // FIRST took the last stone
        assert_eq!(mover_outcome(&state), 1.0);
        assert_eq!(state.utility(state.player()), -1.0);
    }

    #[test]
    fn test_mover_outcome_non_terminal() {
        let state = Countdown {
            left: 5,
            to_move: PlayerId::FIRST,
        };
        assert_eq!(mover_outcome(&state), 0.0);
    }

    #[test]
    fn test_random_action_is_legal() {
        let state = Countdown {
            left: 5,
            to_move: PlayerId::FIRST,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..50 {
            let action = random_action(&state, &mut rng).unwrap();
            assert!(state.actions().contains(&action));
        }
    }

    #[test]
    fn test_random_action_terminal_is_none() {
        let state = Countdown {
            left: 0,
            to_move: PlayerId::SECOND,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        assert!(random_action(&state, &mut rng).is_none());
    }
}
