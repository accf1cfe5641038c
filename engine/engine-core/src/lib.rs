//! Core traits and types for the isolation search engine
//!
//! This crate provides the abstractions every search crate is written against:
//! - `GameState`: immutable two-player position with legal moves and utility
//! - `Mobility`: piece-location queries used by mobility heuristics
//! - `PlayerId`: identifier of one of the two sides
//!
//! Search crates never depend on a concrete board. Any game that alternates
//! turns strictly and implements these traits can be searched.

pub mod game_utils;
pub mod typed;

// Re-export main types for convenience
pub use game_utils::{mover_outcome, random_action};
pub use typed::{GameState, Mobility, PlayerId};
