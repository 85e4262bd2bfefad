//! Game representation and turn rules.
//!
//! Contains the core data structures for players and game state, plus the
//! pure transition functions that implement the rules of Pig.

pub mod state;
pub mod turn;

pub use state::{GameState, GameStatus, Player, WINNING_SCORE};
pub use turn::{apply_hold, apply_roll, HoldOutcome, RollOutcome};
