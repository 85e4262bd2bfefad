//! Engine state management.
//!
//! Owns the authoritative [`GameState`] and the die RNG, and exposes the
//! three mutating operations: `roll`, `hold`, and `reset`. Both `roll` and
//! `hold` are guarded no-ops once the game is finished, so a terminated
//! game stays immutable until `reset`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::game::turn::{apply_hold, apply_roll, HoldOutcome, RollOutcome};
use crate::game::GameState;

/// Holds the mutable state of one game between operations.
pub struct Engine {
    state: GameState,
    rng: SmallRng,
}

impl Engine {
    /// Creates a new engine at the initial state with an entropy-seeded RNG.
    pub fn new() -> Self {
        Engine {
            state: GameState::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a new engine with a fixed RNG seed, for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Engine {
            state: GameState::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Creates an engine resuming from an existing snapshot.
    pub fn from_state(state: GameState) -> Self {
        Engine {
            state,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Read-only view of the current state. All mutation goes through the
    /// engine's own operations.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Draws a uniform die in [1, 6] and applies it to the active player's
    /// turn. Returns `None` without touching the state if the game is
    /// already finished.
    pub fn roll(&mut self) -> Option<RollOutcome> {
        if self.state.is_finished() {
            return None;
        }
        let die = self.rng.gen_range(1..=6);
        Some(apply_roll(&mut self.state, die))
    }

    /// Banks the current turn score for the active player. Returns `None`
    /// without touching the state if the game is already finished.
    ///
    /// Banks unconditionally on whatever the turn score holds; callers are
    /// expected not to hold on a zero turn score.
    pub fn hold(&mut self) -> Option<HoldOutcome> {
        if self.state.is_finished() {
            return None;
        }
        Some(apply_hold(&mut self.state))
    }

    /// Restores the exact initial state. The RNG is not re-seeded.
    pub fn reset(&mut self) {
        self.state = GameState::new();
    }
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}
