//! Turn rules for Pig.
//!
//! Pure transition functions over [`GameState`]. The die value is passed
//! in, so all rule logic is deterministic and testable without an RNG;
//! drawing the die is the engine's job.
//!
//! Turn flow:
//! - roll 1       -> turn score lost, turn passes to the opponent
//! - roll 2-6     -> die added to the turn score, same player keeps rolling
//! - hold         -> turn score banked; reaching the threshold ends the game,
//!                   otherwise the turn passes to the opponent

use super::state::{GameState, GameStatus, WINNING_SCORE};

/// Result of applying one die roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollOutcome {
    /// Rolled a 1: the turn score is lost and the turn ends.
    Bust,
    /// Rolled 2-6: the die value was added to the turn score.
    Gained(u8),
}

/// Result of banking the current turn score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// Banked without reaching the threshold; the turn passed to the opponent.
    Banked(u32),
    /// Banking reached the winning threshold; carries the final total.
    Won(u32),
}

/// Applies a die roll to the state. `die` must be in [1, 6].
///
/// A roll never finishes the game: even a turn score that would bank past
/// the threshold stays at risk until the player holds.
pub fn apply_roll(state: &mut GameState, die: u8) -> RollOutcome {
    debug_assert!((1..=6).contains(&die), "die out of range: {}", die);
    state.last_roll = die;

    if die == 1 {
        state.current_turn_score = 0;
        state.active_player = state.active_player.opponent();
        return RollOutcome::Bust;
    }

    state.current_turn_score += u32::from(die);
    state.status = GameStatus::Playing;
    RollOutcome::Gained(die)
}

/// Banks the current turn score into the active player's total.
///
/// Computes unconditionally on whatever the turn score holds; rejecting a
/// zero-score hold is the calling layer's job. On a win the turn score is
/// retained and the turn does not toggle, so the final state still shows
/// what was banked.
pub fn apply_hold(state: &mut GameState) -> HoldOutcome {
    let banked = state.current_turn_score;
    let total = state.score(state.active_player) + banked;
    state.scores[state.active_player as usize] = total;

    if total >= WINNING_SCORE {
        state.status = GameStatus::Finished;
        state.winner = Some(state.active_player);
        return HoldOutcome::Won(total);
    }

    state.current_turn_score = 0;
    state.active_player = state.active_player.opponent();
    HoldOutcome::Banked(banked)
}
