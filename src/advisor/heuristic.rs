//! Deterministic fallback decision policy.
//!
//! Conservative hold-at-20 play: bank once the turn score reaches the
//! threshold, or as soon as banking would win outright; otherwise keep
//! rolling. Used whenever no remote credential is configured, and as the
//! behavioral baseline the remote path degrades toward.

use super::{Action, Advisor, Decision};
use crate::game::{GameState, WINNING_SCORE};

/// Turn score at which the policy banks rather than pressing its luck.
pub const HOLD_THRESHOLD: u32 = 20;

/// Fixed rationale attached to every heuristic decision.
pub const SAFE_PLAY_REASONING: &str = "I'm playing it safe using basic logic.";

pub struct HeuristicAdvisor;

impl Advisor for HeuristicAdvisor {
    async fn decide(&mut self, state: &GameState) -> Decision {
        let me = state.active_player;
        let banked = state.score(me);
        let turn = state.current_turn_score;

        let action = if turn >= HOLD_THRESHOLD || banked + turn >= WINNING_SCORE {
            Action::Hold
        } else {
            Action::Roll
        };

        Decision {
            action,
            reasoning: SAFE_PLAY_REASONING.to_string(),
        }
    }
}
