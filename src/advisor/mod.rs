//! Turn decisions for the computer player.
//!
//! An [`Advisor`] looks at the game from the active player's perspective
//! and answers one question: roll again or bank the turn score. Two
//! implementations: a remote language-model call ([`gemini`]) and a
//! deterministic local policy ([`heuristic`]) used when no API credential
//! is configured. `decide` is infallible by contract -- every failure path
//! inside a provider collapses to a fixed fallback decision.

pub mod gemini;
pub mod heuristic;

use tracing::{info, warn};

use crate::game::GameState;

pub use gemini::{GeminiAdvisor, CONFUSED_REASONING, DEFAULT_MODEL, FAILED_REASONING};
pub use heuristic::{HeuristicAdvisor, SAFE_PLAY_REASONING};

/// Environment variable holding the remote API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// The two moves available on any turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Roll,
    Hold,
}

/// A single turn decision with its short rationale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub reasoning: String,
}

/// Supplies roll/hold decisions for the computer player.
///
/// Implementations must never fail: transport and validation problems are
/// absorbed and replaced with a safe fallback decision.
#[allow(async_fn_in_trait)]
pub trait Advisor {
    /// Decides for `state.active_player` given the current snapshot.
    async fn decide(&mut self, state: &GameState) -> Decision;
}

/// Advisor selected at startup from the credential configuration.
pub enum AnyAdvisor {
    Heuristic(HeuristicAdvisor),
    Gemini(GeminiAdvisor),
}

impl AnyAdvisor {
    /// Picks the remote advisor when a non-empty credential is given and
    /// the local heuristic otherwise. Absence of a credential means no
    /// network call is ever attempted.
    pub fn select(api_key: Option<String>, model: String) -> AnyAdvisor {
        match api_key.filter(|k| !k.is_empty()) {
            Some(key) => {
                info!(model = %model, "using remote advisor");
                AnyAdvisor::Gemini(GeminiAdvisor::with_model(key, model))
            }
            None => {
                warn!("no API key found, using local fallback policy");
                AnyAdvisor::Heuristic(HeuristicAdvisor)
            }
        }
    }

    /// Reads the credential from [`API_KEY_ENV`] and selects accordingly.
    pub fn from_env() -> AnyAdvisor {
        AnyAdvisor::select(std::env::var(API_KEY_ENV).ok(), DEFAULT_MODEL.to_string())
    }
}

impl Advisor for AnyAdvisor {
    async fn decide(&mut self, state: &GameState) -> Decision {
        match self {
            AnyAdvisor::Heuristic(h) => h.decide(state).await,
            AnyAdvisor::Gemini(g) => g.decide(state).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_without_key_is_heuristic() {
        let advisor = AnyAdvisor::select(None, DEFAULT_MODEL.to_string());
        assert!(matches!(advisor, AnyAdvisor::Heuristic(_)));
    }

    #[test]
    fn select_with_empty_key_is_heuristic() {
        let advisor = AnyAdvisor::select(Some(String::new()), DEFAULT_MODEL.to_string());
        assert!(matches!(advisor, AnyAdvisor::Heuristic(_)));
    }

    #[test]
    fn select_with_key_is_remote() {
        let advisor = AnyAdvisor::select(Some("k".to_string()), DEFAULT_MODEL.to_string());
        assert!(matches!(advisor, AnyAdvisor::Gemini(_)));
    }
}
