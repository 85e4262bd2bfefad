//! Remote decision provider backed by the Gemini `generateContent` API.
//!
//! Serializes the three facts the model needs -- own banked total, the
//! opponent's banked total, and the at-risk turn score -- into a prompt,
//! requests a schema-constrained JSON reply, and validates the result.
//! One attempt per decision, no retry: any transport, status, or parse
//! failure falls through to a fixed hold decision so the game always
//! continues playably.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::{Action, Advisor, Decision};
use crate::game::GameState;

/// Model queried when none is configured explicitly.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Rationale substituted when the reply parses but carries an unknown action.
pub const CONFUSED_REASONING: &str = "I'm confused, so I'll hold.";

/// Rationale substituted when the remote call fails outright.
pub const FAILED_REASONING: &str = "My brain hurts. I hold.";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Failures internal to the remote call. Never escapes the provider:
/// every variant is collapsed to the failure fallback in `decide`.
#[derive(Debug, Error)]
enum RemoteError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed decision payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Remote advisor holding the HTTP client and credential.
pub struct GeminiAdvisor {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiAdvisor {
    /// Creates an advisor against the default model.
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    /// Creates an advisor against a specific model id.
    pub fn with_model(api_key: String, model: String) -> Self {
        GeminiAdvisor {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    async fn request_decision(&self, state: &GameState) -> Result<Decision, RemoteError> {
        let me = state.active_player;
        let prompt = build_prompt(
            state.score(me),
            state.score(me.opponent()),
            state.current_turn_score,
        );

        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&GenerateRequest::for_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status));
        }

        let body: GenerateResponse = response.json().await?;
        extract_decision(&body)
    }
}

impl Advisor for GeminiAdvisor {
    async fn decide(&mut self, state: &GameState) -> Decision {
        match self.request_decision(state).await {
            Ok(decision) => decision,
            Err(err) => {
                warn!(error = %err, "remote decision failed, holding");
                Decision {
                    action: Action::Hold,
                    reasoning: FAILED_REASONING.to_string(),
                }
            }
        }
    }
}

/// Builds the decision prompt around the three numeric facts.
fn build_prompt(own_total: u32, opponent_total: u32, turn_score: u32) -> String {
    format!(
        "You are playing the dice game 'Pig'.\n\
         Goal: First to 100 points wins.\n\
         \n\
         Current State:\n\
         - Your Total Score: {own_total}\n\
         - Opponent's Total Score: {opponent_total}\n\
         - Your Current Turn Score (at risk): {turn_score}\n\
         \n\
         Rules:\n\
         - If you roll a 1, you lose your turn score ({turn_score}) and your turn ends.\n\
         - If you roll 2-6, it adds to your turn score.\n\
         - You can 'hold' to bank your turn score into your total score.\n\
         \n\
         Decide whether to 'roll' or 'hold'.\n\
         Be strategic. If you are close to 100, play safe. If you are behind, take risks.\n\
         Provide a very short, witty reasoning (max 10 words)."
    )
}

/// JSON schema the model's reply must match.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "action": { "type": "STRING", "enum": ["roll", "hold"] },
            "reasoning": { "type": "STRING" }
        },
        "required": ["action", "reasoning"]
    })
}

// === Wire types ===

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateRequest {
    fn for_prompt(prompt: String) -> Self {
        GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: serde_json::Value,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

/// The model's reply before action validation.
#[derive(Debug, Deserialize)]
struct RawDecision {
    #[serde(default)]
    action: String,
    #[serde(default)]
    reasoning: String,
}

/// Pulls the decision text out of a reply body and validates it.
///
/// A missing candidate or empty part is treated as an empty JSON object,
/// which then fails action validation into the confused fallback.
fn extract_decision(body: &GenerateResponse) -> Result<Decision, RemoteError> {
    let text = body
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.as_str())
        .unwrap_or("{}");

    let raw: RawDecision = serde_json::from_str(text)?;
    Ok(validate(raw))
}

/// Enforces the action enum. Anything but an exact "roll" or "hold" is
/// replaced with the confused fallback decision.
fn validate(raw: RawDecision) -> Decision {
    let action = match raw.action.as_str() {
        "roll" => Action::Roll,
        "hold" => Action::Hold,
        _ => {
            warn!(action = %raw.action, "model returned an unknown action, holding");
            return Decision {
                action: Action::Hold,
                reasoning: CONFUSED_REASONING.to_string(),
            };
        }
    };

    Decision {
        action,
        reasoning: raw.reasoning,
    }
}
