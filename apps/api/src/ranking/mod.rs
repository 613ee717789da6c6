//! Ranking client — the single point of entry for all language-model calls.
//!
//! ARCHITECTURAL RULE: no other module may call the model provider directly.
//!
//! Targets an OpenAI-compatible `/chat/completions` endpoint (the base URL
//! is configurable, so self-hosted gateways work). Every call is pinned to
//! temperature 0 and a fixed seed so identical inputs should produce
//! identical rankings — expected, not guaranteed: provider determinism is
//! not contractual. Calls are never retried and results are never cached; a
//! repeated request re-invokes the model.

pub mod prompts;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::ranking::prompts::{
    render_ranking_prompt, RANKING_SYSTEM, CANDIDATE_RANKING_PROMPT, INTERVIEWER_RANKING_PROMPT,
};

/// Fixed sampling parameters for reproducible rankings.
const TEMPERATURE: f32 = 0.0;
const SEED: i64 = 42;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model response failed schema decoding: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model returned empty content")]
    EmptyContent,
}

/// Which instruction template the ranking prompt uses. The interviewer
/// variant additionally explains the seniority-code vocabulary so the model
/// weighs higher grades more favorably.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankingRole {
    Candidates,
    Interviewers,
}

/// The model's scored judgment of one entity. Immutable once decoded.
///
/// The rating is requested as 1–100 and the list as sorted descending, but
/// neither is re-validated here: an out-of-range or unsorted response passes
/// through exactly as the model produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedEntity {
    pub name: String,
    pub rating: i64,
    /// Skill names relevant to the requirement.
    pub goods: Vec<String>,
    /// Skill names the entity would need to improve.
    pub bads: Vec<String>,
}

/// Envelope the model is instructed to return.
#[derive(Debug, Deserialize)]
struct RatingEnvelope {
    rating: Vec<RatedEntity>,
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI-compatible wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    seed: i64,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Requests a ranking of the serialized competency table against the
    /// requirement text. The table is expected in the markdown form produced
    /// by [`CompetencyTable::to_markdown`](crate::table::CompetencyTable::to_markdown).
    pub async fn rank(
        &self,
        requirements: &str,
        table_markdown: &str,
        role: RankingRole,
    ) -> Result<Vec<RatedEntity>, LlmError> {
        let template = match role {
            RankingRole::Candidates => CANDIDATE_RANKING_PROMPT,
            RankingRole::Interviewers => INTERVIEWER_RANKING_PROMPT,
        };
        let prompt = render_ranking_prompt(template, requirements, table_markdown);
        let envelope: RatingEnvelope = self.call_json(&prompt, RANKING_SYSTEM).await?;
        Ok(envelope.rating)
    }

    /// One chat completion, returning the raw text content. Failures are
    /// hard: no retry, no fallback — the caller surfaces them to the user.
    async fn call(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            seed: SEED,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;

        if let Some(usage) = &chat.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "model call succeeded"
            );
        }

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }

    /// Calls the model and decodes the text content against `T`. Decoding
    /// failure is fatal for the attempt — no best-effort coercion.
    async fn call_json<T: serde::de::DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let text = self.call(prompt, system).await?;
        let text = strip_json_fences(&text);
        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

/// Some models wrap JSON in ``` fences despite instructions; strip them.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .map(str::trim_start);
    match stripped {
        Some(inner) => inner.strip_suffix("```").map(str::trim).unwrap_or(inner),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rated_entity_decodes_from_model_json() {
        let json = r#"{
            "rating": [
                {"name": "Ivanov I.I.", "rating": 87, "goods": ["Rust", "SQL"], "bads": ["Kafka"]},
                {"name": "Petrov P.P.", "rating": 45, "goods": [], "bads": ["Rust"]}
            ]
        }"#;
        let envelope: RatingEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.rating.len(), 2);
        assert_eq!(envelope.rating[0].name, "Ivanov I.I.");
        assert_eq!(envelope.rating[0].rating, 87);
        assert_eq!(envelope.rating[0].goods, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_out_of_range_rating_passes_through() {
        // No defensive clamping: the decoded value is whatever the model said.
        let json = r#"{"rating": [{"name": "X", "rating": 250, "goods": [], "bads": []}]}"#;
        let envelope: RatingEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.rating[0].rating, 250);
    }

    #[test]
    fn test_unsorted_rating_passes_through() {
        let json = r#"{"rating": [
            {"name": "Low", "rating": 10, "goods": [], "bads": []},
            {"name": "High", "rating": 90, "goods": [], "bads": []}
        ]}"#;
        let envelope: RatingEnvelope = serde_json::from_str(json).unwrap();
        // order preserved exactly as returned
        assert_eq!(envelope.rating[0].name, "Low");
        assert_eq!(envelope.rating[1].name, "High");
    }

    #[test]
    fn test_missing_field_fails_decoding() {
        let json = r#"{"rating": [{"name": "X", "rating": 50, "goods": []}]}"#;
        assert!(serde_json::from_str::<RatingEnvelope>(json).is_err());
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"rating\": []}\n```";
        assert_eq!(strip_json_fences(input), "{\"rating\": []}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"rating\": []}\n```";
        assert_eq!(strip_json_fences(input), "{\"rating\": []}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"rating\": []}";
        assert_eq!(strip_json_fences(input), "{\"rating\": []}");
    }
}
