//! Remote generator client: build the chat payload and perform the call.
//!
//! This module is intentionally thin — all prompt text lives in
//! [`crate::prompts`] so it can be changed without touching transport or
//! error classification here.
//!
//! The call is a single JSON-over-HTTPS POST with a bearer credential. There
//! are no retries and no explicit timeout; the transport's defaults apply.
//! Non-success statuses are classified into [`Pdf2CardsError::Remote`], with
//! 500 carrying the "file too large" meaning (the endpoint answers 500 when
//! the prompt exceeds the model's input ceiling).
//!
//! [`RemoteGenerator`] is the seam for tests and embedders: the orchestrator
//! only ever talks to the trait, and [`HttpGenerator`] is the one production
//! implementation.

use crate::config::{GenerationConfig, API_KEY_ENV};
use crate::error::Pdf2CardsError;
use crate::prompts::{user_instructions, FLASHCARD_SYSTEM_PROMPT};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

// ── Wire types ───────────────────────────────────────────────────────────

/// Chat-completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: usize,
}

/// One message in the chat payload.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

// ── Prompt builder ───────────────────────────────────────────────────────

/// Assemble the chat payload for the processed text.
///
/// Two messages: the fixed system instruction (or the config's override) and
/// a user turn embedding the text. No local judgment of the content — whether
/// the text is academic is entirely the model's call.
pub fn build_request(text: &str, config: &GenerationConfig) -> ChatRequest {
    let system = config
        .system_prompt
        .as_deref()
        .unwrap_or(FLASHCARD_SYSTEM_PROMPT);

    ChatRequest {
        model: config.model.clone(),
        messages: vec![
            ChatMessage::system(system),
            ChatMessage::user(user_instructions(text)),
        ],
        max_tokens: config.max_tokens,
    }
}

// ── Transport ────────────────────────────────────────────────────────────

/// The remote service that turns a chat payload into response content.
///
/// Production code uses [`HttpGenerator`]; tests inject a double via
/// [`crate::config::GenerationConfigBuilder::generator`].
#[async_trait]
pub trait RemoteGenerator: Send + Sync {
    /// Perform one completion call, returning the first choice's content.
    async fn complete(&self, request: &ChatRequest) -> Result<String, Pdf2CardsError>;
}

/// HTTP implementation of [`RemoteGenerator`] over `reqwest`.
pub struct HttpGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpGenerator {
    /// Build a generator from the config's endpoint and credential.
    ///
    /// The credential falls back to the `PDF2CARDS_API_KEY` environment
    /// variable; an empty credential still sends the header, letting the
    /// endpoint decide whether anonymous calls are acceptable.
    pub fn from_config(config: &GenerationConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .unwrap_or_default();
        if api_key.is_empty() {
            warn!("No API key configured (set {API_KEY_ENV}); sending an empty credential");
        }
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key,
        }
    }
}

#[async_trait]
impl RemoteGenerator for HttpGenerator {
    async fn complete(&self, request: &ChatRequest) -> Result<String, Pdf2CardsError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| Pdf2CardsError::Network {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("AI endpoint returned HTTP {}", status);
            return Err(Pdf2CardsError::Remote {
                status: status.as_u16(),
            });
        }

        let body: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| Pdf2CardsError::MalformedResponse {
                    detail: format!("response body was not valid JSON: {e}"),
                })?;

        extract_content(body)
    }
}

/// Pull the first choice's content out of the response envelope.
fn extract_content(body: ChatResponse) -> Result<String, Pdf2CardsError> {
    let content = body
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|c| !c.is_empty())
        .ok_or(Pdf2CardsError::EmptyResponse)?;

    debug!("Received {} chars of response content", content.len());
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_both_roles_and_the_text() {
        let config = GenerationConfig::default();
        let req = build_request("Cells divide by mitosis.", &config);

        assert_eq!(req.model, "openai");
        assert_eq!(req.max_tokens, 1000);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, "system");
        assert_eq!(req.messages[1].role, "user");
        assert!(req.messages[1].content.contains("Cells divide by mitosis."));
    }

    #[test]
    fn system_prompt_override_is_honoured() {
        let config = GenerationConfig::builder()
            .system_prompt("You make cards.")
            .build()
            .unwrap();
        let req = build_request("text", &config);
        assert_eq!(req.messages[0].content, "You make cards.");
    }

    #[test]
    fn request_serialises_to_the_expected_shape() {
        let config = GenerationConfig::default();
        let req = build_request("t", &config);
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["model"], "openai");
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "system");
    }

    #[test]
    fn missing_content_is_empty_response() {
        let body: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            extract_content(body),
            Err(Pdf2CardsError::EmptyResponse)
        ));

        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":""}}]}"#).unwrap();
        assert!(matches!(
            extract_content(body),
            Err(Pdf2CardsError::EmptyResponse)
        ));
    }

    #[test]
    fn first_choice_content_is_returned() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"[]"}},{"message":{"content":"ignored"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(body).unwrap(), "[]");
    }
}
