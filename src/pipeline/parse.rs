//! Response extraction and parsing: recover the card array from model output.
//!
//! Models are asked for a bare JSON array but routinely wrap it in a
//! ` ```json ` fence or surround it with prose. Extraction follows one
//! well-defined precedence rather than a pile of greedy regexes:
//!
//! 1. **Strict** — the whole trimmed content parses as JSON.
//! 2. **Fenced** — the content of the first code fence (labeled `json` or
//!    unlabeled).
//! 3. **Bracket span** — the outermost `[...]` substring.
//!
//! Whatever candidate wins must then parse, must not be the rejection
//! sentinel, and must decode as a sequence of complete `{question, answer}`
//! records — a record missing either field fails the whole response as
//! malformed instead of smuggling nulls into the deck.

use crate::error::Pdf2CardsError;
use crate::prompts::{DEFAULT_INVALID_REASON, INVALID_INPUT_ID};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// A validated question/answer record, not yet identified.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawCard {
    pub question: String,
    pub answer: String,
}

static RE_FENCED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*\n(.*?)\n```").unwrap());

/// Parse model response content into raw cards.
///
/// `max_cards` bounds the deck locally: the prompt asks the model for at most
/// 25 cards, but compliance is not guaranteed, so an oversized response is
/// truncated here with a log line rather than trusted.
///
/// # Errors
/// * [`Pdf2CardsError::MalformedResponse`] — no candidate parses as JSON, the
///   parsed value is not an array, or a record is missing `question`/`answer`.
/// * [`Pdf2CardsError::InvalidContent`] — the model answered with the
///   `invalid-input` rejection sentinel.
pub fn parse_cards(content: &str, max_cards: usize) -> Result<Vec<RawCard>, Pdf2CardsError> {
    let candidate = extract_json_candidate(content);

    let value: Value =
        serde_json::from_str(candidate.trim()).map_err(|e| Pdf2CardsError::MalformedResponse {
            detail: e.to_string(),
        })?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(Pdf2CardsError::MalformedResponse {
                detail: format!("expected a JSON array, got {}", json_type_name(&other)),
            });
        }
    };

    if let Some(reason) = rejection_reason(items.first()) {
        return Err(Pdf2CardsError::InvalidContent { reason });
    }

    let mut cards = Vec::with_capacity(items.len().min(max_cards));
    for (i, item) in items.into_iter().enumerate() {
        if i >= max_cards {
            warn!(
                "Model returned more than {} cards; dropping the rest",
                max_cards
            );
            break;
        }
        let card: RawCard =
            serde_json::from_value(item).map_err(|e| Pdf2CardsError::MalformedResponse {
                detail: format!("card {i} is missing a field: {e}"),
            })?;
        cards.push(card);
    }

    debug!("Parsed {} cards from response", cards.len());
    Ok(cards)
}

/// Pick the JSON candidate out of possibly fenced or noisy content.
///
/// Precedence: strict parse of the whole content, then the first fenced code
/// block, then the outermost bracket span, and finally the content itself
/// (letting `parse_cards` produce the parse error).
fn extract_json_candidate(content: &str) -> &str {
    let trimmed = content.trim();

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return trimmed;
    }

    if let Some(caps) = RE_FENCED.captures(trimmed) {
        if let Some(inner) = caps.get(1) {
            return inner.as_str();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('['), trimmed.rfind(']')) {
        if start < end {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

/// Detect the rejection sentinel on the first array element.
///
/// The sentinel is `{"flashcardId": "invalid-input", "name": <reason>, ...}`.
/// Returns the embedded reason (or the generic fallback) when present.
fn rejection_reason(first: Option<&Value>) -> Option<String> {
    let first = first?;
    let id = first.get("flashcardId").and_then(Value::as_str)?;
    if id != INVALID_INPUT_ID {
        return None;
    }
    let reason = first
        .get("name")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_INVALID_REASON);
    Some(reason.to_string())
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PURE: &str = r#"[{"question":"Q1","answer":"A1"},{"question":"Q2","answer":"A2"}]"#;

    #[test]
    fn pure_array_parses() {
        let cards = parse_cards(PURE, 25).unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "Q1");
        assert_eq!(cards[1].answer, "A2");
    }

    #[test]
    fn fenced_array_parses() {
        let content = format!("```json\n{PURE}\n```");
        let cards = parse_cards(&content, 25).unwrap();
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn unlabeled_fence_parses() {
        let content = format!("```\n{PURE}\n```");
        let cards = parse_cards(&content, 25).unwrap();
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn array_in_prose_parses() {
        let content = format!("Here are your flashcards:\n{PURE}\nHappy studying!");
        let cards = parse_cards(&content, 25).unwrap();
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn all_wrapping_styles_parse_equivalently() {
        let pure = parse_cards(PURE, 25).unwrap();
        let fenced = parse_cards(&format!("```json\n{PURE}\n```"), 25).unwrap();
        let prose = parse_cards(&format!("Sure! {PURE} Enjoy."), 25).unwrap();
        assert_eq!(pure, fenced);
        assert_eq!(pure, prose);
    }

    #[test]
    fn rejection_sentinel_is_invalid_content_with_reason() {
        let content = r#"[{"name":"not academic","flashcardId":"invalid-input","cards":[]}]"#;
        let err = parse_cards(content, 25).unwrap_err();
        match err {
            Pdf2CardsError::InvalidContent { reason } => assert_eq!(reason, "not academic"),
            other => panic!("expected InvalidContent, got {other:?}"),
        }
    }

    #[test]
    fn rejection_without_reason_falls_back_to_generic() {
        let content = r#"[{"flashcardId":"invalid-input","cards":[]}]"#;
        let err = parse_cards(content, 25).unwrap_err();
        match err {
            Pdf2CardsError::InvalidContent { reason } => {
                assert_eq!(reason, DEFAULT_INVALID_REASON)
            }
            other => panic!("expected InvalidContent, got {other:?}"),
        }
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_cards("I'm sorry, I can't do that.", 25).unwrap_err();
        assert!(matches!(err, Pdf2CardsError::MalformedResponse { .. }));
    }

    #[test]
    fn non_array_json_is_malformed() {
        let err = parse_cards(r#"{"question":"Q","answer":"A"}"#, 25).unwrap_err();
        match err {
            Pdf2CardsError::MalformedResponse { detail } => {
                assert!(detail.contains("an object"))
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn record_missing_a_field_is_rejected() {
        let content = r#"[{"question":"Q1","answer":"A1"},{"question":"Q2"}]"#;
        let err = parse_cards(content, 25).unwrap_err();
        match err {
            Pdf2CardsError::MalformedResponse { detail } => {
                assert!(detail.contains("card 1"), "got: {detail}")
            }
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn oversized_response_is_capped_locally() {
        let items: Vec<String> = (0..30)
            .map(|i| format!(r#"{{"question":"Q{i}","answer":"A{i}"}}"#))
            .collect();
        let content = format!("[{}]", items.join(","));

        let cards = parse_cards(&content, 25).unwrap();
        assert_eq!(cards.len(), 25);
        assert_eq!(cards[24].question, "Q24");
    }

    #[test]
    fn empty_array_yields_empty_deck() {
        assert!(parse_cards("[]", 25).unwrap().is_empty());
    }
}
