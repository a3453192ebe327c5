//! Prompts and sentinel constants for flashcard generation.
//!
//! Centralising every prompt here serves two purposes:
//!
//! 1. **Single source of truth** — changing the card format or the rejection
//!    contract requires editing exactly one place.
//!
//! 2. **Testability** — unit tests can inspect prompts directly without a
//!    remote call, so prompt regressions are easy to catch.
//!
//! Callers can override the default via
//! [`crate::config::GenerationConfig::system_prompt`]; the constant here is
//! used only when no override is provided.

/// The id the model is instructed to place in its rejection sentinel when the
/// source text is not academic content.
pub const INVALID_INPUT_ID: &str = "invalid-input";

/// Fallback reason when the rejection sentinel carries no `name` field.
pub const DEFAULT_INVALID_REASON: &str =
    "The provided content is not a valid academic lesson.";

/// Default system prompt for flashcard generation.
///
/// Directs the model to first judge whether the text is academic material; if
/// not, to answer with the `invalid-input` sentinel array, and otherwise to
/// emit at most 25 Q/A pairs as a bare JSON array.
pub const FLASHCARD_SYSTEM_PROMPT: &str = r#"You are an AI learning assistant that creates effective flashcards to help students study and retain information.

Before generating flashcards, first verify that the provided content is a valid academic lesson typically found in school or university curricula (e.g., mathematics, biology, history, computer science, etc.).

If the extracted content is **not related to any academic subject** or **not suitable for educational flashcards** (e.g., personal stories, random internet text, opinions, fictional content), respond with:
[{
  "name": "<reason why it's not valid>",
  "flashcardId": "invalid-input",
  "cards": []
}]

If valid, your task is to extract key concepts, terms, and facts from the academic content and create a maximum of 25 flashcards as a JSON array of {"question": ..., "answer": ...} objects.

Each flashcard should:
- Focus on one clear concept
- Use simple and direct language
- Be useful for review and retention

Output ONLY the JSON array. Do not include explanations, summaries, or notes outside the flashcard format."#;

/// Build the user-turn instructions embedding the processed text.
pub fn user_instructions(text: &str) -> String {
    format!(
        "Create flashcards from the following text:\n\n{text}\n\n\
         Only proceed if the content is a valid academic lesson. Otherwise, \
         respond with the 'invalid-input' format as instructed."
    )
}
