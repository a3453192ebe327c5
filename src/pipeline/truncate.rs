//! Input truncation: enforce the maximum character budget.
//!
//! Pure and deterministic — no I/O, no randomness. Counts are Unicode scalar
//! counts, never byte offsets, so multi-byte text is cut at a character
//! boundary and the `max + marker` length property holds for any input.

use tracing::debug;

/// Marker appended to truncated text so the model (and the user, on export)
/// can see the input was cut.
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated to fit the input limit]";

/// Enforce the character budget on the raw input text.
///
/// Returns the (possibly shortened) text and, when truncation happened, a
/// warning string citing the original and truncated character counts. Text at
/// or under the budget is returned unchanged with no warning.
///
/// Post-condition: a truncated result is exactly
/// `max_chars + TRUNCATION_MARKER.chars().count()` characters long.
pub fn truncate_input(text: &str, max_chars: usize) -> (String, Option<String>) {
    let total = text.chars().count();
    if total <= max_chars {
        return (text.to_string(), None);
    }

    let mut shortened: String = text.chars().take(max_chars).collect();
    shortened.push_str(TRUNCATION_MARKER);

    let warning = format!(
        "Your document is long ({total} characters). Only the first {max_chars} \
         characters were used to generate flashcards."
    );
    debug!("Truncated input from {} to {} chars", total, max_chars);

    (shortened, Some(warning))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_passes_through_unchanged() {
        let (text, warning) = truncate_input("short text", 7000);
        assert_eq!(text, "short text");
        assert!(warning.is_none());
    }

    #[test]
    fn text_at_the_budget_is_untouched() {
        let input = "x".repeat(7000);
        let (text, warning) = truncate_input(&input, 7000);
        assert_eq!(text, input);
        assert!(warning.is_none());
    }

    #[test]
    fn long_text_is_cut_to_budget_plus_marker() {
        let input = "a".repeat(8000);
        let (text, warning) = truncate_input(&input, 7000);

        assert_eq!(
            text.chars().count(),
            7000 + TRUNCATION_MARKER.chars().count()
        );
        assert!(text.ends_with(TRUNCATION_MARKER));

        let warning = warning.expect("truncation must warn");
        assert!(warning.contains("8000"), "warning cites original length");
        assert!(warning.contains("7000"), "warning cites truncated length");
    }

    #[test]
    fn multibyte_text_is_cut_at_char_boundaries() {
        let input = "é".repeat(200);
        let (text, warning) = truncate_input(&input, 150);
        assert!(warning.is_some());
        assert_eq!(
            text.chars().count(),
            150 + TRUNCATION_MARKER.chars().count()
        );
        assert!(text.starts_with("ééé"));
    }
}
