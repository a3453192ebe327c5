//! Output types: the flashcard domain record and per-run results.

use serde::{Deserialize, Serialize};

/// A question/answer study unit.
///
/// `id` is a positional string (`"flashcard-0"`, `"flashcard-1"`, …) assigned
/// by the mapper when a generation batch is produced. Uniqueness holds only
/// within that batch: regenerating assigns ids from zero again, so no card
/// identity survives across runs. Immutable after mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: String,
    pub question: String,
    pub answer: String,
}

/// Result of one generation invocation.
///
/// Transient by design — callers display or persist the cards and drop the
/// rest. `warning` is non-blocking advisory text (currently only input
/// truncation) that accompanies an otherwise successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOutput {
    /// The generated deck, in model output order. 0..=25 cards.
    pub cards: Vec<Flashcard>,
    /// Advisory message to surface alongside the cards, if any.
    pub warning: Option<String>,
    /// Timing and size statistics for the run.
    pub stats: GenerationStats,
}

impl GenerationOutput {
    /// An output with no cards and no warning, used when the input text is
    /// empty and no remote call is made.
    pub(crate) fn empty() -> Self {
        Self {
            cards: Vec::new(),
            warning: None,
            stats: GenerationStats::default(),
        }
    }
}

/// Statistics for a single generation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Character count of the input text before truncation.
    pub input_chars: usize,
    /// Character count actually sent to the model.
    pub processed_chars: usize,
    /// Whether the input was truncated to fit the character budget.
    pub truncated: bool,
    /// Number of cards in the final deck.
    pub card_count: usize,
    /// Wall-clock time spent in the remote call.
    pub request_duration_ms: u64,
    /// Wall-clock time for the whole invocation.
    pub total_duration_ms: u64,
}
