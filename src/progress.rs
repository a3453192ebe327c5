//! Progress-callback trait for per-stage generation events.
//!
//! Inject an [`Arc<dyn GenerationProgressCallback>`] via
//! [`crate::config::GenerationConfigBuilder::progress_callback`] to receive
//! events as the pipeline moves through its stages. The stages are exactly
//! the states of one generation invocation; any stage can fail, and a failure
//! terminates the invocation.
//!
//! Callbacks are the least-invasive integration point: the CLI drives a
//! terminal spinner with them, and an embedder can forward them to whatever
//! channel its host application uses, without the library knowing anything
//! about either.

use std::fmt;
use std::sync::Arc;

/// The stage a generation invocation is currently in.
///
/// One invocation proceeds `Extracting → Truncating → Requesting → Parsing →
/// Mapping`, then completes (or fails from whichever stage erred).
/// Generation from raw text skips `Extracting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationStage {
    /// Extracting plain text from the PDF.
    Extracting,
    /// Enforcing the input character budget.
    Truncating,
    /// The remote chat-completion call is in flight.
    Requesting,
    /// Recovering and validating the JSON card array.
    Parsing,
    /// Assigning ids and building the final deck.
    Mapping,
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GenerationStage::Extracting => "extracting",
            GenerationStage::Truncating => "truncating",
            GenerationStage::Requesting => "requesting",
            GenerationStage::Parsing => "parsing",
            GenerationStage::Mapping => "mapping",
        };
        f.write_str(s)
    }
}

/// Called by the pipeline as one generation invocation progresses.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Implementations must be `Send + Sync`.
pub trait GenerationProgressCallback: Send + Sync {
    /// Called when the invocation enters a stage.
    fn on_stage(&self, stage: GenerationStage) {
        let _ = stage;
    }

    /// Called once when the invocation completes successfully.
    fn on_complete(&self, card_count: usize) {
        let _ = card_count;
    }

    /// Called once if the invocation fails, naming the stage that erred.
    fn on_error(&self, stage: GenerationStage, error: &str) {
        let _ = (stage, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl GenerationProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in
/// [`crate::config::GenerationConfig`].
pub type ProgressCallback = Arc<dyn GenerationProgressCallback>;
