//! Error types for the pdf2cards library.
//!
//! A single [`Pdf2CardsError`] enum covers every failure the pipeline can
//! produce. The variants mirror the stages: input validation, PDF text
//! extraction, the remote chat-completion call, response parsing, and export.
//!
//! Two deliberate asymmetries:
//!
//! * **Remote status 500** is messaged as "file too large" rather than a
//!   generic HTTP error — the endpoint answers 500 when the prompt exceeds
//!   what the model can take, and that is by far the most common cause.
//! * **Persistence failures never appear here.** [`crate::store::CardStore`]
//!   absorbs and logs them so a full disk or unreadable deck file can never
//!   block generation; a missing deck simply loads as empty.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the pdf2cards library.
#[derive(Debug, Error)]
pub enum Pdf2CardsError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{}'\nCheck the path exists and is readable.", path.display())]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{}'\nTry: chmod +r '{}'", path.display(), path.display())]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{}'\nFirst bytes: {magic:?}", path.display())]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// PDF text extraction failed (corrupt, encrypted, or image-only PDF).
    #[error("Error processing PDF: {detail}\nPlease try another file.")]
    PdfProcessing { detail: String },

    // ── Remote generator errors ───────────────────────────────────────────
    /// The AI endpoint returned a non-success HTTP status.
    ///
    /// Status 500 means the prompt was too large for the model, so it gets
    /// the dedicated "file too large" message instead of the generic one.
    #[error("{}", remote_status_message(.status))]
    Remote { status: u16 },

    /// The request never produced an HTTP response (DNS, TLS, connection).
    #[error("Failed to reach the AI endpoint: {detail}")]
    Network { detail: String },

    /// The endpoint answered 200 but the first choice had no content.
    #[error("No content received from the AI for flashcards.")]
    EmptyResponse,

    /// Response content could not be parsed as a flashcard array after all
    /// extraction heuristics.
    #[error(
        "Failed to parse flashcards: the AI response was not valid JSON ({detail}).\n\
         Please try with a shorter text or different content."
    )]
    MalformedResponse { detail: String },

    /// The model explicitly judged the source text non-academic.
    #[error("{reason}")]
    InvalidContent { reason: String },

    // ── Export errors ─────────────────────────────────────────────────────
    /// PDF export rendering failed.
    #[error("Failed to generate PDF: {detail}\nPlease try again.")]
    PdfExport { detail: String },

    /// Could not create or write an output file.
    #[error("Failed to write output file '{}': {source}", path.display())]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

fn remote_status_message(status: &u16) -> String {
    if *status == 500 {
        "Your PDF file was too large for the AI to process. \
         Please try with a smaller file or extract relevant sections."
            .to_string()
    } else {
        format!(
            "Failed to generate flashcards: the AI endpoint returned HTTP {status}. \
             Please try again."
        )
    }
}
