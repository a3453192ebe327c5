//! PDF text extraction via `pdf-extract`.
//!
//! Extraction is CPU-bound and the underlying parser is synchronous, so it
//! runs under `spawn_blocking` to keep it off the async executor's hot path.
//! Encrypted, corrupt, and image-only (scanned) PDFs all surface as
//! [`Pdf2CardsError::PdfProcessing`]; callers cannot distinguish them and do
//! not need to — the remedy is the same, try another file.

use crate::error::Pdf2CardsError;
use tracing::debug;

/// Extract plain text from PDF bytes.
///
/// Returns the concatenated text of all pages. The output is whatever the
/// extractor recovers — no normalisation beyond what the truncator needs,
/// since the model is tolerant of ragged whitespace.
pub async fn extract_text(bytes: Vec<u8>) -> Result<String, Pdf2CardsError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| Pdf2CardsError::Internal(format!("extraction task panicked: {e}")))?
        .map_err(|e| Pdf2CardsError::PdfProcessing {
            detail: e.to_string(),
        })?;

    debug!("Extracted {} chars of text", text.chars().count());
    Ok(text)
}

/// Whether extracted text is usable as generation input.
///
/// Scanned or image-only PDFs extract to nothing (or pure whitespace); those
/// need OCR, which is out of scope here.
pub fn has_extractable_text(text: &str) -> bool {
    !text.trim().is_empty()
}
