//! Input validation: check the user-supplied PDF path and read its bytes.
//!
//! We validate the PDF magic bytes (`%PDF`) before handing the data to the
//! extractor so callers get a meaningful error rather than an extraction
//! failure deep inside a third-party parser. File size past the guideline is
//! only warned about, not rejected — oversized inputs usually still extract
//! fine and are truncated to the character budget anyway.

use crate::error::Pdf2CardsError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Size guideline for uploads. Inputs past this are accepted with a warning.
pub const MAX_PDF_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// A validated PDF ready for text extraction.
#[derive(Debug)]
pub struct ResolvedPdf {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

/// Validate a local PDF path and read its contents.
pub fn resolve_pdf(path: impl AsRef<Path>) -> Result<ResolvedPdf, Pdf2CardsError> {
    let path = path.as_ref().to_path_buf();

    if !path.exists() {
        return Err(Pdf2CardsError::FileNotFound { path });
    }

    let bytes = match std::fs::read(&path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2CardsError::PermissionDenied { path });
        }
        Err(_) => {
            return Err(Pdf2CardsError::FileNotFound { path });
        }
    };

    if bytes.len() < 4 || &bytes[..4] != b"%PDF" {
        let mut magic = [0u8; 4];
        let n = bytes.len().min(4);
        magic[..n].copy_from_slice(&bytes[..n]);
        return Err(Pdf2CardsError::NotAPdf { path, magic });
    }

    if bytes.len() as u64 > MAX_PDF_SIZE_BYTES {
        warn!(
            "PDF '{}' is {} bytes, past the {} MB guideline — extraction may be slow \
             and the text will be truncated",
            path.display(),
            bytes.len(),
            MAX_PDF_SIZE_BYTES / (1024 * 1024)
        );
    }

    debug!("Resolved PDF: {} ({} bytes)", path.display(), bytes.len());
    Ok(ResolvedPdf { path, bytes })
}
