//! Generation orchestrator: the end-to-end PDF → flashcards pipeline.
//!
//! [`generate`] runs the full chain (resolve → extract → truncate → prompt →
//! remote call → parse → map); [`generate_from_text`] enters after extraction
//! for callers that already hold plain text. Stages run strictly in sequence —
//! there is no partial output, and the first failing stage terminates the
//! invocation with its error.
//!
//! The orchestrator owns no policy of its own: limits come from
//! [`GenerationConfig`], prompt text from [`crate::prompts`], transport from
//! the configured [`RemoteGenerator`]. What it adds is sequencing, timing
//! stats, and progress reporting.

use crate::config::GenerationConfig;
use crate::error::Pdf2CardsError;
use crate::output::{GenerationOutput, GenerationStats};
use crate::pipeline::extract::{extract_text, has_extractable_text};
use crate::pipeline::input::resolve_pdf;
use crate::pipeline::llm::{build_request, HttpGenerator, RemoteGenerator};
use crate::pipeline::map::to_flashcards;
use crate::pipeline::parse::parse_cards;
use crate::pipeline::truncate::truncate_input;
use crate::progress::GenerationStage;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Generate flashcards from a PDF file.
///
/// Resolves and validates the file, extracts its text, then delegates to
/// [`generate_from_text`]. A PDF with no extractable text (scanned images,
/// empty pages) fails with [`Pdf2CardsError::PdfProcessing`] before any
/// remote call is made.
pub async fn generate(
    path: impl AsRef<Path>,
    config: &GenerationConfig,
) -> Result<GenerationOutput, Pdf2CardsError> {
    let started = Instant::now();
    let path = path.as_ref();
    info!("Generating flashcards from '{}'", path.display());

    report_stage(config, GenerationStage::Extracting);
    let resolved = resolve_pdf(path).inspect_err(|e| {
        report_error(config, GenerationStage::Extracting, e);
    })?;
    let text = extract_text(resolved.bytes).await.inspect_err(|e| {
        report_error(config, GenerationStage::Extracting, e);
    })?;

    if !has_extractable_text(&text) {
        let err = Pdf2CardsError::PdfProcessing {
            detail: format!(
                "no extractable text in '{}' (scanned or image-only PDF?)",
                path.display()
            ),
        };
        report_error(config, GenerationStage::Extracting, &err);
        return Err(err);
    }

    let mut output = generate_from_text(&text, config).await?;
    output.stats.total_duration_ms = started.elapsed().as_millis() as u64;
    Ok(output)
}

/// Generate flashcards from already-extracted plain text.
///
/// Empty (or whitespace-only) text is not an error: it produces an empty
/// output without contacting the remote service, mirroring a cleared input
/// field. Otherwise the text is truncated to the configured budget, sent to
/// the model, and the response parsed and mapped into the final deck.
pub async fn generate_from_text(
    text: &str,
    config: &GenerationConfig,
) -> Result<GenerationOutput, Pdf2CardsError> {
    let started = Instant::now();

    if text.trim().is_empty() {
        debug!("Input text is empty; skipping generation");
        report_complete(config, 0);
        return Ok(GenerationOutput::empty());
    }

    report_stage(config, GenerationStage::Truncating);
    let input_chars = text.chars().count();
    let (processed, warning) = truncate_input(text, config.max_input_chars);
    // Chars of the caller's text actually kept, excluding the marker.
    let processed_chars = input_chars.min(config.max_input_chars);

    report_stage(config, GenerationStage::Requesting);
    let request = build_request(&processed, config);
    let generator = resolve_generator(config);
    let request_started = Instant::now();
    let content = generator.complete(&request).await.inspect_err(|e| {
        report_error(config, GenerationStage::Requesting, e);
    })?;
    let request_duration_ms = request_started.elapsed().as_millis() as u64;

    report_stage(config, GenerationStage::Parsing);
    let raw = parse_cards(&content, config.max_cards).inspect_err(|e| {
        report_error(config, GenerationStage::Parsing, e);
    })?;

    report_stage(config, GenerationStage::Mapping);
    let cards = to_flashcards(raw);

    let stats = GenerationStats {
        input_chars,
        processed_chars,
        truncated: warning.is_some(),
        card_count: cards.len(),
        request_duration_ms,
        total_duration_ms: started.elapsed().as_millis() as u64,
    };
    info!(
        "Generated {} cards in {} ms ({} ms remote)",
        stats.card_count, stats.total_duration_ms, stats.request_duration_ms
    );

    report_complete(config, cards.len());
    Ok(GenerationOutput {
        cards,
        warning,
        stats,
    })
}

/// Blocking wrapper around [`generate`] for synchronous callers.
///
/// Spins up a temporary runtime per call; do not use from within an async
/// context.
pub fn generate_sync(
    path: impl AsRef<Path>,
    config: &GenerationConfig,
) -> Result<GenerationOutput, Pdf2CardsError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2CardsError::Internal(format!("failed to create runtime: {e}")))?;
    runtime.block_on(generate(path, config))
}

fn resolve_generator(config: &GenerationConfig) -> Arc<dyn RemoteGenerator> {
    match &config.generator {
        Some(generator) => Arc::clone(generator),
        None => Arc::new(HttpGenerator::from_config(config)),
    }
}

fn report_stage(config: &GenerationConfig, stage: GenerationStage) {
    if let Some(cb) = &config.progress_callback {
        cb.on_stage(stage);
    }
}

fn report_complete(config: &GenerationConfig, card_count: usize) {
    if let Some(cb) = &config.progress_callback {
        cb.on_complete(card_count);
    }
}

fn report_error(config: &GenerationConfig, stage: GenerationStage, error: &Pdf2CardsError) {
    if let Some(cb) = &config.progress_callback {
        cb.on_error(stage, &error.to_string());
    }
}
