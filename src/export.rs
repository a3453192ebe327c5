//! Deck export: plain text and PDF downloads.
//!
//! The text format is the numbered Q/A list; the PDF is a single letter-sized
//! portrait page with the cards laid out top-down, wrapped to the page width
//! and capped at the page height — cards past the cap are dropped, the same
//! one-page snapshot the study view produces.

use crate::error::Pdf2CardsError;
use crate::output::Flashcard;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, warn};

// Letter portrait, in millimetres.
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 5.5;
const FONT_SIZE_PT: f32 = 11.0;
/// Greedy-wrap width in characters for 11 pt Helvetica on a letter page.
const WRAP_CHARS: usize = 95;

// ── Plain text ───────────────────────────────────────────────────────────

/// Render the deck as numbered Q/A text.
///
/// ```text
/// 1. Question: What is osmosis?
///    Answer: Diffusion of water across a membrane.
/// ```
pub fn format_txt(cards: &[Flashcard]) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            format!(
                "{}. Question: {}\n   Answer: {}",
                i + 1,
                card.question,
                card.answer
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Write the deck as `flashcards.txt`-style plain text.
pub fn export_txt(cards: &[Flashcard], path: impl AsRef<Path>) -> Result<(), Pdf2CardsError> {
    let path = path.as_ref();
    std::fs::write(path, format_txt(cards)).map_err(|e| Pdf2CardsError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("Exported {} cards to '{}'", cards.len(), path.display());
    Ok(())
}

// ── PDF ──────────────────────────────────────────────────────────────────

/// Write the deck as a one-page letter-sized PDF.
///
/// Content that does not fit the page is dropped with a warning; the export
/// never grows a second page.
pub fn export_pdf(cards: &[Flashcard], path: impl AsRef<Path>) -> Result<(), Pdf2CardsError> {
    let path = path.as_ref();

    let (doc, page, layer) = PdfDocument::new(
        "Flashcards",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Cards",
    );
    let body = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Pdf2CardsError::PdfExport {
            detail: e.to_string(),
        })?;
    let heading = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| Pdf2CardsError::PdfExport {
            detail: e.to_string(),
        })?;

    let layer = doc.get_page(page).get_layer(layer);
    let rendered = render_cards(&layer, cards, &heading, &body);
    if rendered < cards.len() {
        warn!(
            "PDF export capped at one page: rendered {}/{} cards",
            rendered,
            cards.len()
        );
    }

    let file = File::create(path).map_err(|e| Pdf2CardsError::OutputWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| Pdf2CardsError::PdfExport {
            detail: e.to_string(),
        })?;

    debug!("Exported {} cards to '{}'", rendered, path.display());
    Ok(())
}

/// Lay the cards out top-down; returns how many fit the page.
fn render_cards(
    layer: &PdfLayerReference,
    cards: &[Flashcard],
    heading: &IndirectFontRef,
    body: &IndirectFontRef,
) -> usize {
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;
    let mut rendered = 0;

    for (i, card) in cards.iter().enumerate() {
        let question_lines = wrap_text(&card.question, WRAP_CHARS);
        let answer_lines = wrap_text(&card.answer, WRAP_CHARS);
        // 2 heading lines + body lines + inter-card gap.
        let needed =
            LINE_HEIGHT_MM * (2 + question_lines.len() + answer_lines.len()) as f32 + LINE_HEIGHT_MM;
        if y - needed < MARGIN_MM {
            break;
        }

        layer.use_text(
            format!("{}. Question:", i + 1),
            FONT_SIZE_PT,
            Mm(MARGIN_MM),
            Mm(y),
            heading,
        );
        y -= LINE_HEIGHT_MM;
        for line in &question_lines {
            layer.use_text(line.clone(), FONT_SIZE_PT, Mm(MARGIN_MM + 4.0), Mm(y), body);
            y -= LINE_HEIGHT_MM;
        }

        layer.use_text("Answer:", FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), heading);
        y -= LINE_HEIGHT_MM;
        for line in &answer_lines {
            layer.use_text(line.clone(), FONT_SIZE_PT, Mm(MARGIN_MM + 4.0), Mm(y), body);
            y -= LINE_HEIGHT_MM;
        }

        y -= LINE_HEIGHT_MM; // gap between cards
        rendered += 1;
    }

    rendered
}

/// Greedy word wrap at `max_chars` characters per line.
///
/// Words longer than the budget get a line of their own rather than being
/// split mid-word.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
