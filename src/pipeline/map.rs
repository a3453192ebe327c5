//! Flashcard mapping: assign positional ids to parsed records.
//!
//! Pure and total — there is no failure mode here. Ids are batch-local:
//! `flashcard-0 .. flashcard-(n-1)` in source order, reassigned from zero on
//! every generation.

use super::parse::RawCard;
use crate::output::Flashcard;

/// Convert parsed records into identified flashcards, preserving order.
pub fn to_flashcards(raw: Vec<RawCard>) -> Vec<Flashcard> {
    raw.into_iter()
        .enumerate()
        .map(|(i, card)| Flashcard {
            id: format!("flashcard-{i}"),
            question: card.question,
            answer: card.answer,
        })
        .collect()
}
