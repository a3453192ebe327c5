//! # pdf2cards
//!
//! Turn PDF documents into study flashcards with an AI model.
//!
//! The pipeline extracts text from a PDF, trims it to a fixed character
//! budget, asks a chat-completion endpoint for question/answer pairs, and
//! validates the response into an identified deck:
//!
//! ```text
//! PDF file ──► extract ──► truncate ──► prompt + remote call ──► parse ──► map
//!                                                                          │
//!                                  Vec<Flashcard> { id, question, answer } ◄┘
//! ```
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use pdf2cards::{generate, GenerationConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GenerationConfig::default();
//!     let output = generate("notes.pdf", &config).await?;
//!
//!     for card in &output.cards {
//!         println!("Q: {}\nA: {}\n", card.question, card.answer);
//!     }
//!     if let Some(warning) = &output.warning {
//!         eprintln!("note: {warning}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Pieces
//!
//! * [`generate`] / [`generate_from_text`] / [`generate_sync`] — the pipeline
//!   entry points.
//! * [`GenerationConfig`] — endpoint, model, budgets, and injection points
//!   (remote generator, progress callback).
//! * [`CardStore`] — pluggable deck persistence ([`JsonFileStore`] on disk,
//!   [`MemoryStore`] for tests and embedders).
//! * [`DeckSession`] — stale-result guard when invocations overlap.
//! * [`export`] — the deck as numbered plain text or a one-page PDF.
//!
//! Content judgment is delegated entirely to the model: non-academic input is
//! reported as [`Pdf2CardsError::InvalidContent`] with the model's reason, not
//! detected locally.

pub mod config;
pub mod error;
pub mod export;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod session;
pub mod store;

pub use config::{GenerationConfig, GenerationConfigBuilder, DEFAULT_ENDPOINT, DEFAULT_MODEL};
pub use error::Pdf2CardsError;
pub use export::{export_pdf, export_txt, format_txt};
pub use generate::{generate, generate_from_text, generate_sync};
pub use output::{Flashcard, GenerationOutput, GenerationStats};
pub use pipeline::llm::{ChatMessage, ChatRequest, HttpGenerator, RemoteGenerator};
pub use progress::{GenerationProgressCallback, GenerationStage, NoopProgressCallback, ProgressCallback};
pub use session::{DeckSession, GenerationTicket};
pub use store::{CardStore, JsonFileStore, MemoryStore};
