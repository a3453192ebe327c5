//! Pipeline stages for PDF-to-flashcards generation.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap
//! implementations (e.g. a different extraction backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ truncate ──▶ llm ──▶ parse ──▶ map
//! (path)   (pdf text)  (char cap)  (chat)   (JSON)    (ids)
//! ```
//!
//! 1. [`input`]    — validate the user-supplied PDF path and read its bytes
//! 2. [`extract`]  — pull plain text out of the PDF; runs in `spawn_blocking`
//!    because extraction is CPU-bound
//! 3. [`truncate`] — enforce the input character budget, emitting a warning
//!    when text had to be dropped
//! 4. [`llm`]      — build the chat payload and drive the remote call; the
//!    only stage with network I/O
//! 5. [`parse`]    — recover a JSON card array from the possibly fenced or
//!    noisy response and schema-validate it
//! 6. [`map`]      — assign positional ids and produce the final deck

pub mod extract;
pub mod input;
pub mod llm;
pub mod map;
pub mod parse;
pub mod truncate;
