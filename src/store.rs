//! Deck persistence: one JSON-encoded flashcard array, last write wins.
//!
//! The store is an explicitly injected trait rather than a module-level
//! location so the orchestration layer can be exercised with an in-memory
//! double. Persistence is strictly best-effort:
//!
//! * `save` absorbs and logs failures (full disk, unwritable directory) —
//!   a deck that cannot be saved must never block the user who just
//!   generated it.
//! * `load` degrades to an empty deck on absence or any parse failure —
//!   "no saved data" is a normal state, not an error.
//!
//! There is no versioning and no merge: each save overwrites the previous
//! deck wholesale.

use crate::output::Flashcard;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// File name of the persisted deck under the data directory.
const DECK_FILE_NAME: &str = "flashcards.json";

/// Where a generated deck is saved and loaded from.
pub trait CardStore: Send + Sync {
    /// Overwrite the stored deck. Failures are logged, never propagated.
    fn save(&self, cards: &[Flashcard]);

    /// Load the stored deck, or an empty deck if absent or unreadable.
    fn load(&self) -> Vec<Flashcard>;
}

// ── File-backed store ────────────────────────────────────────────────────

/// [`CardStore`] backed by a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the deck at an explicit path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store the deck under the platform data directory
    /// (e.g. `~/.local/share/pdf2cards/flashcards.json` on Linux).
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn default_location() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("", "", "pdf2cards")?;
        Some(Self::new(dirs.data_dir().join(DECK_FILE_NAME)))
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CardStore for JsonFileStore {
    fn save(&self, cards: &[Flashcard]) {
        let json = match serde_json::to_string(cards) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialise deck, not saving: {e}");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create deck directory '{}': {e}", parent.display());
                return;
            }
        }

        // Atomic write: temp file + rename, so a crash never leaves a
        // half-written deck behind.
        let tmp = self.path.with_extension("json.tmp");
        if let Err(e) = std::fs::write(&tmp, &json) {
            warn!("Failed to write deck to '{}': {e}", tmp.display());
            return;
        }
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            warn!("Failed to move deck into place at '{}': {e}", self.path.display());
            return;
        }

        debug!("Saved {} cards to '{}'", cards.len(), self.path.display());
    }

    fn load(&self) -> Vec<Flashcard> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                debug!("No saved deck at '{}': {e}", self.path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str(&json) {
            Ok(cards) => cards,
            Err(e) => {
                warn!(
                    "Saved deck at '{}' is unreadable, treating as empty: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }
}

// ── In-memory store ──────────────────────────────────────────────────────

/// In-memory [`CardStore`] for tests and embedders without a filesystem.
///
/// Holds the serialised form so round-trips cover the same JSON path as
/// [`JsonFileStore`].
#[derive(Default)]
pub struct MemoryStore {
    deck: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CardStore for MemoryStore {
    fn save(&self, cards: &[Flashcard]) {
        match serde_json::to_string(cards) {
            Ok(json) => *self.deck.lock().unwrap() = Some(json),
            Err(e) => warn!("Failed to serialise deck, not saving: {e}"),
        }
    }

    fn load(&self) -> Vec<Flashcard> {
        self.deck
            .lock()
            .unwrap()
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Vec<Flashcard> {
        vec![
            Flashcard {
                id: "flashcard-0".into(),
                question: "What is osmosis?".into(),
                answer: "Diffusion of water across a membrane.".into(),
            },
            Flashcard {
                id: "flashcard-1".into(),
                question: "Define entropy.".into(),
                answer: "A measure of disorder.".into(),
            },
        ]
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new();
        assert!(store.load().is_empty());

        let cards = deck();
        store.save(&cards);
        assert_eq!(store.load(), cards);
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("flashcards.json"));

        let cards = deck();
        store.save(&cards);
        assert_eq!(store.load(), cards);
    }

    #[test]
    fn save_overwrites_the_previous_deck() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("flashcards.json"));

        store.save(&deck());
        store.save(&[]);
        assert!(store.load().is_empty());
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flashcards.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_into_unwritable_location_is_absorbed() {
        let store = JsonFileStore::new("/proc/definitely/not/writable/flashcards.json");
        store.save(&deck()); // must not panic or return an error
        assert!(store.load().is_empty());
    }
}
