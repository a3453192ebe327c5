//! Stale-result guard for concurrent generation invocations.
//!
//! Two invocations can be in flight at once (a regenerate issued while an
//! earlier run is still pending). Without coordination, whichever settles
//! last wins visibility — so a slow, stale response can overwrite a newer
//! deck. [`DeckSession`] replaces that race with generation tickets: every
//! invocation takes a monotonically increasing ticket before it starts, and a
//! commit is accepted only if no newer ticket has committed already. In-flight
//! work is never cancelled; its result is simply discarded on arrival.

use crate::output::Flashcard;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Ticket identifying one generation invocation within a session.
pub type GenerationTicket = u64;

#[derive(Default)]
struct Deck {
    generation: GenerationTicket,
    cards: Vec<Flashcard>,
}

/// Holder of the currently visible deck across generation invocations.
#[derive(Default)]
pub struct DeckSession {
    next_ticket: AtomicU64,
    current: Mutex<Deck>,
}

impl DeckSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a ticket for a new invocation. Later tickets always beat earlier
    /// ones, regardless of completion order.
    pub fn begin(&self) -> GenerationTicket {
        self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Commit an invocation's deck.
    ///
    /// Returns `true` if the deck became visible; `false` if a newer
    /// invocation already committed and this result was discarded.
    pub fn commit(&self, ticket: GenerationTicket, cards: Vec<Flashcard>) -> bool {
        let mut current = self.current.lock().unwrap();
        if ticket < current.generation {
            debug!(
                "Discarding stale generation {} (current is {})",
                ticket, current.generation
            );
            return false;
        }
        current.generation = ticket;
        current.cards = cards;
        true
    }

    /// Snapshot of the currently visible deck.
    pub fn cards(&self) -> Vec<Flashcard> {
        self.current.lock().unwrap().cards.clone()
    }

    /// Drop the visible deck (input text was cleared).
    ///
    /// Clearing consumes a ticket of its own, so an invocation that was begun
    /// before the clear can no longer commit and resurrect the old deck.
    pub fn clear(&self) {
        let ticket = self.begin();
        let mut current = self.current.lock().unwrap();
        current.generation = ticket;
        current.cards.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Flashcard {
        Flashcard {
            id: id.to_string(),
            question: "Q".into(),
            answer: "A".into(),
        }
    }

    #[test]
    fn tickets_increase_monotonically() {
        let session = DeckSession::new();
        let a = session.begin();
        let b = session.begin();
        assert!(b > a);
    }

    #[test]
    fn later_commit_wins() {
        let session = DeckSession::new();
        let first = session.begin();
        let second = session.begin();

        assert!(session.commit(first, vec![card("old")]));
        assert!(session.commit(second, vec![card("new")]));
        assert_eq!(session.cards()[0].id, "new");
    }

    #[test]
    fn stale_commit_is_discarded() {
        let session = DeckSession::new();
        let first = session.begin();
        let second = session.begin();

        // The newer invocation settles first; the older one must not win.
        assert!(session.commit(second, vec![card("new")]));
        assert!(!session.commit(first, vec![card("old")]));
        assert_eq!(session.cards()[0].id, "new");
    }

    #[test]
    fn clear_empties_the_visible_deck() {
        let session = DeckSession::new();
        let t = session.begin();
        session.commit(t, vec![card("x")]);
        session.clear();
        assert!(session.cards().is_empty());
    }

    #[test]
    fn commit_begun_before_a_clear_cannot_resurrect_the_deck() {
        let session = DeckSession::new();
        let in_flight = session.begin();
        session.clear();

        assert!(!session.commit(in_flight, vec![card("stale")]));
        assert!(session.cards().is_empty());
    }

    #[test]
    fn generation_after_a_clear_still_commits() {
        let session = DeckSession::new();
        session.clear();
        let t = session.begin();

        assert!(session.commit(t, vec![card("fresh")]));
        assert_eq!(session.cards()[0].id, "fresh");
    }
}
