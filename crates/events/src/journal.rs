//! In-memory, append-only journal of the events decided in one session.

use chrono::Utc;
use uuid::Uuid;

use quotekit_core::SessionId;

use crate::{Event, EventEnvelope};

/// Append-only event log for a single session.
///
/// Single-threaded by construction: the session owns its journal and appends
/// after each accepted command. Discarded with the session.
#[derive(Debug, Clone)]
pub struct SessionJournal<E> {
    session_id: SessionId,
    entries: Vec<EventEnvelope<E>>,
}

impl<E: Event> SessionJournal<E> {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            entries: Vec::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Sequence number of the last recorded event (0 when empty).
    pub fn current_sequence(&self) -> u64 {
        self.entries.last().map(|e| e.sequence_number()).unwrap_or(0)
    }

    /// Record a batch of events, assigning consecutive sequence numbers.
    ///
    /// Returns the envelopes that were appended.
    pub fn append(&mut self, events: impl IntoIterator<Item = E>) -> &[EventEnvelope<E>] {
        let start = self.entries.len();
        let mut next = self.current_sequence() + 1;
        for event in events {
            let envelope = EventEnvelope::new(
                Uuid::now_v7(),
                self.session_id,
                next,
                event.event_type(),
                event.version(),
                Utc::now(),
                event,
            );
            tracing::trace!(
                session_id = %self.session_id,
                sequence = next,
                event_type = envelope.event_type(),
                "journaled event"
            );
            self.entries.push(envelope);
            next += 1;
        }
        &self.entries[start..]
    }

    pub fn entries(&self) -> &[EventEnvelope<E>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
