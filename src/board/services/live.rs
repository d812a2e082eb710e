//! Live-update merging into the board store.

use std::sync::Arc;

use super::store::{BoardStore, BoardStoreError};
use crate::board::ports::LiveEventSource;

/// Drains a live-update stream into the board store.
///
/// Events are applied one at a time in arrival order; the stream is another
/// serialized input into the same update loop that handles fetch and drag
/// events.
pub struct LiveFeed {
    store: Arc<BoardStore>,
}

impl LiveFeed {
    /// Creates a feed over the given store.
    #[must_use]
    pub const fn new(store: Arc<BoardStore>) -> Self {
        Self { store }
    }

    /// Applies pushed events until the stream closes.
    ///
    /// Returns the number of applied events.
    ///
    /// # Errors
    ///
    /// Returns [`BoardStoreError`] when the store rejects an event.
    pub async fn run<S: LiveEventSource>(&self, source: &mut S) -> Result<usize, BoardStoreError> {
        let mut applied = 0_usize;
        while let Some(event) = source.next_event().await {
            tracing::debug!(resource = event.resource().as_str(), "live update received");
            self.store.apply_live_event(event)?;
            applied += 1;
        }
        Ok(applied)
    }
}
