//! Recording notifier for board tests.

use std::sync::{Arc, Mutex};

use crate::board::ports::{BoardNotice, BoardNotifier};

/// Notifier that records every notice it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<BoardNotice>>>,
}

impl RecordingNotifier {
    /// Creates an empty recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded notices, in delivery order.
    #[must_use]
    pub fn notices(&self) -> Vec<BoardNotice> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl BoardNotifier for RecordingNotifier {
    fn notify(&self, notice: &BoardNotice) {
        if let Ok(mut guard) = self.notices.lock() {
            guard.push(notice.clone());
        }
    }
}
