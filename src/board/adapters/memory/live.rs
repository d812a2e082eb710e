//! Queued live-event source backed by an in-process channel.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::board::ports::{LiveEvent, LiveEventSource};

/// Sending side of an in-process live channel.
#[derive(Debug, Clone)]
pub struct LiveEventQueue {
    sender: mpsc::UnboundedSender<LiveEvent>,
}

impl LiveEventQueue {
    /// Publishes an event; returns `false` when the source was dropped.
    #[must_use]
    pub fn publish(&self, event: LiveEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// In-process [`LiveEventSource`] for tests and offline development.
#[derive(Debug)]
pub struct QueuedLiveSource {
    receiver: mpsc::UnboundedReceiver<LiveEvent>,
}

impl QueuedLiveSource {
    /// Creates a connected queue/source pair.
    #[must_use]
    pub fn channel() -> (LiveEventQueue, Self) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (LiveEventQueue { sender }, Self { receiver })
    }
}

#[async_trait]
impl LiveEventSource for QueuedLiveSource {
    async fn next_event(&mut self) -> Option<LiveEvent> {
        self.receiver.recv().await
    }
}
