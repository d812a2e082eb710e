//! In-memory adapters for board tests and offline development.

mod gateway;
mod live;
mod notifier;

pub use gateway::InMemoryBoardGateway;
pub use live::{LiveEventQueue, QueuedLiveSource};
pub use notifier::RecordingNotifier;
