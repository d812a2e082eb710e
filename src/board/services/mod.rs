//! Application services orchestrating the board core.

mod editor;
mod live;
mod loader;
mod reconcile;
mod store;

pub use editor::{EditorError, TaskEditor};
pub use live::LiveFeed;
pub use loader::{BoardLoader, LoadError};
pub use reconcile::{DragDisposition, DragReconciler, ReconcileError};
pub use store::{BoardPhase, BoardSnapshot, BoardStore, BoardStoreError};
