//! Notifier adapter that logs notices through `tracing`.

use crate::board::ports::{BoardNotice, BoardNotifier};

/// Notifier that emits notices as `warn` events.
///
/// Hosts without a notification surface, and headless tooling, can use this
/// adapter to keep failures visible in logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl BoardNotifier for TracingNotifier {
    fn notify(&self, notice: &BoardNotice) {
        match notice {
            BoardNotice::StageUpdateFailed { task_id, reason } => {
                tracing::warn!(%task_id, %reason, "stage update failed");
            }
            BoardNotice::StageUpdateTimedOut { task_id } => {
                tracing::warn!(%task_id, "stage update timed out");
            }
        }
    }
}
