//! Unit tests for the tracing notifier adapter.

use rstest::rstest;

use super::fixtures::task_id;
use crate::board::{
    adapters::notify::TracingNotifier,
    ports::{BoardNotice, BoardNotifier},
};

#[rstest]
fn every_notice_kind_is_accepted() -> eyre::Result<()> {
    let notifier = TracingNotifier;

    notifier.notify(&BoardNotice::StageUpdateFailed {
        task_id: task_id("t1")?,
        reason: "stage update rejected".to_owned(),
    });
    notifier.notify(&BoardNotice::StageUpdateTimedOut {
        task_id: task_id("t1")?,
    });
    Ok(())
}
