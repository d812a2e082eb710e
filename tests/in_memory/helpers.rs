//! Shared helpers for in-memory board integration tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use rstest::fixture;
use std::sync::Arc;

use stageboard::board::{
    adapters::memory::{InMemoryBoardGateway, RecordingNotifier},
    domain::{Stage, StageId, TaskCard, TaskId},
    services::BoardStore,
};

static TRACING: Lazy<()> = Lazy::new(|| {
    let _result = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

/// Installs the test tracing subscriber once per binary.
pub fn init_tracing() {
    Lazy::force(&TRACING);
}

/// Provides a fresh in-memory gateway for each test.
#[fixture]
pub fn gateway() -> Arc<InMemoryBoardGateway> {
    init_tracing();
    Arc::new(InMemoryBoardGateway::new())
}

/// Provides a fresh board store for each test.
#[fixture]
pub fn store() -> Arc<BoardStore> {
    Arc::new(BoardStore::new())
}

/// Provides a recording notifier for each test.
#[fixture]
pub fn notifier() -> Arc<RecordingNotifier> {
    Arc::new(RecordingNotifier::new())
}

/// Base timestamp the builders count from.
pub fn epoch() -> eyre::Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid fixture timestamp"))
}

/// Builds a stage created `minutes` after the base timestamp.
pub fn stage(id: &str, title: &str, minutes: i64) -> eyre::Result<Stage> {
    Ok(Stage::new(
        StageId::new(id)?,
        title,
        epoch()? + Duration::minutes(minutes),
    )?)
}

/// Builds an unassigned card.
pub fn card(id: &str, title: &str) -> eyre::Result<TaskCard> {
    Ok(TaskCard::new(TaskId::new(id)?, title, epoch()?)?)
}

/// Builds a card assigned to the given stage.
pub fn card_in(id: &str, title: &str, stage_key: &str) -> eyre::Result<TaskCard> {
    Ok(card(id, title)?.with_stage(Some(StageId::new(stage_key)?)))
}

/// Builds a validated stage id.
pub fn stage_id(id: &str) -> eyre::Result<StageId> {
    Ok(StageId::new(id)?)
}

/// Builds a validated task id.
pub fn task_id(id: &str) -> eyre::Result<TaskId> {
    Ok(TaskId::new(id)?)
}
