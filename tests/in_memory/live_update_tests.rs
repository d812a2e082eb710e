//! Live-update channel flows over the board cache.

use eyre::ensure;
use rstest::rstest;
use std::sync::Arc;

use stageboard::board::{
    adapters::memory::{InMemoryBoardGateway, QueuedLiveSource},
    domain::ColumnKey,
    ports::LiveEvent,
    services::{BoardLoader, BoardStore, LiveFeed},
};

use super::helpers::{card_in, gateway, stage, stage_id, store, task_id};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pushed_updates_move_cards_without_a_refetch(
    gateway: Arc<InMemoryBoardGateway>,
    store: Arc<BoardStore>,
) -> eyre::Result<()> {
    gateway.seed_stages(vec![stage("a", "TODO", 0)?, stage("b", "DONE", 5)?])?;
    gateway.seed_tasks(vec![card_in("t1", "Shared card", "a")?])?;
    BoardLoader::new(gateway.clone(), store.clone()).load().await?;

    let (queue, mut source) = QueuedLiveSource::channel();
    ensure!(queue.publish(LiveEvent::TaskUpdated(card_in("t1", "Shared card", "b")?)));
    ensure!(queue.publish(LiveEvent::TaskCreated(card_in("t2", "From a colleague", "a")?)));
    drop(queue);

    let applied = LiveFeed::new(store.clone()).run(&mut source).await?;

    ensure!(applied == 2);
    ensure!(gateway.task_list_calls()? == 1);
    let snapshot = store.snapshot();
    ensure!(snapshot.grouped.locate(&task_id("t1")?) == Some(ColumnKey::Stage(stage_id("b")?)));
    ensure!(snapshot.grouped.locate(&task_id("t2")?) == Some(ColumnKey::Stage(stage_id("a")?)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pushed_deletes_drop_cards_and_stages(
    gateway: Arc<InMemoryBoardGateway>,
    store: Arc<BoardStore>,
) -> eyre::Result<()> {
    gateway.seed_stages(vec![stage("a", "TODO", 0)?, stage("b", "DONE", 5)?])?;
    gateway.seed_tasks(vec![
        card_in("t1", "Doomed card", "a")?,
        card_in("t2", "Stranded card", "b")?,
    ])?;
    BoardLoader::new(gateway.clone(), store.clone()).load().await?;

    let (queue, mut source) = QueuedLiveSource::channel();
    ensure!(queue.publish(LiveEvent::TaskDeleted(task_id("t1")?)));
    ensure!(queue.publish(LiveEvent::StageDeleted(stage_id("b")?)));
    drop(queue);

    let applied = LiveFeed::new(store.clone()).run(&mut source).await?;

    ensure!(applied == 2);
    let snapshot = store.snapshot();
    ensure!(store.task(&task_id("t1")?)?.is_none());
    ensure!(snapshot.grouped.columns.len() == 1);
    ensure!(snapshot.grouped.orphaned.len() == 1);
    Ok(())
}
