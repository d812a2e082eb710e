//! End-to-end board flows: load, drag, rollback.

use eyre::{bail, ensure};
use rstest::rstest;
use std::sync::Arc;

use mockable::DefaultClock;
use stageboard::board::{
    adapters::memory::{InMemoryBoardGateway, RecordingNotifier},
    domain::{ColumnKey, DragEvent},
    ports::{BoardNotice, TransportError},
    services::{BoardLoader, BoardPhase, BoardStore, DragDisposition, DragReconciler, ReconcileError},
};

use super::helpers::{card, card_in, gateway, notifier, stage, stage_id, store, task_id};

type FlowReconciler = DragReconciler<InMemoryBoardGateway, RecordingNotifier, DefaultClock>;

fn reconciler(
    store: &Arc<BoardStore>,
    gateway: &Arc<InMemoryBoardGateway>,
    notifier: &Arc<RecordingNotifier>,
) -> FlowReconciler {
    DragReconciler::new(
        store.clone(),
        gateway.clone(),
        notifier.clone(),
        Arc::new(DefaultClock),
    )
}

async fn load_board(
    gateway: &Arc<InMemoryBoardGateway>,
    store: &Arc<BoardStore>,
) -> eyre::Result<()> {
    gateway.seed_stages(vec![stage("a", "TODO", 0)?, stage("b", "DONE", 5)?])?;
    gateway.seed_tasks(vec![
        card_in("t1", "Call the customer", "a")?,
        card("t2", "Untriaged request")?,
    ])?;
    BoardLoader::new(gateway.clone(), store.clone()).load().await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn loading_then_dragging_moves_the_card_between_columns(
    gateway: Arc<InMemoryBoardGateway>,
    store: Arc<BoardStore>,
    notifier: Arc<RecordingNotifier>,
) -> eyre::Result<()> {
    load_board(&gateway, &store).await?;
    let mut snapshots = store.subscribe();
    let flow = reconciler(&store, &gateway, &notifier);

    let event = DragEvent::new(
        task_id("t1")?,
        ColumnKey::Stage(stage_id("a")?),
        Some(ColumnKey::Stage(stage_id("b")?)),
    );
    let disposition = flow.submit(&event).await?;

    ensure!(matches!(disposition, DragDisposition::Committed(_)));
    ensure!(snapshots.has_changed()?);
    let snapshot = store.snapshot();
    ensure!(snapshot.phase == BoardPhase::Ready);
    ensure!(snapshot.grouped.locate(&task_id("t1")?) == Some(ColumnKey::Stage(stage_id("b")?)));
    ensure!(snapshot.grouped.unassigned.len() == 1);
    ensure!(notifier.notices().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_failed_drag_lands_the_card_back_in_its_origin_column(
    gateway: Arc<InMemoryBoardGateway>,
    store: Arc<BoardStore>,
    notifier: Arc<RecordingNotifier>,
) -> eyre::Result<()> {
    load_board(&gateway, &store).await?;
    let flow = reconciler(&store, &gateway, &notifier);
    gateway.fail_next_update(TransportError::graph("stage is archived", "409"))?;

    let event = DragEvent::new(
        task_id("t1")?,
        ColumnKey::Stage(stage_id("a")?),
        Some(ColumnKey::Stage(stage_id("b")?)),
    );
    let result = flow.submit(&event).await;

    let Err(ReconcileError::UpdateFailed { .. }) = result else {
        bail!("expected UpdateFailed, got {result:?}");
    };
    let snapshot = store.snapshot();
    ensure!(snapshot.grouped.locate(&task_id("t1")?) == Some(ColumnKey::Stage(stage_id("a")?)));
    ensure!(matches!(
        notifier.notices().first(),
        Some(BoardNotice::StageUpdateFailed { .. })
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigned_round_trip_survives_the_full_stack(
    gateway: Arc<InMemoryBoardGateway>,
    store: Arc<BoardStore>,
    notifier: Arc<RecordingNotifier>,
) -> eyre::Result<()> {
    load_board(&gateway, &store).await?;
    let flow = reconciler(&store, &gateway, &notifier);

    let park = DragEvent::new(
        task_id("t1")?,
        ColumnKey::Stage(stage_id("a")?),
        Some(ColumnKey::Unassigned),
    );
    flow.submit(&park).await?;
    ensure!(store.snapshot().grouped.locate(&task_id("t1")?) == Some(ColumnKey::Unassigned));

    let restore = DragEvent::new(
        task_id("t1")?,
        ColumnKey::Unassigned,
        Some(ColumnKey::Stage(stage_id("a")?)),
    );
    flow.submit(&restore).await?;

    let updates = gateway.recorded_stage_updates()?;
    ensure!(
        updates
            == vec![
                (task_id("t1")?, None),
                (task_id("t1")?, Some(stage_id("a")?)),
            ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cards_with_unknown_stages_stay_off_the_columns_but_visible(
    gateway: Arc<InMemoryBoardGateway>,
    store: Arc<BoardStore>,
) -> eyre::Result<()> {
    gateway.seed_stages(vec![stage("a", "TODO", 0)?])?;
    gateway.seed_tasks(vec![card_in("t1", "Points nowhere", "vanished")?])?;

    BoardLoader::new(gateway.clone(), store.clone()).load().await?;

    let snapshot = store.snapshot();
    ensure!(snapshot.grouped.columns.iter().all(|column| column.tasks.is_empty()));
    ensure!(snapshot.grouped.unassigned.is_empty());
    ensure!(snapshot.grouped.orphaned.len() == 1);
    ensure!(snapshot.grouped.locate(&task_id("t1")?).is_none());
    Ok(())
}
