//! Task creation and editing flows over the board cache.

use eyre::ensure;
use rstest::rstest;
use std::sync::Arc;

use stageboard::board::{
    adapters::memory::InMemoryBoardGateway,
    domain::{ColumnKey, TaskDraft, TaskPatch, add_card_path, stage_id_param},
    services::{BoardLoader, BoardStore, TaskEditor},
};

use super::helpers::{gateway, stage, stage_id, store};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_add_card_flow_round_trips_through_the_creation_route(
    gateway: Arc<InMemoryBoardGateway>,
    store: Arc<BoardStore>,
) -> eyre::Result<()> {
    gateway.seed_stages(vec![stage("a", "TODO", 0)?])?;
    BoardLoader::new(gateway.clone(), store.clone()).load().await?;

    // The column's add button routes to the creation form with the stage id
    // in the query string; the form reads it back into the draft.
    let path = add_card_path(&ColumnKey::Stage(stage_id("a")?));
    ensure!(path == "/tasks/new/?stageId=a");
    let target_stage = stage_id_param(path.split("stageId=").nth(1));

    let editor = TaskEditor::new(gateway.clone(), store.clone());
    let draft = TaskDraft::new("Card from the form")?.with_stage(target_stage);
    let created = editor.create(&draft).await?;

    let snapshot = store.snapshot();
    ensure!(snapshot.grouped.locate(created.id()) == Some(ColumnKey::Stage(stage_id("a")?)));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_flow_back_into_the_rendered_columns(
    gateway: Arc<InMemoryBoardGateway>,
    store: Arc<BoardStore>,
) -> eyre::Result<()> {
    gateway.seed_stages(vec![stage("a", "TODO", 0)?, stage("b", "DONE", 5)?])?;
    BoardLoader::new(gateway.clone(), store.clone()).load().await?;

    let editor = TaskEditor::new(gateway.clone(), store.clone());
    let created = editor
        .create(&TaskDraft::new("Keep me moving")?.with_stage(Some(stage_id("a")?)))
        .await?;

    let patch = TaskPatch::new()
        .with_stage(Some(stage_id("b")?))
        .with_description("Escalated by the account manager");
    let updated = editor.update(created.id(), &patch).await?;

    ensure!(updated.description() == Some("Escalated by the account manager"));
    let snapshot = store.snapshot();
    ensure!(snapshot.grouped.locate(created.id()) == Some(ColumnKey::Stage(stage_id("b")?)));

    editor.delete(created.id()).await?;
    ensure!(store.snapshot().grouped.is_empty());
    Ok(())
}
