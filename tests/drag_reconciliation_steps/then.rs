//! Then steps for drag reconciliation BDD scenarios.

use rstest_bdd_macros::then;

use stageboard::board::{
    domain::ColumnKey, ports::BoardNotice, services::ReconcileError,
};

use super::world::DragWorld;

#[then(r#"the card sits in stage "{stage_title}""#)]
fn card_sits_in_stage(world: &DragWorld, stage_title: String) -> Result<(), eyre::Report> {
    let expected = ColumnKey::Stage(world.stage_id(&stage_title)?);
    let located = world.store.snapshot().grouped.locate(&world.card_id()?);

    if located != Some(expected.clone()) {
        return Err(eyre::eyre!("expected the card in {expected}, found {located:?}"));
    }
    Ok(())
}

#[then("the card sits in the unassigned column")]
fn card_sits_in_unassigned(world: &DragWorld) -> Result<(), eyre::Report> {
    let located = world.store.snapshot().grouped.locate(&world.card_id()?);
    if located != Some(ColumnKey::Unassigned) {
        return Err(eyre::eyre!("expected the card unassigned, found {located:?}"));
    }
    Ok(())
}

#[then("exactly one stage update was issued")]
fn one_update_was_issued(world: &DragWorld) -> Result<(), eyre::Report> {
    let updates = world.gateway.recorded_stage_updates()?;
    if updates.len() != 1 {
        return Err(eyre::eyre!("expected one update, found {}", updates.len()));
    }
    Ok(())
}

#[then("no stage update was issued")]
fn no_update_was_issued(world: &DragWorld) -> Result<(), eyre::Report> {
    let updates = world.gateway.recorded_stage_updates()?;
    if !updates.is_empty() {
        return Err(eyre::eyre!("expected no updates, found {}", updates.len()));
    }
    Ok(())
}

#[then("a stage update failure was reported")]
fn failure_was_reported(world: &DragWorld) -> Result<(), eyre::Report> {
    let notices = world.notifier.notices();
    if !notices
        .iter()
        .any(|notice| matches!(notice, BoardNotice::StageUpdateFailed { .. }))
    {
        return Err(eyre::eyre!("expected a failure notice, found {notices:?}"));
    }

    match &world.last_outcome {
        Some(Err(ReconcileError::UpdateFailed { .. })) => Ok(()),
        other => Err(eyre::eyre!("expected an UpdateFailed outcome, found {other:?}")),
    }
}
