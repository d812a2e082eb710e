//! When steps for drag reconciliation BDD scenarios.

use rstest_bdd_macros::when;

use stageboard::board::domain::{ColumnKey, DragEvent};

use super::world::{DragWorld, run_async};

fn current_column(world: &DragWorld) -> Result<ColumnKey, eyre::Report> {
    let card_id = world.card_id()?;
    world
        .store
        .snapshot()
        .grouped
        .locate(&card_id)
        .ok_or_else(|| eyre::eyre!("card is not on the board"))
}

fn drag_to(world: &mut DragWorld, target: ColumnKey) -> Result<(), eyre::Report> {
    let source = current_column(world)?;
    let event = DragEvent::new(world.card_id()?, source, Some(target));
    let outcome = run_async(world.reconciler.submit(&event));
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"the card is dragged to stage "{stage_title}""#)]
fn card_dragged_to_stage(world: &mut DragWorld, stage_title: String) -> Result<(), eyre::Report> {
    let stage_id = world.stage_id(&stage_title)?;
    drag_to(world, ColumnKey::Stage(stage_id))
}

#[when("the card is dragged to the unassigned column")]
fn card_dragged_to_unassigned(world: &mut DragWorld) -> Result<(), eyre::Report> {
    drag_to(world, ColumnKey::Unassigned)
}
