//! Given steps for drag reconciliation BDD scenarios.

use chrono::{Duration, TimeZone, Utc};
use rstest_bdd_macros::given;

use stageboard::board::{
    domain::{Stage, StageId, TaskCard, TaskId},
    ports::TransportError,
};

use super::world::DragWorld;

#[given(r#"a board with stages "{first}" and "{second}""#)]
fn board_with_stages(
    world: &mut DragWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    let base = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid scenario timestamp"))?;

    let mut stages = Vec::new();
    for (index, title) in [first, second].into_iter().enumerate() {
        let id = StageId::new(format!("stage-{}", index + 1))?;
        let minutes = i64::try_from(index)?;
        stages.push(Stage::new(
            id.clone(),
            title.clone(),
            base + Duration::minutes(minutes),
        )?);
        world.stage_ids.insert(title, id);
    }

    world.gateway.seed_stages(stages.clone())?;
    world.store.set_stages(stages)?;
    Ok(())
}

#[given(r#"a card "{title}" in stage "{stage_title}""#)]
fn card_in_stage(
    world: &mut DragWorld,
    title: String,
    stage_title: String,
) -> Result<(), eyre::Report> {
    let base = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid scenario timestamp"))?;
    let stage_id = world.stage_id(&stage_title)?;
    let card_id = TaskId::new("card-1")?;
    let card = TaskCard::new(card_id.clone(), title, base)?.with_stage(Some(stage_id));

    world.gateway.seed_tasks(vec![card.clone()])?;
    world.store.set_tasks(vec![card])?;
    world.store.mark_ready()?;
    world.card_id = Some(card_id);
    Ok(())
}

#[given("the server rejects the next stage update")]
fn server_rejects_next_update(world: &mut DragWorld) -> Result<(), eyre::Report> {
    world
        .gateway
        .fail_next_update(TransportError::graph("stage update rejected", "409"))?;
    Ok(())
}
