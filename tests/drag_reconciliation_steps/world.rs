//! Shared world state for drag reconciliation BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;

use stageboard::board::{
    adapters::memory::{InMemoryBoardGateway, RecordingNotifier},
    domain::{StageId, TaskId},
    services::{BoardStore, DragDisposition, DragReconciler, ReconcileError},
};

/// Reconciler type used by the BDD world.
pub type TestReconciler = DragReconciler<InMemoryBoardGateway, RecordingNotifier, DefaultClock>;

/// Scenario world for drag reconciliation behaviour tests.
pub struct DragWorld {
    pub store: Arc<BoardStore>,
    pub gateway: Arc<InMemoryBoardGateway>,
    pub notifier: Arc<RecordingNotifier>,
    pub reconciler: TestReconciler,
    pub stage_ids: HashMap<String, StageId>,
    pub card_id: Option<TaskId>,
    pub last_outcome: Option<Result<DragDisposition, ReconcileError>>,
}

impl DragWorld {
    /// Creates a world with an empty board.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(BoardStore::new());
        let gateway = Arc::new(InMemoryBoardGateway::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let reconciler = DragReconciler::new(
            store.clone(),
            gateway.clone(),
            notifier.clone(),
            Arc::new(DefaultClock),
        );

        Self {
            store,
            gateway,
            notifier,
            reconciler,
            stage_ids: HashMap::new(),
            card_id: None,
            last_outcome: None,
        }
    }

    /// Looks up the id recorded for a stage title.
    pub fn stage_id(&self, title: &str) -> Result<StageId, eyre::Report> {
        self.stage_ids
            .get(title)
            .cloned()
            .ok_or_else(|| eyre::eyre!("scenario never created stage {title}"))
    }

    /// Returns the card the scenario operates on.
    pub fn card_id(&self) -> Result<TaskId, eyre::Report> {
        self.card_id
            .clone()
            .ok_or_else(|| eyre::eyre!("scenario never created a card"))
    }
}

impl Default for DragWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DragWorld {
    DragWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
