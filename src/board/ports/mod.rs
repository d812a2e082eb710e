//! Port contracts for the board core.
//!
//! Ports define infrastructure-agnostic interfaces: the data/mutation
//! gateway, the live-update stream, and the notification sink.

pub mod gateway;
pub mod live;
pub mod notifier;

pub use gateway::{
    BoardGateway, GatewayError, GatewayResult, Pagination, SortOrder, Sorter, StageQuery,
    StageSortField, TaskQuery, TaskSortField, TransportError,
};
pub use live::{LiveAction, LiveEvent, LiveEventSource, ResourceKind};
pub use notifier::{BoardNotice, BoardNotifier};
