//! Stageboard: headless Kanban board engine for CRM task management.
//!
//! This crate provides the state core behind a drag-and-drop task board:
//! loading workflow stages and task cards, grouping tasks into columns,
//! applying optimistic stage reassignments with rollback, and merging
//! live-update events into the in-memory board cache.
//!
//! # Architecture
//!
//! Stageboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure board logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (GraphQL wire layer,
//!   in-memory test doubles)
//! - **Services**: Orchestration of loading, reconciliation, and live merge
//!
//! The GraphQL transport, the UI widget kit, routing, and authentication are
//! consumed collaborators behind ports; none of them is implemented here.

pub mod board;
