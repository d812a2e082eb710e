//! Kanban board state management for Stageboard.
//!
//! This module implements the board core: stage and task repositories behind
//! a gateway port, a pure column grouper, an observable board store, and the
//! drag reconciler that applies optimistic stage reassignments and rolls them
//! back when the server rejects them. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
