//! Step definitions for drag reconciliation behaviour tests.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
