//! Port contracts for the kanban board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod store;

pub use store::{
    ArchiveScope, StoreCapabilities, TaskFilter, TaskPatch, TaskStore, TaskStoreError,
    TaskStoreResult,
};
