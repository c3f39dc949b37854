//! Kanban board for the Videomaker Log workspace.
//!
//! This module owns the one cross-record invariant in the system: strict
//! ordering of active tasks by `position` within each status column. Tasks
//! are created at the end of `todo`, cross-column drags append to the end of
//! the destination column, and the completed column can be swept into a
//! timestamped archive and restored back. The module follows hexagonal
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
