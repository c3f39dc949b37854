//! Vmlog: collaboration-board core for the Videomaker Log team workspace.
//!
//! This crate implements the server-side model behind the workspace kanban
//! board: task ordering within status columns, drag-move reconciliation
//! against an optimistic client mirror, the completed-task archive sweep,
//! and member profiles with deterministic colour assignment.
//!
//! # Architecture
//!
//! Vmlog follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`auth`]: Injected authentication context for mutating operations
//! - [`board`]: Kanban task ordering, reconciliation, and archival
//! - [`profile`]: Member profiles and colour assignment

pub mod auth;
pub mod board;
pub mod profile;
