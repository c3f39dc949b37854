//! In-memory adapters for board persistence.

mod task;

pub use task::InMemoryTaskStore;
