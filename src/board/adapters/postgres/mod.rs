//! `PostgreSQL` adapters for board persistence.

pub(crate) mod models;
mod store;

pub mod schema;

pub use store::{BoardPgPool, PostgresTaskStore};

#[cfg(test)]
pub(crate) use store::{row_to_task, to_new_row};
