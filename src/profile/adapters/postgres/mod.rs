//! `PostgreSQL` adapters for profile persistence.

mod models;
mod store;

pub mod schema;

pub use store::{PostgresProfileStore, ProfilePgPool};
