//! In-memory adapters for profile persistence.

mod profile;

pub use profile::InMemoryProfileStore;
