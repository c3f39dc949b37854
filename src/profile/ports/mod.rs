//! Port contracts for member profiles.

pub mod store;

pub use store::{
    ProfileCapabilities, ProfilePatch, ProfileStore, ProfileStoreError, ProfileStoreResult,
};
