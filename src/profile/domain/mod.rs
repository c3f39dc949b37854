//! Domain model for member profiles.

mod color;
mod error;
mod profile;

pub use color::UserColor;
pub use error::ProfileDomainError;
pub use profile::{PersistedProfileData, Profile};
