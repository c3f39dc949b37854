//! Store port for profile persistence.

use crate::board::domain::UserId;
use crate::profile::domain::{Profile, UserColor};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for profile store operations.
pub type ProfileStoreResult<T> = Result<T, ProfileStoreError>;

/// Columns the deployed profile schema is known to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileCapabilities {
    /// The `profiles.user_color` column is present.
    pub user_color: bool,
}

impl ProfileCapabilities {
    /// Capabilities of a fully migrated schema.
    #[must_use]
    pub const fn current() -> Self {
        Self { user_color: true }
    }
}

impl Default for ProfileCapabilities {
    fn default() -> Self {
        Self::current()
    }
}

/// Partial update for a stored profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    /// Replacement display name.
    pub display_name: Option<String>,
    /// Replacement avatar URL (`Some(None)` clears it).
    pub avatar_url: Option<Option<String>>,
    /// Replacement colour (`Some(None)` returns to the fallback).
    pub user_color: Option<Option<UserColor>>,
    /// Mutation timestamp for the row.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Profile persistence contract.
///
/// Rows are provisioned by the auth provider at signup; the application
/// only reads and edits them.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Finds a profile by member id, returning `None` when absent.
    async fn find(&self, id: UserId) -> ProfileStoreResult<Option<Profile>>;

    /// Lists every profile, ordered by display name.
    async fn list(&self) -> ProfileStoreResult<Vec<Profile>>;

    /// Applies a partial update to an existing profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileStoreError::NotFound`] when the id is absent, or
    /// [`ProfileStoreError::SchemaMismatch`] when the patch touches
    /// `user_color` on a schema without that column.
    async fn update(&self, id: UserId, patch: ProfilePatch) -> ProfileStoreResult<()>;

    /// Reports which optional columns the deployed schema carries.
    fn capabilities(&self) -> ProfileCapabilities;
}

/// Errors returned by profile store implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileStoreError {
    /// The targeted profile does not exist.
    #[error("profile not found: {0}")]
    NotFound(UserId),

    /// A required field was missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced column is not present in the deployed schema.
    #[error("schema mismatch: column '{column}' not deployed")]
    SchemaMismatch {
        /// Missing column name.
        column: &'static str,
    },

    /// Network or service failure.
    #[error("transient store error: {0}")]
    Transient(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileStoreError {
    /// Wraps a transient persistence error.
    pub fn transient(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transient(Arc::new(err))
    }
}
