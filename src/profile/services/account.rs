//! Service layer for reading and editing the current member's profile.

use crate::auth::AuthContext;
use crate::board::domain::UserId;
use crate::profile::{
    domain::{Profile, ProfileDomainError, UserColor},
    ports::{ProfilePatch, ProfileStore, ProfileStoreError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for editing the caller's own profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProfileRequest {
    display_name: String,
    user_color: Option<UserColor>,
}

impl UpdateProfileRequest {
    /// Creates a request with the required display name and no explicit
    /// colour (the deterministic fallback applies).
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            user_color: None,
        }
    }

    /// Sets an explicitly chosen colour.
    #[must_use]
    pub const fn with_color(mut self, color: UserColor) -> Self {
        self.user_color = Some(color);
        self
    }
}

/// Service-level errors for profile operations.
#[derive(Debug, Error)]
pub enum ProfileServiceError {
    /// No authenticated actor was present for a mutating call.
    #[error("unauthorized: no authenticated actor")]
    Unauthorized,

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProfileDomainError),

    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] ProfileStoreError),
}

/// Result type for profile service operations.
pub type ProfileServiceResult<T> = Result<T, ProfileServiceError>;

/// Profile orchestration service.
#[derive(Clone)]
pub struct ProfileService<P, C>
where
    P: ProfileStore,
    C: Clock + Send + Sync,
{
    store: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> ProfileService<P, C>
where
    P: ProfileStore,
    C: Clock + Send + Sync,
{
    /// Creates a new profile service.
    #[must_use]
    pub const fn new(store: Arc<P>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Finds a member's profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Store`] when the lookup fails.
    pub async fn find(&self, id: UserId) -> ProfileServiceResult<Option<Profile>> {
        Ok(self.store.find(id).await?)
    }

    /// Returns every profile keyed by member id, for decorating task
    /// listings with author details.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Store`] when the listing fails.
    pub async fn directory(&self) -> ProfileServiceResult<HashMap<UserId, Profile>> {
        let profiles = self.store.list().await?;
        Ok(profiles
            .into_iter()
            .map(|profile| (profile.id(), profile))
            .collect())
    }

    /// Edits the caller's own profile.
    ///
    /// When the deployed schema predates the `user_color` column, the
    /// display name is still persisted and the colour is dropped with a
    /// logged warning rather than failing the whole edit.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileServiceError::Unauthorized`] without an actor,
    /// [`ProfileServiceError::Domain`] for a blank display name, or
    /// [`ProfileServiceError::Store`] when persistence fails.
    pub async fn update_profile(
        &self,
        auth: &AuthContext,
        request: UpdateProfileRequest,
    ) -> ProfileServiceResult<()> {
        let actor = auth
            .current_user()
            .ok_or(ProfileServiceError::Unauthorized)?;
        if request.display_name.trim().is_empty() {
            return Err(ProfileDomainError::EmptyDisplayName.into());
        }

        let mut patch = ProfilePatch {
            display_name: Some(request.display_name),
            updated_at: Some(self.clock.utc()),
            ..ProfilePatch::default()
        };
        if self.store.capabilities().user_color {
            patch.user_color = Some(request.user_color);
        } else {
            tracing::warn!("profile colour dropped: user_color column not deployed");
        }
        Ok(self.store.update(actor, patch).await?)
    }
}
