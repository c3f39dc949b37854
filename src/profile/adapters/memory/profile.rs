//! Thread-safe in-memory profile store for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::domain::UserId;
use crate::profile::{
    domain::Profile,
    ports::{
        ProfileCapabilities, ProfilePatch, ProfileStore, ProfileStoreError, ProfileStoreResult,
    },
};

/// Thread-safe in-memory profile store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    state: Arc<RwLock<HashMap<UserId, Profile>>>,
    capabilities: ProfileCapabilities,
}

impl InMemoryProfileStore {
    /// Creates an empty store with a fully migrated schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store simulating a schema without `user_color`.
    #[must_use]
    pub fn without_user_color() -> Self {
        Self {
            state: Arc::default(),
            capabilities: ProfileCapabilities { user_color: false },
        }
    }

    /// Seeds a provisioned profile, standing in for the auth provider's
    /// signup trigger.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileStoreError::Validation`] when the member already
    /// has a profile.
    pub fn seed(&self, profile: Profile) -> ProfileStoreResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.contains_key(&profile.id()) {
            return Err(ProfileStoreError::Validation(format!(
                "duplicate profile id: {}",
                profile.id()
            )));
        }
        state.insert(profile.id(), profile);
        Ok(())
    }
}

fn lock_error(err: impl ToString) -> ProfileStoreError {
    ProfileStoreError::transient(std::io::Error::other(err.to_string()))
}

fn apply_patch(profile: &mut Profile, patch: ProfilePatch) -> ProfileStoreResult<()> {
    if let Some(display_name) = patch.display_name {
        profile
            .set_display_name(display_name)
            .map_err(|err| ProfileStoreError::Validation(err.to_string()))?;
    }
    if let Some(avatar_url) = patch.avatar_url {
        profile.set_avatar_url(avatar_url);
    }
    if let Some(user_color) = patch.user_color {
        profile.set_user_color(user_color);
    }
    if let Some(at) = patch.updated_at {
        profile.touch_at(at);
    }
    Ok(())
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn find(&self, id: UserId) -> ProfileStoreResult<Option<Profile>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn list(&self) -> ProfileStoreResult<Vec<Profile>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut profiles: Vec<Profile> = state.values().cloned().collect();
        profiles.sort_by(|a, b| {
            a.display_name()
                .cmp(b.display_name())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(profiles)
    }

    async fn update(&self, id: UserId, patch: ProfilePatch) -> ProfileStoreResult<()> {
        if patch.user_color.is_some() && !self.capabilities.user_color {
            return Err(ProfileStoreError::SchemaMismatch {
                column: "user_color",
            });
        }
        let mut state = self.state.write().map_err(lock_error)?;
        let profile = state.get_mut(&id).ok_or(ProfileStoreError::NotFound(id))?;
        apply_patch(profile, patch)
    }

    fn capabilities(&self) -> ProfileCapabilities {
        self.capabilities
    }
}
