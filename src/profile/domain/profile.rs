//! Profile aggregate root.

use super::{ProfileDomainError, UserColor};
use crate::board::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Workspace member profile.
///
/// The id is the auth provider's user id; a profile row is provisioned at
/// signup and only its editable fields change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    id: UserId,
    display_name: String,
    avatar_url: Option<String>,
    user_color: Option<UserColor>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProfileData {
    /// Persisted member identifier.
    pub id: UserId,
    /// Persisted display name.
    pub display_name: String,
    /// Persisted avatar URL, if any.
    pub avatar_url: Option<String>,
    /// Persisted explicit colour, if any.
    pub user_color: Option<UserColor>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Creates a profile for a newly signed-up member.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyDisplayName`] when the name is
    /// blank.
    pub fn new(
        id: UserId,
        display_name: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, ProfileDomainError> {
        let display_name = validate_display_name(display_name.into())?;
        let timestamp = clock.utc();
        Ok(Self {
            id,
            display_name,
            avatar_url: None,
            user_color: None,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a profile from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProfileData) -> Self {
        Self {
            id: data.id,
            display_name: data.display_name,
            avatar_url: data.avatar_url,
            user_color: data.user_color,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the member identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }

    /// Returns the explicitly chosen colour, if any.
    #[must_use]
    pub const fn user_color(&self) -> Option<UserColor> {
        self.user_color
    }

    /// Returns the colour to render: the chosen one, or the deterministic
    /// fallback for this member's id.
    #[must_use]
    pub fn effective_color(&self) -> UserColor {
        self.user_color
            .unwrap_or_else(|| UserColor::fallback_for(self.id))
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the display name.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyDisplayName`] when the name is
    /// blank.
    pub fn set_display_name(
        &mut self,
        display_name: impl Into<String>,
    ) -> Result<(), ProfileDomainError> {
        self.display_name = validate_display_name(display_name.into())?;
        Ok(())
    }

    /// Replaces the avatar URL.
    pub fn set_avatar_url(&mut self, avatar_url: Option<String>) {
        self.avatar_url = avatar_url;
    }

    /// Replaces the chosen colour; `None` returns to the fallback.
    pub const fn set_user_color(&mut self, user_color: Option<UserColor>) {
        self.user_color = user_color;
    }

    /// Records a mutation timestamp supplied by the caller.
    pub const fn touch_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }
}

/// Trims and validates a display name.
fn validate_display_name(name: String) -> Result<String, ProfileDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProfileDomainError::EmptyDisplayName);
    }
    Ok(trimmed.to_owned())
}
