//! Authentication context injected into mutating operations.
//!
//! The hosted auth provider is an external collaborator; services only need
//! to know who the current actor is. Passing the context explicitly keeps
//! session state out of module-level singletons and makes tests trivial.

use crate::board::domain::UserId;

/// Identity of the actor issuing a request, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthContext {
    user: Option<UserId>,
}

impl AuthContext {
    /// Creates a context for an authenticated user.
    #[must_use]
    pub const fn authenticated(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    /// Creates a context with no authenticated actor.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }

    /// Returns the current actor, or `None` when unauthenticated.
    #[must_use]
    pub const fn current_user(&self) -> Option<UserId> {
        self.user
    }
}
