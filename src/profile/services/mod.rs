//! Application services for profile management.

mod account;

pub use account::{
    ProfileService, ProfileServiceError, ProfileServiceResult, UpdateProfileRequest,
};
