//! Error types for profile domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain profile values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileDomainError {
    /// The display name is empty after trimming.
    #[error("display name must not be empty")]
    EmptyDisplayName,

    /// The colour value is not in the palette.
    #[error("unknown user colour: {0}")]
    UnknownColor(String),
}
