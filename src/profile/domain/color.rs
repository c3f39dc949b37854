//! Member colour palette and deterministic fallback assignment.

use super::ProfileDomainError;
use crate::board::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Badge colour for a workspace member.
///
/// The palette is fixed; members without an explicitly chosen colour get a
/// deterministic entry derived from their id, so the same member renders
/// the same colour on every client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserColor {
    /// Indigo badge.
    Indigo,
    /// Emerald badge.
    Emerald,
    /// Rose badge.
    Rose,
    /// Amber badge.
    Amber,
    /// Violet badge.
    Violet,
    /// Cyan badge.
    Cyan,
    /// Pink badge.
    Pink,
    /// Orange badge.
    Orange,
    /// Blue badge.
    Blue,
}

impl UserColor {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Indigo => "indigo",
            Self::Emerald => "emerald",
            Self::Rose => "rose",
            Self::Amber => "amber",
            Self::Violet => "violet",
            Self::Cyan => "cyan",
            Self::Pink => "pink",
            Self::Orange => "orange",
            Self::Blue => "blue",
        }
    }

    /// Deterministically assigns a palette entry for a member id.
    ///
    /// Uses a djb2-style rolling hash over the id's canonical string form.
    /// Only the shifted term wraps to 32 bits; the accumulator and the
    /// final reduction run at full width, keeping the colours members
    /// already have stable.
    #[must_use]
    pub fn fallback_for(id: UserId) -> Self {
        let mut hash: i64 = 0;
        for byte in id.to_string().bytes() {
            hash = i64::from(byte) + wrap_to_i32(wrap_to_i32(hash) << 5) - hash;
        }
        match hash.unsigned_abs().rem_euclid(9) {
            0 => Self::Indigo,
            1 => Self::Emerald,
            2 => Self::Rose,
            3 => Self::Amber,
            4 => Self::Violet,
            5 => Self::Cyan,
            6 => Self::Pink,
            7 => Self::Orange,
            _ => Self::Blue,
        }
    }
}

/// Reduces a value to the signed 32-bit range by modular wrapping.
const fn wrap_to_i32(value: i64) -> i64 {
    let low = value & 0xFFFF_FFFF;
    if low >= 1 << 31 { low - (1 << 32) } else { low }
}

impl TryFrom<&str> for UserColor {
    type Error = ProfileDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "indigo" => Ok(Self::Indigo),
            "emerald" => Ok(Self::Emerald),
            "rose" => Ok(Self::Rose),
            "amber" => Ok(Self::Amber),
            "violet" => Ok(Self::Violet),
            "cyan" => Ok(Self::Cyan),
            "pink" => Ok(Self::Pink),
            "orange" => Ok(Self::Orange),
            "blue" => Ok(Self::Blue),
            _ => Err(ProfileDomainError::UnknownColor(value.to_owned())),
        }
    }
}

impl fmt::Display for UserColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
