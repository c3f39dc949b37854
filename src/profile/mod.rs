//! Member profiles for the Videomaker Log workspace.
//!
//! Profiles are provisioned by the auth provider at signup; this module
//! models the editable fields (display name, colour) and the deterministic
//! fallback colour assignment used to badge task cards. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
