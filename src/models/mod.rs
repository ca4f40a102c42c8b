//! Shared types used across all modules.
//!
//! This module defines the simplified record shapes the manager returns:
//! users, groups, and access keys. Provider attributes (ids, ARNs,
//! creation dates) are carried through opaquely as strings — nothing here
//! interprets them. Other modules import from here rather than reaching
//! into each other's internals.

pub mod access_key;
pub mod group;
pub mod user;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use access_key::{AccessKey, AccessKeyMetadata};
pub use group::Group;
pub use user::User;

/// Status of an access key as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyStatus {
    #[default]
    Active,
    Inactive,
    /// A status value this build does not know about. Carried through so
    /// listings stay complete when the provider grows new states.
    Unknown,
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStatus::Active => write!(f, "active"),
            KeyStatus::Inactive => write!(f, "inactive"),
            KeyStatus::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for KeyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(KeyStatus::Active),
            "inactive" => Ok(KeyStatus::Inactive),
            other => Err(format!(
                "unsupported key status: '{other}'. Supported: active, inactive"
            )),
        }
    }
}
