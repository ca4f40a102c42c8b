//! Group record.

use serde::{Deserialize, Serialize};

/// A named permission group.
///
/// Membership is queried per-user; this interface never enumerates
/// groups globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group name.
    pub name: String,
    /// Provider-assigned stable identifier.
    pub group_id: String,
    /// Full resource name (ARN).
    pub arn: String,
    /// Path prefix.
    pub path: String,
    /// Creation timestamp as reported by the provider.
    pub create_date: Option<String>,
}

impl Group {
    /// Convenience constructor for a group known only by name, as used by
    /// fakes and by callers that build a record for removal.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            group_id: String::new(),
            arn: String::new(),
            path: "/".to_string(),
            create_date: None,
            name,
        }
    }
}
