//! User record.

use serde::{Deserialize, Serialize};

/// A provider user, identified by its unique name.
///
/// Everything beyond `name` is passed through from the provider without
/// interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user name.
    pub name: String,
    /// Provider-assigned stable identifier.
    pub user_id: String,
    /// Full resource name (ARN).
    pub arn: String,
    /// Path prefix, `/` unless the account uses path hierarchies.
    pub path: String,
    /// Creation timestamp as reported by the provider.
    pub create_date: Option<String>,
}
