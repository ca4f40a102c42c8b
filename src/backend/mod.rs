//! IamBackend trait and provider integration.
//!
//! Provides an abstraction layer over the concrete IAM SDK to decouple
//! the manager from the cloud client, so tests substitute a fake.

pub mod aws;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AccessKey, AccessKeyMetadata, Group, User};

/// Errors from IAM backend calls.
#[derive(Error, Debug)]
pub enum IamError {
    /// The named entity does not exist on the provider. Raised by any
    /// primitive; only `IdentityManager::get_user` normalizes it away.
    #[error("no such entity: {0}")]
    NotFound(String),

    /// Any other provider request failure: auth, conflict (duplicate
    /// user), throttling, malformed name. Message carries the full
    /// service error context.
    #[error("IAM API error: {0}")]
    Api(String),

    /// The provider answered but the response was missing a documented
    /// field.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

/// The set of remote IAM primitives the manager delegates to.
///
/// Each method is a single request/response round trip; implementations
/// reshape provider responses into the simplified record types and do no
/// retrying of their own. `get_user` reports a missing user as
/// [`IamError::NotFound`] — converting that to an absence value is the
/// manager's job, not the backend's.
#[async_trait]
pub trait IamBackend: Send + Sync {
    /// Create a user. Fails with a conflict error if the name exists.
    async fn create_user(&self, username: &str) -> Result<User, IamError>;

    /// Fetch a user record.
    async fn get_user(&self, username: &str) -> Result<User, IamError>;

    /// Delete a user. The provider refuses while the user still owns
    /// keys or belongs to groups.
    async fn delete_user(&self, username: &str) -> Result<(), IamError>;

    /// Create an access key pair for a user. The returned secret is
    /// never retrievable again.
    async fn create_access_key(&self, username: &str) -> Result<AccessKey, IamError>;

    /// List a user's access keys, in provider order. No secrets.
    async fn list_access_keys(&self, username: &str) -> Result<Vec<AccessKeyMetadata>, IamError>;

    /// Delete one access key. A missing key is a provider error, not a
    /// no-op.
    async fn delete_access_key(&self, username: &str, key_id: &str) -> Result<(), IamError>;

    /// Add a user to a group.
    async fn add_user_to_group(&self, username: &str, group_name: &str) -> Result<(), IamError>;

    /// Remove a user from a group.
    async fn remove_user_from_group(
        &self,
        username: &str,
        group_name: &str,
    ) -> Result<(), IamError>;

    /// List the groups a user belongs to, in provider order.
    async fn list_groups_for_user(&self, username: &str) -> Result<Vec<Group>, IamError>;
}
