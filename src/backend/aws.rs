//! AWS implementation of [`IamBackend`] over `aws-sdk-iam`.
//!
//! Each trait method is a single SDK round trip; responses are reshaped
//! into the crate's record types at this boundary so nothing above it
//! touches SDK structs. "No such entity" service errors become
//! [`IamError::NotFound`]; everything else is surfaced through
//! [`DisplayErrorContext`] so the operator sees the service message, not
//! an opaque top-level variant.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::types;
use tracing::debug;

use super::{IamBackend, IamError};
use crate::models::{AccessKey, AccessKeyMetadata, Group, KeyStatus, User};

/// Connection settings for the AWS client.
///
/// Everything is optional: unset fields defer to the SDK's default
/// provider chain (env vars, shared config files, instance metadata).
/// `endpoint_url` exists mainly to point the client at a local
/// IAM-compatible emulator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsSettings {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

/// Production backend speaking to AWS IAM.
pub struct AwsBackend {
    client: aws_sdk_iam::Client,
}

impl AwsBackend {
    /// Resolve credentials/region through the default provider chain and
    /// build a client. No IAM request is made here; resolution is the
    /// only network activity and belongs to the SDK.
    pub async fn connect(settings: &AwsSettings) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(ref region) = settings.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(ref profile) = settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(ref endpoint) = settings.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let shared = loader.load().await;
        debug!(
            region = ?shared.region(),
            endpoint = settings.endpoint_url.as_deref(),
            "built IAM client"
        );
        Self {
            client: aws_sdk_iam::Client::new(&shared),
        }
    }

    /// Wrap an already-constructed SDK client.
    pub fn from_client(client: aws_sdk_iam::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IamBackend for AwsBackend {
    async fn create_user(&self, username: &str) -> Result<User, IamError> {
        let output = self
            .client
            .create_user()
            .user_name(username)
            .send()
            .await
            .map_err(api_error)?;

        let user = output.user().ok_or_else(|| {
            IamError::MalformedResponse("CreateUser response carried no User".to_string())
        })?;
        Ok(user_record(user))
    }

    async fn get_user(&self, username: &str) -> Result<User, IamError> {
        let output = self
            .client
            .get_user()
            .user_name(username)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                e if e.is_no_such_entity_exception() => IamError::NotFound(username.to_string()),
                e => api_error(e),
            })?;

        let user = output.user().ok_or_else(|| {
            IamError::MalformedResponse("GetUser response carried no User".to_string())
        })?;
        Ok(user_record(user))
    }

    async fn delete_user(&self, username: &str) -> Result<(), IamError> {
        self.client
            .delete_user()
            .user_name(username)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                e if e.is_no_such_entity_exception() => IamError::NotFound(username.to_string()),
                e => api_error(e),
            })?;
        Ok(())
    }

    async fn create_access_key(&self, username: &str) -> Result<AccessKey, IamError> {
        let output = self
            .client
            .create_access_key()
            .user_name(username)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                e if e.is_no_such_entity_exception() => IamError::NotFound(username.to_string()),
                e => api_error(e),
            })?;

        let key = output.access_key().ok_or_else(|| {
            IamError::MalformedResponse("CreateAccessKey response carried no AccessKey".to_string())
        })?;
        Ok(AccessKey {
            user_name: key.user_name().to_string(),
            key_id: key.access_key_id().to_string(),
            secret_access_key: key.secret_access_key().to_string(),
            status: key_status(key.status()),
            create_date: key.create_date().map(|d| d.to_string()),
        })
    }

    async fn list_access_keys(&self, username: &str) -> Result<Vec<AccessKeyMetadata>, IamError> {
        let output = self
            .client
            .list_access_keys()
            .user_name(username)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                e if e.is_no_such_entity_exception() => IamError::NotFound(username.to_string()),
                e => api_error(e),
            })?;

        Ok(output
            .access_key_metadata()
            .iter()
            .map(|meta| key_metadata(meta, username))
            .collect())
    }

    async fn delete_access_key(&self, username: &str, key_id: &str) -> Result<(), IamError> {
        self.client
            .delete_access_key()
            .user_name(username)
            .access_key_id(key_id)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                e if e.is_no_such_entity_exception() => IamError::NotFound(key_id.to_string()),
                e => api_error(e),
            })?;
        Ok(())
    }

    async fn add_user_to_group(&self, username: &str, group_name: &str) -> Result<(), IamError> {
        self.client
            .add_user_to_group()
            .group_name(group_name)
            .user_name(username)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                e if e.is_no_such_entity_exception() => {
                    IamError::NotFound(format!("{username} or {group_name}"))
                }
                e => api_error(e),
            })?;
        Ok(())
    }

    async fn remove_user_from_group(
        &self,
        username: &str,
        group_name: &str,
    ) -> Result<(), IamError> {
        self.client
            .remove_user_from_group()
            .group_name(group_name)
            .user_name(username)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                e if e.is_no_such_entity_exception() => {
                    IamError::NotFound(format!("{username} or {group_name}"))
                }
                e => api_error(e),
            })?;
        Ok(())
    }

    async fn list_groups_for_user(&self, username: &str) -> Result<Vec<Group>, IamError> {
        let output = self
            .client
            .list_groups_for_user()
            .user_name(username)
            .send()
            .await
            .map_err(|err| match err.into_service_error() {
                e if e.is_no_such_entity_exception() => IamError::NotFound(username.to_string()),
                e => api_error(e),
            })?;

        Ok(output.groups().iter().map(group_record).collect())
    }
}

/// Convert any SDK error into the crate error, walking the source chain
/// so the service message survives.
fn api_error<E: std::error::Error>(err: E) -> IamError {
    IamError::Api(DisplayErrorContext(err).to_string())
}

fn user_record(user: &types::User) -> User {
    User {
        name: user.user_name().to_string(),
        user_id: user.user_id().to_string(),
        arn: user.arn().to_string(),
        path: user.path().to_string(),
        create_date: Some(user.create_date().to_string()),
    }
}

fn group_record(group: &types::Group) -> Group {
    Group {
        name: group.group_name().to_string(),
        group_id: group.group_id().to_string(),
        arn: group.arn().to_string(),
        path: group.path().to_string(),
        create_date: Some(group.create_date().to_string()),
    }
}

/// Listings model every field as optional; fall back to the queried
/// username so records stay attributable.
fn key_metadata(meta: &types::AccessKeyMetadata, username: &str) -> AccessKeyMetadata {
    AccessKeyMetadata {
        user_name: meta.user_name().unwrap_or(username).to_string(),
        key_id: meta.access_key_id().unwrap_or_default().to_string(),
        status: meta.status().map(key_status).unwrap_or(KeyStatus::Unknown),
        create_date: meta.create_date().map(|d| d.to_string()),
    }
}

fn key_status(status: &types::StatusType) -> KeyStatus {
    match status {
        types::StatusType::Active => KeyStatus::Active,
        types::StatusType::Inactive => KeyStatus::Inactive,
        _ => KeyStatus::Unknown,
    }
}
