//! IdentityManager — the typed facade over the IAM backend.
//!
//! Every public method is a thin delegation to the backend capability
//! trait, with two pieces of real logic layered on top: `get_user`
//! converts the provider's not-found error into an absence value, and
//! `delete_user` sequences the teardown of a user's group memberships
//! and access keys before the user itself can be deleted.
//!
//! The manager holds no state beyond its backend and stats handles, so
//! one instance can serve sequential callers indefinitely; concurrent
//! use is safe whenever the backend is.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, info};

use crate::backend::{IamBackend, IamError};
use crate::models::{AccessKey, AccessKeyMetadata, Group, User};
use crate::stats::{self, StatsSink};

/// Facade over user, group, and access-key operations.
pub struct IdentityManager {
    backend: Arc<dyn IamBackend>,
    stats: Arc<dyn StatsSink>,
}

impl IdentityManager {
    /// Build a manager with the default (no-op) stats sink.
    pub fn new(backend: Arc<dyn IamBackend>) -> Self {
        Self::with_stats(backend, stats::noop())
    }

    /// Build a manager with an explicit stats collaborator.
    pub fn with_stats(backend: Arc<dyn IamBackend>, stats: Arc<dyn StatsSink>) -> Self {
        Self { backend, stats }
    }

    /// Create a user. A duplicate name is a provider conflict and
    /// propagates unchanged.
    pub async fn create_user(&self, username: &str) -> Result<User, IamError> {
        debug!(user = username, "create_user");
        self.op("create_user", self.backend.create_user(username))
            .await
    }

    /// Fetch a user, or `None` if the provider has never heard of them.
    ///
    /// This is the one place a not-found error is normalized away; every
    /// other error class propagates unchanged.
    pub async fn get_user(&self, username: &str) -> Result<Option<User>, IamError> {
        debug!(user = username, "get_user");
        self.stats.incr("get_user");
        match self.backend.get_user(username).await {
            Ok(user) => Ok(Some(user)),
            Err(IamError::NotFound(_)) => Ok(None),
            Err(err) => {
                self.stats.incr("get_user.error");
                Err(err)
            }
        }
    }

    /// Delete a user, detaching everything the provider requires first.
    ///
    /// The provider refuses to delete a user that still belongs to a
    /// group or owns an access key, so this runs as an ordered sequence:
    /// group removals (in listing order), then key deletions (in listing
    /// order), then the user itself. Groups go first by convention; the
    /// order is observable to test doubles and treated as part of the
    /// contract.
    ///
    /// There is no rollback: if any step fails the sequence aborts
    /// immediately, whatever was already detached stays detached, the
    /// user survives, and the underlying error propagates.
    pub async fn delete_user(&self, username: &str) -> Result<(), IamError> {
        info!(user = username, "delete_user");
        self.stats.incr("delete_user");

        let result = async {
            for group in self.list_groups_for_user(username).await? {
                self.remove_user_from_group(username, &group).await?;
            }

            for key in self.list_access_keys(username).await? {
                self.delete_access_key(username, &key.key_id).await?;
            }

            self.backend.delete_user(username).await
        }
        .await;

        if result.is_err() {
            self.stats.incr("delete_user.error");
        }
        result
    }

    /// Create an access key pair for a user.
    ///
    /// The returned record is the only copy of the secret that will ever
    /// exist; listings never include it again.
    pub async fn create_access_key(&self, username: &str) -> Result<AccessKey, IamError> {
        debug!(user = username, "create_access_key");
        self.op("create_access_key", self.backend.create_access_key(username))
            .await
    }

    /// List a user's access keys in provider order. Metadata only.
    pub async fn list_access_keys(
        &self,
        username: &str,
    ) -> Result<Vec<AccessKeyMetadata>, IamError> {
        debug!(user = username, "list_access_keys");
        self.op("list_access_keys", self.backend.list_access_keys(username))
            .await
    }

    /// Delete one access key. A missing key surfaces as a provider
    /// error; it is not swallowed.
    pub async fn delete_access_key(&self, username: &str, key_id: &str) -> Result<(), IamError> {
        debug!(user = username, key = key_id, "delete_access_key");
        self.op(
            "delete_access_key",
            self.backend.delete_access_key(username, key_id),
        )
        .await
    }

    /// Add a user to a group by name.
    pub async fn add_user_to_group(
        &self,
        username: &str,
        group_name: &str,
    ) -> Result<(), IamError> {
        debug!(user = username, group = group_name, "add_user_to_group");
        self.op(
            "add_user_to_group",
            self.backend.add_user_to_group(username, group_name),
        )
        .await
    }

    /// Remove a user from a group, given the group record.
    pub async fn remove_user_from_group(
        &self,
        username: &str,
        group: &Group,
    ) -> Result<(), IamError> {
        debug!(user = username, group = group.name.as_str(), "remove_user_from_group");
        self.op(
            "remove_user_from_group",
            self.backend.remove_user_from_group(username, &group.name),
        )
        .await
    }

    /// List the groups a user belongs to, in provider order.
    pub async fn list_groups_for_user(&self, username: &str) -> Result<Vec<Group>, IamError> {
        debug!(user = username, "list_groups_for_user");
        self.op(
            "list_groups_for_user",
            self.backend.list_groups_for_user(username),
        )
        .await
    }

    /// Count the operation, await it, count a failure.
    async fn op<T>(
        &self,
        name: &str,
        fut: impl Future<Output = Result<T, IamError>>,
    ) -> Result<T, IamError> {
        self.stats.incr(name);
        let result = fut.await;
        if result.is_err() {
            self.stats.incr(&format!("{name}.error"));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::models::KeyStatus;
    use crate::stats::testing::RecordingStats;

    /// Fake backend that records every call as `name:arg[:arg]` and can
    /// be told to fail a specific call.
    #[derive(Default)]
    struct RecordingBackend {
        /// Users `get_user` knows about.
        users: Vec<String>,
        /// Canned group memberships for `list_groups_for_user`.
        groups: Vec<Group>,
        /// Canned keys for `list_access_keys`.
        keys: Vec<AccessKeyMetadata>,
        /// Exact call string that should fail with an API error.
        fail_on: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingBackend {
        fn with_memberships(groups: &[&str], keys: &[&str]) -> Self {
            Self {
                groups: groups.iter().map(|g| Group::named(*g)).collect(),
                keys: keys
                    .iter()
                    .map(|k| AccessKeyMetadata {
                        user_name: "alice".to_string(),
                        key_id: (*k).to_string(),
                        status: KeyStatus::Active,
                        create_date: None,
                    })
                    .collect(),
                ..Self::default()
            }
        }

        fn failing_at(mut self, call: &str) -> Self {
            self.fail_on = Some(call.to_string());
            self
        }

        fn record(&self, call: String) -> Result<(), IamError> {
            self.calls.lock().unwrap().push(call.clone());
            if self.fail_on.as_deref() == Some(call.as_str()) {
                return Err(IamError::Api(format!("injected failure at {call}")));
            }
            Ok(())
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn user_record(name: &str) -> User {
            User {
                name: name.to_string(),
                user_id: format!("AIDA{}", name.to_uppercase()),
                arn: format!("arn:aws:iam::123456789012:user/{name}"),
                path: "/".to_string(),
                create_date: None,
            }
        }
    }

    #[async_trait]
    impl IamBackend for RecordingBackend {
        async fn create_user(&self, username: &str) -> Result<User, IamError> {
            self.record(format!("create_user:{username}"))?;
            Ok(Self::user_record(username))
        }

        async fn get_user(&self, username: &str) -> Result<User, IamError> {
            self.record(format!("get_user:{username}"))?;
            if self.users.iter().any(|u| u == username) {
                Ok(Self::user_record(username))
            } else {
                Err(IamError::NotFound(username.to_string()))
            }
        }

        async fn delete_user(&self, username: &str) -> Result<(), IamError> {
            self.record(format!("delete_user:{username}"))
        }

        async fn create_access_key(&self, username: &str) -> Result<AccessKey, IamError> {
            self.record(format!("create_access_key:{username}"))?;
            Ok(AccessKey {
                user_name: username.to_string(),
                key_id: "AKIAFAKEKEY".to_string(),
                secret_access_key: "fake-secret-material".to_string(),
                status: KeyStatus::Active,
                create_date: None,
            })
        }

        async fn list_access_keys(
            &self,
            username: &str,
        ) -> Result<Vec<AccessKeyMetadata>, IamError> {
            self.record(format!("list_access_keys:{username}"))?;
            Ok(self.keys.clone())
        }

        async fn delete_access_key(&self, username: &str, key_id: &str) -> Result<(), IamError> {
            self.record(format!("delete_access_key:{username}:{key_id}"))
        }

        async fn add_user_to_group(
            &self,
            username: &str,
            group_name: &str,
        ) -> Result<(), IamError> {
            self.record(format!("add_user_to_group:{username}:{group_name}"))
        }

        async fn remove_user_from_group(
            &self,
            username: &str,
            group_name: &str,
        ) -> Result<(), IamError> {
            self.record(format!("remove_user_from_group:{username}:{group_name}"))
        }

        async fn list_groups_for_user(&self, username: &str) -> Result<Vec<Group>, IamError> {
            self.record(format!("list_groups_for_user:{username}"))?;
            Ok(self.groups.clone())
        }
    }

    fn manager(backend: RecordingBackend) -> (IdentityManager, Arc<RecordingBackend>) {
        let backend = Arc::new(backend);
        let manager = IdentityManager::new(Arc::clone(&backend) as Arc<dyn IamBackend>);
        (manager, backend)
    }

    #[tokio::test]
    async fn get_user_normalizes_not_found_to_none() {
        let (manager, _) = manager(RecordingBackend::default());
        let result = manager.get_user("ghost").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn get_user_returns_record_with_matching_name() {
        let (manager, _) = manager(RecordingBackend {
            users: vec!["alice".to_string()],
            ..RecordingBackend::default()
        });
        let user = manager.get_user("alice").await.unwrap().unwrap();
        assert_eq!(user.name, "alice");
    }

    #[tokio::test]
    async fn get_user_propagates_non_not_found_errors() {
        let (manager, _) =
            manager(RecordingBackend::default().failing_at("get_user:alice"));
        let result = manager.get_user("alice").await;
        assert!(matches!(result, Err(IamError::Api(_))));
    }

    #[tokio::test]
    async fn create_access_key_returns_both_halves() {
        let (manager, _) = manager(RecordingBackend::default());
        let key = manager.create_access_key("alice").await.unwrap();
        assert!(!key.key_id.is_empty());
        assert!(!key.secret_access_key.is_empty());
    }

    #[tokio::test]
    async fn delete_user_detaches_groups_then_keys_then_deletes() {
        let (manager, backend) = manager(RecordingBackend::with_memberships(
            &["g1", "g2", "g3"],
            &["k1", "k2", "k3"],
        ));

        manager.delete_user("alice").await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                "list_groups_for_user:alice",
                "remove_user_from_group:alice:g1",
                "remove_user_from_group:alice:g2",
                "remove_user_from_group:alice:g3",
                "list_access_keys:alice",
                "delete_access_key:alice:k1",
                "delete_access_key:alice:k2",
                "delete_access_key:alice:k3",
                "delete_user:alice",
            ],
        );
    }

    #[tokio::test]
    async fn delete_user_with_clean_user_goes_straight_to_deletion() {
        let (manager, backend) = manager(RecordingBackend::default());

        manager.delete_user("bob").await.unwrap();

        assert_eq!(
            backend.calls(),
            vec![
                "list_groups_for_user:bob",
                "list_access_keys:bob",
                "delete_user:bob",
            ],
        );
    }

    #[tokio::test]
    async fn delete_user_aborts_when_a_group_removal_fails() {
        let (manager, backend) = manager(
            RecordingBackend::with_memberships(&["g1", "g2", "g3"], &["k1"])
                .failing_at("remove_user_from_group:alice:g2"),
        );

        let result = manager.delete_user("alice").await;
        assert!(matches!(result, Err(IamError::Api(_))));

        let calls = backend.calls();
        assert_eq!(
            calls,
            vec![
                "list_groups_for_user:alice",
                "remove_user_from_group:alice:g1",
                "remove_user_from_group:alice:g2",
            ],
        );
        assert!(!calls.iter().any(|c| c.starts_with("delete_access_key")));
        assert!(!calls.iter().any(|c| c.starts_with("delete_user")));
    }

    #[tokio::test]
    async fn delete_user_aborts_when_a_key_deletion_fails() {
        let (manager, backend) = manager(
            RecordingBackend::with_memberships(&[], &["k1", "k2"])
                .failing_at("delete_access_key:alice:k2"),
        );

        let result = manager.delete_user("alice").await;
        assert!(result.is_err());
        assert!(!backend.calls().iter().any(|c| c == "delete_user:alice"));
    }

    #[tokio::test]
    async fn remove_user_from_group_uses_the_group_name() {
        let (manager, backend) = manager(RecordingBackend::default());
        let group = Group::named("admins");

        manager
            .remove_user_from_group("alice", &group)
            .await
            .unwrap();

        assert_eq!(backend.calls(), vec!["remove_user_from_group:alice:admins"]);
    }

    #[tokio::test]
    async fn stats_count_operations_and_failures() {
        let backend = Arc::new(
            RecordingBackend::with_memberships(&["g1"], &[])
                .failing_at("remove_user_from_group:alice:g1"),
        );
        let stats = Arc::new(RecordingStats::default());
        let manager = IdentityManager::with_stats(
            Arc::clone(&backend) as Arc<dyn IamBackend>,
            Arc::clone(&stats) as Arc<dyn StatsSink>,
        );

        let _ = manager.create_user("alice").await;
        let _ = manager.delete_user("alice").await;

        let recorded = stats.recorded();
        assert!(recorded.contains(&"create_user".to_string()));
        assert!(recorded.contains(&"delete_user".to_string()));
        assert!(recorded.contains(&"remove_user_from_group.error".to_string()));
        assert!(recorded.contains(&"delete_user.error".to_string()));
        assert!(!recorded.contains(&"create_user.error".to_string()));
    }
}
