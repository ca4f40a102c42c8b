//! Access key records.
//!
//! Two distinct shapes on purpose: [`AccessKey`] is the creation response
//! and the only place a secret ever appears; [`AccessKeyMetadata`] is the
//! listing entry and cannot carry one. The provider never returns a
//! secret after creation, so the type system keeps listings secret-free.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::KeyStatus;

/// A freshly created access key, including its secret.
///
/// The secret is returned exactly once by the provider. It serializes
/// (creation output is the caller's only chance to capture it) but is
/// redacted from `Debug` so it never lands in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKey {
    /// Name of the owning user.
    pub user_name: String,
    /// Key identifier.
    pub key_id: String,
    /// The secret half of the credential pair.
    pub secret_access_key: String,
    /// Key status, `active` on creation.
    pub status: KeyStatus,
    /// Creation timestamp as reported by the provider.
    pub create_date: Option<String>,
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessKey")
            .field("user_name", &self.user_name)
            .field("key_id", &self.key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("status", &self.status)
            .field("create_date", &self.create_date)
            .finish()
    }
}

/// Metadata for an existing access key, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessKeyMetadata {
    /// Name of the owning user.
    pub user_name: String,
    /// Key identifier.
    pub key_id: String,
    /// Key status.
    pub status: KeyStatus,
    /// Creation timestamp as reported by the provider.
    pub create_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_key() -> AccessKey {
        AccessKey {
            user_name: "alice".to_string(),
            key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG/bPxRfiCY".to_string(),
            status: KeyStatus::Active,
            create_date: None,
        }
    }

    #[test]
    fn debug_redacts_the_secret() {
        let rendered = format!("{:?}", sample_key());
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("wJalrXUtnFEMI"));
        assert!(rendered.contains("AKIAEXAMPLE"));
    }

    #[test]
    fn serialization_keeps_the_secret() {
        let json = serde_json::to_value(sample_key()).unwrap();
        assert_eq!(json["secret_access_key"], "wJalrXUtnFEMI/K7MDENG/bPxRfiCY");
        assert_eq!(json["key_id"], "AKIAEXAMPLE");
    }

    #[test]
    fn metadata_has_no_secret_field() {
        let meta = AccessKeyMetadata {
            user_name: "alice".to_string(),
            key_id: "AKIAEXAMPLE".to_string(),
            status: KeyStatus::Inactive,
            create_date: Some("2016-03-01T12:00:00Z".to_string()),
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("secret_access_key").is_none());
        assert_eq!(json["status"], "inactive");
    }
}
