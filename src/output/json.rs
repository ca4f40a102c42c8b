//! JSON output renderer.
//!
//! Record commands emit the record itself; listings emit a wrapper
//! object with the username and the array, so scripts can pipe the
//! output into `jq` without guessing at shapes.

use crate::models::{AccessKey, AccessKeyMetadata, Group, User};
use crate::output::Renderer;

/// JSON renderer. Pretty-printed, one document per invocation.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn user(&self, user: &User) -> String {
        pretty(&serde_json::json!(user))
    }

    fn user_absent(&self, _username: &str) -> String {
        "null".to_string()
    }

    fn access_key(&self, key: &AccessKey) -> String {
        pretty(&serde_json::json!(key))
    }

    fn access_keys(&self, username: &str, keys: &[AccessKeyMetadata]) -> String {
        pretty(&serde_json::json!({
            "user": username,
            "access_keys": keys,
        }))
    }

    fn groups(&self, username: &str, groups: &[Group]) -> String {
        pretty(&serde_json::json!({
            "user": username,
            "groups": groups,
        }))
    }

    fn confirmation(&self, message: &str) -> String {
        pretty(&serde_json::json!({
            "ok": true,
            "message": message,
        }))
    }
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use crate::models::KeyStatus;

    use super::*;

    #[test]
    fn user_is_valid_json_with_name() {
        let user = User {
            name: "alice".to_string(),
            user_id: "AIDAEXAMPLE".to_string(),
            arn: "arn:aws:iam::123456789012:user/alice".to_string(),
            path: "/".to_string(),
            create_date: None,
        };
        let out = JsonRenderer.user(&user);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["name"], "alice");
        assert_eq!(parsed["user_id"], "AIDAEXAMPLE");
    }

    #[test]
    fn absent_user_is_null() {
        let out = JsonRenderer.user_absent("ghost");
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(parsed.is_null());
    }

    #[test]
    fn created_key_includes_the_secret() {
        let key = AccessKey {
            user_name: "alice".to_string(),
            key_id: "AKIAEXAMPLE".to_string(),
            secret_access_key: "super-secret".to_string(),
            status: KeyStatus::Active,
            create_date: None,
        };
        let out = JsonRenderer.access_key(&key);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["secret_access_key"], "super-secret");
    }

    #[test]
    fn key_listing_never_includes_secrets() {
        let keys = vec![AccessKeyMetadata {
            user_name: "alice".to_string(),
            key_id: "AKIAEXAMPLE".to_string(),
            status: KeyStatus::Active,
            create_date: None,
        }];
        let out = JsonRenderer.access_keys("alice", &keys);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["user"], "alice");
        assert_eq!(parsed["access_keys"][0]["key_id"], "AKIAEXAMPLE");
        assert!(parsed["access_keys"][0].get("secret_access_key").is_none());
        assert!(!out.contains("secret_access_key"));
    }

    #[test]
    fn group_listing_wraps_user_and_groups() {
        let groups = vec![Group::named("admins")];
        let out = JsonRenderer.groups("alice", &groups);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["groups"][0]["name"], "admins");
    }

    #[test]
    fn confirmation_is_ok_object() {
        let out = JsonRenderer.confirmation("created user alice");
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["ok"], true);
        assert_eq!(parsed["message"], "created user alice");
    }
}
