use std::collections::BTreeMap;

use resource_kit::export::VIEW_RESTRICTED;
use serde::{Deserialize, Serialize};

use crate::domain::projection::IdentityRecord;
use crate::infra::directory::DirectoryEntry;

/// REST base path the favorites links are built under.
pub const DEFAULT_REST_BASE: &str = "/blue/rest";

/// Configuration for the blue_user module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlueUserConfig {
    #[serde(default = "default_rest_base")]
    pub rest_base: String,
    /// Permission a caller needs to see restricted fields such as the email.
    #[serde(default = "default_email_permission")]
    pub email_permission: String,
    /// Local accounts keyed by user id; a key must match the record's `id` when one is set.
    #[serde(default)]
    pub seed_users: BTreeMap<String, IdentityRecord>,
    /// Directory entries, consulted after the local accounts.
    #[serde(default)]
    pub directory: Vec<DirectoryEntry>,
}

impl Default for BlueUserConfig {
    fn default() -> Self {
        Self {
            rest_base: default_rest_base(),
            email_permission: default_email_permission(),
            seed_users: BTreeMap::new(),
            directory: Vec::new(),
        }
    }
}

fn default_rest_base() -> String {
    DEFAULT_REST_BASE.to_string()
}

fn default_email_permission() -> String {
    VIEW_RESTRICTED.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: BlueUserConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg.rest_base, "/blue/rest");
        assert_eq!(cfg.email_permission, "view-restricted");
        assert!(cfg.seed_users.is_empty());
        assert!(cfg.directory.is_empty());
    }

    #[test]
    fn seed_users_and_directory_parse() {
        let cfg: BlueUserConfig = serde_json::from_value(serde_json::json!({
            "rest_base": "/api",
            "seed_users": {
                "u1": { "id": "u1", "fullName": "Jane Doe", "email": "jane@example.com" }
            },
            "directory": [
                { "dn": "uid=bob,ou=people,dc=example,dc=com",
                  "attributes": { "uid": ["bob"], "cn": ["Bob Builder"] } }
            ]
        }))
        .unwrap();
        assert_eq!(cfg.rest_base, "/api");
        assert_eq!(
            cfg.seed_users["u1"].email.as_deref(),
            Some("jane@example.com")
        );
        assert_eq!(cfg.directory.len(), 1);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res = serde_json::from_value::<BlueUserConfig>(serde_json::json!({ "restBase": "/x" }));
        assert!(res.is_err());
    }
}
