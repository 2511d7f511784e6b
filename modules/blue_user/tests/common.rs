use std::sync::Arc;

use blue_user::config::BlueUserConfig;
use blue_user::domain::service::Service;
use blue_user::module::BlueUser;
use resource_kit::export::{Caller, VIEW_RESTRICTED};

/// Config with one complete local account, one without id, and two directory entries.
#[allow(dead_code)]
pub fn sample_config() -> BlueUserConfig {
    serde_json::from_value(serde_json::json!({
        "seed_users": {
            "u1": { "id": "u1", "fullName": "Jane Doe", "email": "jane@example.com" },
            "u2": { "id": "u2", "fullName": "John Roe" },
            "ghost": { "fullName": "Nobody Home", "email": "ghost@example.com" }
        },
        "directory": [
            { "dn": "uid=bob,ou=people,dc=example,dc=com",
              "attributes": { "uid": ["bob"], "cn": ["Bob Builder"], "mail": ["bob@example.com"] } },
            { "dn": "uid=carl,ou=people,dc=example,dc=com",
              "attributes": { "cn": ["Carl Nouid"] } }
        ]
    }))
    .expect("sample config parses")
}

#[allow(dead_code)]
pub fn sample_service() -> Arc<Service> {
    Arc::new(BlueUser::build_service(&sample_config()))
}

#[allow(dead_code)]
pub fn admin() -> Caller {
    Caller::authenticated("admin").with_permission(VIEW_RESTRICTED)
}

#[allow(dead_code)]
pub fn stranger() -> Caller {
    Caller::authenticated("mallory")
}
