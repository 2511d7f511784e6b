use resource_kit::export::Caller;
use resource_kit::Problem;
use tracing::{info, warn};

use crate::api::rest::error::map_contract_error;
use crate::contract::client::BlueUserApi;

/// Instance path a user is addressed by.
pub fn user_instance(id: &str) -> String {
    format!("/users/{}", urlencoding::encode(id))
}

/// Get a user as JSON, shaped for `caller`
pub async fn get_user_json(
    api: &dyn BlueUserApi,
    id: &str,
    caller: &Caller,
) -> Result<serde_json::Value, Problem> {
    info!("Getting user with id: {}", id);

    match api.export_user(id, caller).await {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("Failed to get user {}: {}", id, e);
            Err(map_contract_error(&e, &user_instance(id)))
        }
    }
}

/// Change-set author names as a JSON array
pub async fn change_set_authors_json(
    api: &dyn BlueUserApi,
    author_ids: &[String],
) -> Result<serde_json::Value, Problem> {
    match api.change_set_authors(author_ids).await {
        Ok(names) => Ok(serde_json::Value::from(names)),
        Err(e) => {
            warn!("Failed to resolve change-set authors: {}", e);
            Err(map_contract_error(&e, "/users"))
        }
    }
}
