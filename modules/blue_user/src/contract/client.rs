use std::sync::Arc;

use async_trait::async_trait;
use resource_kit::export::Caller;

use crate::contract::{error::BlueUserError, model::UserResource};

/// Public API trait for the blue_user module that other modules can use
#[async_trait]
pub trait BlueUserApi: Send + Sync {
    /// Resolve a user by id from the configured identity sources
    async fn get_user(&self, id: &str) -> Result<Arc<dyn UserResource>, BlueUserError>;

    /// Serialize a user as seen by `caller`; restricted fields are omitted when not allowed
    async fn export_user(
        &self,
        id: &str,
        caller: &Caller,
    ) -> Result<serde_json::Value, BlueUserError>;

    /// Distinct display names of change-set authors, first occurrence first
    async fn change_set_authors(&self, author_ids: &[String])
        -> Result<Vec<String>, BlueUserError>;
}
