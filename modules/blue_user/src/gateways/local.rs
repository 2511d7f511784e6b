use async_trait::async_trait;
use std::sync::Arc;

use resource_kit::export::Caller;

use crate::contract::{client::BlueUserApi, error::BlueUserError, model::UserResource};
use crate::domain::service::Service;

/// Local implementation of the BlueUserApi trait that delegates to the domain service
pub struct BlueUserLocalClient {
    service: Arc<Service>,
}

impl BlueUserLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl BlueUserApi for BlueUserLocalClient {
    async fn get_user(&self, id: &str) -> Result<Arc<dyn UserResource>, BlueUserError> {
        self.service.get_user(id).await.map_err(Into::into)
    }

    async fn export_user(
        &self,
        id: &str,
        caller: &Caller,
    ) -> Result<serde_json::Value, BlueUserError> {
        self.service.export_user(id, caller).await.map_err(Into::into)
    }

    async fn change_set_authors(
        &self,
        author_ids: &[String],
    ) -> Result<Vec<String>, BlueUserError> {
        self.service
            .change_set_authors(author_ids)
            .await
            .map_err(Into::into)
    }
}
