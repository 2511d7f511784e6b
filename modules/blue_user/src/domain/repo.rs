use std::sync::Arc;

use async_trait::async_trait;

use crate::contract::model::UserResource;
use crate::domain::error::DomainError;
use crate::domain::links::LinkBuilder;

/// Port for the domain layer: one backend that knows about users.
///
/// `resolve` returns `Ok(None)` when this source has never heard of `id`, and
/// `DomainError::MissingIdentifier` when it has data for `id` that cannot be
/// projected because the stored user id is missing.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Short source name used in logs and errors.
    fn name(&self) -> &'static str;

    async fn resolve(
        &self,
        id: &str,
        links: &LinkBuilder,
    ) -> Result<Option<Arc<dyn UserResource>>, DomainError>;
}
