use std::collections::HashSet;
use std::sync::Arc;

use resource_kit::export::{Caller, Exported, VisibilityPolicy};
use tracing::{debug, info, instrument, warn};

use crate::contract::model::UserResource;
use crate::domain::error::DomainError;
use crate::domain::links::LinkBuilder;
use crate::domain::repo::IdentitySource;
use crate::domain::schema::{user_schema, AnyUser};

/// Domain service: resolves users from identity sources and exports them per caller.
/// Depends only on the `IdentitySource` port, not on infra types.
#[derive(Clone)]
pub struct Service {
    sources: Vec<Arc<dyn IdentitySource>>,
    links: LinkBuilder,
    policy: Arc<dyn VisibilityPolicy>,
}

impl Service {
    /// Sources are consulted in order; the first one that knows the id wins.
    pub fn new(
        sources: Vec<Arc<dyn IdentitySource>>,
        links: LinkBuilder,
        policy: Arc<dyn VisibilityPolicy>,
    ) -> Self {
        Self {
            sources,
            links,
            policy,
        }
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    #[instrument(name = "blue_user.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: &str) -> Result<Arc<dyn UserResource>, DomainError> {
        debug!("Resolving user");

        if id.trim().is_empty() {
            return Err(DomainError::user_not_found(id));
        }

        for source in &self.sources {
            match source.resolve(id, &self.links).await {
                Ok(Some(user)) => {
                    debug!(source = source.name(), "User resolved");
                    return Ok(user);
                }
                Ok(None) => continue,
                Err(e @ DomainError::MissingIdentifier { .. }) => {
                    warn!(source = source.name(), error = %e, "Identity data without user id");
                    return Err(e);
                }
                Err(e) => return Err(e),
            }
        }

        debug!("No identity source knows this user");
        Err(DomainError::user_not_found(id))
    }

    /// Serialize `user` through the user schema as seen by `caller`.
    pub fn export(
        &self,
        user: &AnyUser,
        caller: &Caller,
    ) -> Result<serde_json::Value, DomainError> {
        Exported::new(user, user_schema(), caller, self.policy.as_ref())
            .to_value()
            .map_err(|e| DomainError::export(e.to_string()))
    }

    #[instrument(
        name = "blue_user.service.export_user",
        skip(self, caller),
        fields(user_id = %id, caller = caller.principal().unwrap_or("anonymous"))
    )]
    pub async fn export_user(
        &self,
        id: &str,
        caller: &Caller,
    ) -> Result<serde_json::Value, DomainError> {
        let user = self.get_user(id).await?;
        let value = self.export(user.as_ref(), caller)?;
        info!("Exported user");
        Ok(value)
    }

    /// Display names of the authors of a change set, deduplicated in first-seen order.
    ///
    /// Authors unknown to every identity source are skipped; other failures propagate.
    #[instrument(name = "blue_user.service.change_set_authors", skip(self, author_ids), fields(count = author_ids.len()))]
    pub async fn change_set_authors(
        &self,
        author_ids: &[String],
    ) -> Result<Vec<String>, DomainError> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for id in author_ids {
            let user = match self.get_user(id).await {
                Ok(user) => user,
                Err(DomainError::UserNotFound { .. }) => {
                    debug!(author = %id, "Skipping unknown author");
                    continue;
                }
                Err(e) => return Err(e),
            };
            let name = user.full_name().to_string();
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
        Ok(names)
    }
}
