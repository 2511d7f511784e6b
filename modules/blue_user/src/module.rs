use std::sync::Arc;

use arc_swap::ArcSwapOption;
use async_trait::async_trait;
use resource_kit::export::RestrictedFieldPolicy;
use resource_kit::{CapabilityEntry, Module, ModuleCtx};
use tracing::{debug, info};

use crate::config::BlueUserConfig;
use crate::contract::client::BlueUserApi;
use crate::contract::model::BLUE_USER;
use crate::domain::links::LinkBuilder;
use crate::domain::projection::UserProjection;
use crate::domain::repo::IdentitySource;
use crate::domain::schema::user_fields;
use crate::domain::service::Service;
use crate::gateways::local::BlueUserLocalClient;
use crate::infra::directory::{DirectorySource, DirectoryUser};
use crate::infra::storage::local::LocalAccountStore;

/// Module name used for config lookup.
pub const MODULE_NAME: &str = "blue_user";

resource_kit::inventory::submit! {
    CapabilityEntry {
        tag: BLUE_USER,
        resource: UserProjection::RESOURCE,
        fields: user_fields,
    }
}

resource_kit::inventory::submit! {
    CapabilityEntry {
        tag: BLUE_USER,
        resource: DirectoryUser::RESOURCE,
        fields: user_fields,
    }
}

/// Main module struct
#[derive(Default)]
pub struct BlueUser {
    service: ArcSwapOption<Service>,
}

impl BlueUser {
    pub fn new() -> Self {
        Self::default()
    }

    /// The domain service, once `init` has run.
    pub fn service(&self) -> Option<Arc<Service>> {
        self.service.load_full()
    }

    /// Build the service from config: local accounts first, then the directory.
    pub fn build_service(cfg: &BlueUserConfig) -> Service {
        let local = LocalAccountStore::from_records(cfg.seed_users.clone());
        let directory = DirectorySource::new(cfg.directory.iter().cloned());
        debug!(
            local_accounts = local.len(),
            directory_entries = directory.len(),
            "Identity sources ready"
        );

        let sources: Vec<Arc<dyn IdentitySource>> = vec![Arc::new(local), Arc::new(directory)];
        Service::new(
            sources,
            LinkBuilder::new(&cfg.rest_base),
            Arc::new(RestrictedFieldPolicy::new(cfg.email_permission.clone())),
        )
    }
}

#[async_trait]
impl Module for BlueUser {
    async fn init(&self, ctx: &ModuleCtx) -> anyhow::Result<()> {
        info!("Initializing blue_user module");

        let cfg: BlueUserConfig = ctx.module_config();
        debug!(
            rest_base = %cfg.rest_base,
            email_permission = %cfg.email_permission,
            "Loaded blue_user config"
        );

        let service = Arc::new(Self::build_service(&cfg));
        self.service.store(Some(service.clone()));

        let api: Arc<dyn BlueUserApi> = Arc::new(BlueUserLocalClient::new(service));
        ctx.client_hub().register::<dyn BlueUserApi>(api);

        info!("blue_user module initialized");
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
