//! Module wiring: config from YAML, client hub registration, capability discovery.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use blue_user::contract::client::BlueUserApi;
use blue_user::contract::model::BLUE_USER;
use blue_user::domain::projection::UserProjection;
use blue_user::infra::directory::DirectoryUser;
use blue_user::module::MODULE_NAME;
use blue_user::BlueUser;
use resource_kit::export::{Caller, Visibility};
use resource_kit::{CapabilityRegistry, ClientHub, Module, ModuleCtxBuilder};

const CONFIG_YAML: &str = r#"
modules:
  blue_user:
    rest_base: /blue/rest
    email_permission: users:read-email
    seed_users:
      u1:
        id: u1
        fullName: Jane Doe
        email: jane@example.com
"#;

fn write_config(contents: &str) -> Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[tokio::test]
async fn init_reads_config_and_publishes_client() -> Result<()> {
    let file = write_config(CONFIG_YAML)?;
    let app = runtime::AppConfig::load_layered(file.path())?;

    let hub = Arc::new(ClientHub::new());
    let ctx = ModuleCtxBuilder::new()
        .with_config_provider(Arc::new(app))
        .with_client_hub(hub.clone())
        .build()
        .for_module(MODULE_NAME);

    let module = BlueUser::new();
    assert!(module.service().is_none());
    module.init(&ctx).await?;
    assert!(module.service().is_some());

    let api = hub.get::<dyn BlueUserApi>()?;
    let reader = Caller::authenticated("ops").with_permission("users:read-email");
    let value = api.export_user("u1", &reader).await?;
    assert_eq!(value["email"], "jane@example.com");
    assert_eq!(value["favorites"]["href"], "/blue/rest/users/u1/favorites/");
    Ok(())
}

#[tokio::test]
async fn init_without_section_uses_defaults() -> Result<()> {
    let hub = Arc::new(ClientHub::new());
    let ctx = ModuleCtxBuilder::new()
        .with_config_provider(Arc::new(runtime::AppConfig::default()))
        .with_client_hub(hub.clone())
        .build()
        .for_module(MODULE_NAME);

    BlueUser::new().init(&ctx).await?;

    let api = hub.get::<dyn BlueUserApi>()?;
    assert!(api.get_user("u1").await.is_err());
    Ok(())
}

#[test]
fn user_resources_are_discoverable_by_capability() -> Result<()> {
    let registry = CapabilityRegistry::discover()?;

    let mut resources: Vec<_> = registry
        .resources_for(BLUE_USER)
        .iter()
        .map(|e| e.resource)
        .collect();
    resources.sort_unstable();
    assert_eq!(resources, vec![DirectoryUser::RESOURCE, UserProjection::RESOURCE]);
    assert!(registry.has_capability(UserProjection::RESOURCE, BLUE_USER));
    assert!(registry.has_capability(DirectoryUser::RESOURCE, BLUE_USER));

    for entry in registry.resources_for(BLUE_USER) {
        let fields = (entry.fields)();
        let wire: Vec<_> = fields.iter().map(|f| f.wire_name).collect();
        assert_eq!(wire, vec!["id", "fullName", "email", "favorites"]);
        let restricted: Vec<_> = fields
            .iter()
            .filter(|f| f.visibility == Visibility::Restricted)
            .map(|f| f.wire_name)
            .collect();
        assert_eq!(restricted, vec!["email"]);
    }
    Ok(())
}
