use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::client_hub::ClientHub;

/// Provider of module-specific configuration (raw JSON sections only).
pub trait ConfigProvider: Send + Sync {
    /// Returns raw JSON section for the module, if any.
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value>;
}

impl ConfigProvider for runtime::AppConfig {
    fn get_module_config(&self, module_name: &str) -> Option<&serde_json::Value> {
        self.module_section(module_name)
    }
}

#[derive(Clone)]
pub struct ModuleCtx {
    config_provider: Option<Arc<dyn ConfigProvider>>,
    client_hub: Arc<ClientHub>,
    module_name: Option<Arc<str>>,
}

pub struct ModuleCtxBuilder {
    inner: ModuleCtx,
}

impl Default for ModuleCtxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleCtxBuilder {
    pub fn new() -> Self {
        Self {
            inner: ModuleCtx {
                config_provider: None,
                client_hub: Arc::new(ClientHub::default()),
                module_name: None,
            },
        }
    }

    pub fn with_config_provider(mut self, p: Arc<dyn ConfigProvider>) -> Self {
        self.inner.config_provider = Some(p);
        self
    }

    pub fn with_client_hub(mut self, hub: Arc<ClientHub>) -> Self {
        self.inner.client_hub = hub;
        self
    }

    pub fn build(self) -> ModuleCtx {
        self.inner
    }
}

impl ModuleCtx {
    /// Scope context to a specific module name.
    pub fn for_module(mut self, name: &str) -> Self {
        self.module_name = Some(Arc::<str>::from(name));
        self
    }

    pub fn client_hub(&self) -> Arc<ClientHub> {
        self.client_hub.clone()
    }

    pub fn current_module(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    /// Best-effort: deserialize the module's config into `T`, fallback to `T::default()`
    /// if section is missing or invalid.
    pub fn module_config<T: DeserializeOwned + Default>(&self) -> T {
        let (Some(name), Some(p)) = (&self.module_name, &self.config_provider) else {
            return T::default();
        };
        match p.get_module_config(name) {
            Some(raw) => serde_json::from_value::<T>(raw.clone()).unwrap_or_else(|e| {
                tracing::warn!(module = %name, error = %e, "invalid module config, using defaults");
                T::default()
            }),
            None => T::default(),
        }
    }

    /// Strict: deserialize the module's config into `T`, returning a pathful error on failure.
    pub fn module_config_required<T: DeserializeOwned>(&self) -> anyhow::Result<T> {
        let name = self
            .module_name
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("context is not scoped to a module"))?;

        let prov = self
            .config_provider
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no ConfigProvider"))?;

        let val = prov
            .get_module_config(name)
            .ok_or_else(|| anyhow::anyhow!("missing module config: {name}"))?;

        serde_json::from_value(val.clone()).map_err(|e| anyhow::anyhow!("invalid {name} config: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Probe {
        #[serde(default)]
        base: String,
        #[serde(default)]
        limit: u32,
    }

    fn ctx_with(modules: serde_json::Value) -> ModuleCtx {
        let mut cfg = runtime::AppConfig::default();
        if let serde_json::Value::Object(map) = modules {
            cfg.modules = map.into_iter().collect();
        }
        ModuleCtxBuilder::new()
            .with_config_provider(Arc::new(cfg))
            .build()
    }

    #[test]
    fn typed_config_is_read_from_app_config() {
        let ctx = ctx_with(serde_json::json!({"probe": {"base": "/x", "limit": 7}})).for_module("probe");
        let cfg: Probe = ctx.module_config();
        assert_eq!(cfg, Probe { base: "/x".into(), limit: 7 });
        assert_eq!(ctx.current_module(), Some("probe"));
    }

    #[test]
    fn lenient_config_falls_back_to_default() {
        let ctx = ctx_with(serde_json::json!({"probe": {"limit": "not a number"}})).for_module("probe");
        assert_eq!(ctx.module_config::<Probe>(), Probe::default());

        let unscoped = ctx_with(serde_json::json!({}));
        assert_eq!(unscoped.module_config::<Probe>(), Probe::default());
    }

    #[test]
    fn strict_config_reports_missing_and_invalid_sections() {
        let missing = ctx_with(serde_json::json!({})).for_module("probe");
        let err = missing.module_config_required::<Probe>().unwrap_err();
        assert!(err.to_string().contains("missing module config: probe"));

        let invalid = ctx_with(serde_json::json!({"probe": {"limit": -1}})).for_module("probe");
        let err = invalid.module_config_required::<Probe>().unwrap_err();
        assert!(err.to_string().contains("invalid probe config"));

        let unscoped = ctx_with(serde_json::json!({}));
        assert!(unscoped.module_config_required::<Probe>().is_err());
    }
}
