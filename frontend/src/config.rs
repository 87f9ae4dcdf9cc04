use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_APP_VERSION: &str = "1.0.0";
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::Sao_Paulo;
pub const CLIENT_ID_STORAGE_KEY: &str = "clientId";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "NODE_ENV")]
    pub node_env: Option<String>,
    #[serde(default, alias = "API_PRODUCTION_URL")]
    pub api_production_url: Option<String>,
    #[serde(default, alias = "API_DEVELOPMENT_URL")]
    pub api_development_url: Option<String>,
    #[serde(default, alias = "API_LOCAL_URL")]
    pub api_local_url: Option<String>,
    #[serde(default, alias = "CLIENT_ID")]
    pub client_id: Option<String>,
    #[serde(default, alias = "APP_VERSION")]
    pub app_version: Option<String>,
    #[serde(default, alias = "TIME_ZONE")]
    pub time_zone: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl RuntimeConfig {
    /// Explicit base URL first, then the URL matching `node_env`.
    pub fn resolve_api_base_url(&self) -> String {
        if let Some(url) = non_empty(&self.api_base_url) {
            return url.to_string();
        }
        let by_env = match non_empty(&self.node_env) {
            Some("production") => non_empty(&self.api_production_url),
            Some("development") => non_empty(&self.api_development_url),
            _ => non_empty(&self.api_local_url),
        };
        by_env.unwrap_or(DEFAULT_API_BASE_URL).to_string()
    }

    pub fn resolve_app_version(&self) -> String {
        non_empty(&self.app_version)
            .unwrap_or(DEFAULT_APP_VERSION)
            .to_string()
    }

    pub fn resolve_time_zone(&self) -> Tz {
        match non_empty(&self.time_zone) {
            Some(name) => name.parse::<Tz>().unwrap_or_else(|_| {
                log::warn!("Unknown time zone '{}', using {}", name, DEFAULT_TIME_ZONE);
                DEFAULT_TIME_ZONE
            }),
            None => DEFAULT_TIME_ZONE,
        }
    }

    pub fn resolve_client_id(&self) -> Option<String> {
        non_empty(&self.client_id).map(str::to_string)
    }

    /// Fills the gaps in `self` with values from `fallback`.
    pub fn or(self, fallback: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            node_env: self.node_env.or(fallback.node_env),
            api_production_url: self.api_production_url.or(fallback.api_production_url),
            api_development_url: self.api_development_url.or(fallback.api_development_url),
            api_local_url: self.api_local_url.or(fallback.api_local_url),
            client_id: self.client_id.or(fallback.client_id),
            app_version: self.app_version.or(fallback.app_version),
            time_zone: self.time_zone.or(fallback.time_zone),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == RuntimeConfig::default()
    }
}

static CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

fn cache_config(cfg: RuntimeConfig) -> RuntimeConfig {
    let _ = CONFIG.set(cfg.clone());
    CONFIG.get().cloned().unwrap_or(cfg)
}

pub fn is_resolved() -> bool {
    CONFIG.get().is_some()
}

/// The resolved config, or defaults while it is still loading.
pub fn current() -> RuntimeConfig {
    CONFIG.get().cloned().unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::RuntimeConfig;
    use anyhow::{anyhow, Context};
    use wasm_bindgen::JsValue;

    pub const ENV_GLOBAL: &str = "__CATALOG_ENV";
    pub const CONFIG_GLOBAL: &str = "__CATALOG_CONFIG";

    pub fn read_global(name: &str) -> Option<RuntimeConfig> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        let json = js_sys::JSON::stringify(&value).ok()?.as_string()?;
        match serde_json::from_str::<RuntimeConfig>(&json) {
            Ok(cfg) => Some(cfg),
            Err(err) => {
                log::warn!("Ignoring malformed window.{}: {}", name, err);
                None
            }
        }
    }

    pub fn write_global(name: &str, cfg: &RuntimeConfig) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(json) = serde_json::to_string(cfg) else {
            return;
        };
        if let Ok(value) = js_sys::JSON::parse(&json) {
            let _ = js_sys::Reflect::set(&window, &JsValue::from_str(name), &value);
        }
    }

    pub async fn fetch_config_json() -> anyhow::Result<RuntimeConfig> {
        let origin = web_sys::window()
            .ok_or_else(|| anyhow!("no window"))?
            .location()
            .origin()
            .map_err(|_| anyhow!("no location origin"))?;
        let response = reqwest::get(format!("{}/config.json", origin))
            .await
            .context("requesting config.json")?;
        if !response.status().is_success() {
            return Err(anyhow!("config.json returned {}", response.status()));
        }
        response
            .json::<RuntimeConfig>()
            .await
            .context("decoding config.json")
    }

    pub fn stored_client_id() -> Option<String> {
        crate::utils::storage::local_storage()
            .ok()?
            .get_item(super::CLIENT_ID_STORAGE_KEY)
            .ok()
            .flatten()
            .filter(|id| !id.trim().is_empty())
    }
}

pub async fn await_config() -> RuntimeConfig {
    if let Some(cached) = CONFIG.get() {
        return cached.clone();
    }
    #[cfg(target_arch = "wasm32")]
    {
        let from_globals = browser::read_global(browser::ENV_GLOBAL)
            .unwrap_or_default()
            .or(browser::read_global(browser::CONFIG_GLOBAL).unwrap_or_default());
        if !from_globals.is_empty() {
            return cache_config(from_globals);
        }
        match browser::fetch_config_json().await {
            Ok(cfg) => {
                browser::write_global(browser::CONFIG_GLOBAL, &cfg);
                return cache_config(cfg);
            }
            Err(err) => log::info!("No runtime config.json, using defaults: {:#}", err),
        }
    }
    cache_config(RuntimeConfig::default())
}

pub async fn await_api_base_url() -> String {
    await_config().await.resolve_api_base_url()
}

/// Client id from config, else from `localStorage["clientId"]`.
pub fn client_id() -> Option<String> {
    let configured = current().resolve_client_id();
    #[cfg(target_arch = "wasm32")]
    {
        configured.or_else(browser::stored_client_id)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        configured
    }
}

pub fn app_version() -> String {
    current().resolve_app_version()
}

pub fn time_zone() -> Tz {
    current().resolve_time_zone()
}

pub async fn init() {
    let cfg = await_config().await;
    log::info!(
        "Runtime config resolved: api={} version={} tz={}",
        cfg.resolve_api_base_url(),
        cfg.resolve_app_version(),
        cfg.resolve_time_zone()
    );
}
