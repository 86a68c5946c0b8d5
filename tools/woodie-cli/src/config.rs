//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use woodie_data::{ApiConfig, RetryPolicy, DEFAULT_BASE_URL, DEFAULT_STORE_ID};

/// File names searched for, nearest directory first.
pub const CONFIG_NAMES: [&str; 2] = ["woodie.toml", ".woodie.toml"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Commerce API configuration.
    #[serde(default)]
    pub api: ApiSection,

    /// Cart persistence.
    #[serde(default)]
    pub cart: CartSection,

    /// Proxy server.
    #[serde(default)]
    pub server: ServerSection,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    /// Apply `WOODIE_*` environment overrides.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from `lookup`. Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = get("WOODIE_API_URL") {
            self.api.base_url = url;
        }
        if let Some(store) = get("WOODIE_STORE_ID") {
            self.api.store_id = store;
        }
        if let Some(bind) = get("WOODIE_BIND") {
            self.server.bind = bind;
        }
    }

    /// Client configuration for the commerce API.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api.base_url.clone())
            .with_store_id(self.api.store_id.clone())
            .with_timeout(Duration::from_secs(self.api.timeout_secs))
            .with_retry(RetryPolicy::new(self.api.max_retries))
    }

    /// Directory the cart is persisted in.
    pub fn data_dir(&self) -> PathBuf {
        match self.cart.data_dir.as_deref() {
            Some(dir) if !dir.trim().is_empty() => expand_home(dir),
            _ => default_data_dir(),
        }
    }
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_store_id")]
    pub store_id: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries for server errors and dropped connections.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_store_id() -> String {
    DEFAULT_STORE_ID.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_max_retries() -> u32 {
    1
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            store_id: default_store_id(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

/// `[cart]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSection {
    /// Defaults to `~/.local/share/woodie`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

fn default_data_dir() -> PathBuf {
    match home_dir() {
        Some(home) => home.join(".local").join("share").join("woodie"),
        None => std::env::temp_dir().join("woodie"),
    }
}

fn expand_home(dir: &str) -> PathBuf {
    match (dir.strip_prefix("~/"), home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if dir == "~" => home_dir().unwrap_or_else(|| PathBuf::from(dir)),
        _ => PathBuf::from(dir),
    }
}

/// Generate a default woodie.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Woodie storefront configuration

[api]
base_url = "{base_url}"
store_id = "{store_id}"
timeout_secs = 15
max_retries = 1

[cart]
# data_dir = "~/.local/share/woodie"

[server]
bind = "127.0.0.1:3000"
"#,
        base_url = DEFAULT_BASE_URL,
        store_id = DEFAULT_STORE_ID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: CliConfig = toml::from_str("[api]\nstore_id = \"0000777\"\n").unwrap();
        assert_eq!(config.api.store_id, "0000777");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert!(config.cart.data_dir.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("WOODIE_API_URL", "http://localhost:9000"),
            ("WOODIE_STORE_ID", "  "),
            ("WOODIE_BIND", "0.0.0.0:8080"),
        ]
        .into_iter()
        .collect();

        let mut config = CliConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.store_id, DEFAULT_STORE_ID);
        assert_eq!(config.server.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_api_config() {
        let mut config = CliConfig::default();
        config.api.timeout_secs = 3;
        config.api.max_retries = 4;
        let api = config.api_config();
        assert_eq!(api.base_url, DEFAULT_BASE_URL);
        assert_eq!(api.timeout, Duration::from_secs(3));
        assert_eq!(api.retry.max_retries, 4);
    }

    #[test]
    fn test_data_dir() {
        let mut config = CliConfig::default();
        config.cart.data_dir = Some("/var/lib/woodie".to_string());
        assert_eq!(config.data_dir(), PathBuf::from("/var/lib/woodie"));

        config.cart.data_dir = Some(String::new());
        assert!(config.data_dir().ends_with("woodie"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("woodie.toml");
        std::fs::write(&path, "[server]\nbind = \"127.0.0.1:4000\"\n").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:4000");

        std::fs::write(&path, "[server\n").unwrap();
        assert!(CliConfig::load(&path).is_err());
    }
}
