//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use woodie_cache::Cache;
use woodie_commerce::cart::{CartStore, KvCartStorage};
use woodie_commerce::catalog::RawProduct;
use woodie_data::CommerceClient;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Page size requested when walking the full product list.
pub const PAGE_SIZE: u64 = 100;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration, environment overrides applied.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = match config_path {
            Some(path) => {
                let path = resolve_path(&cwd, path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };
        config.apply_env();

        if let Some(path) = &config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Commerce API client built from the configuration.
    pub fn client(&self) -> Result<CommerceClient> {
        CommerceClient::new(self.config.api_config())
            .context("Failed to create commerce API client")
    }

    /// Open the persisted cart.
    pub fn cart(&self) -> Result<CartStore<KvCartStorage>> {
        let dir = self.config.data_dir();
        let cache = Cache::open_dir(&dir)
            .with_context(|| format!("Failed to open cart directory: {}", dir.display()))?;
        self.output.debug(&format!("Cart directory: {}", dir.display()));
        Ok(CartStore::load(KvCartStorage::new(cache)))
    }

    /// Fetch every product, showing a spinner meanwhile.
    pub async fn all_products(&self, client: &CommerceClient) -> Result<Vec<RawProduct>> {
        let spinner = self.output.spinner("Loading products...");
        let result = client.fetch_all_products(PAGE_SIZE).await;
        spinner.finish_and_clear();
        let products = result.context("Failed to load products")?;
        self.output
            .debug(&format!("Loaded {} product record(s)", products.len()));
        Ok(products)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve_path(&self.cwd, path)
    }
}

fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
    for dir in start.ancestors() {
        for name in CONFIG_NAMES {
            let path = dir.join(name);
            if !path.exists() {
                continue;
            }
            match CliConfig::load(&path) {
                Ok(config) => return Some((path, config)),
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring config file"),
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join(".woodie.toml"),
            "[api]\nstore_id = \"0000999\"\n",
        )
        .unwrap();

        let (path, config) = find_config(&nested).unwrap();
        assert_eq!(path, root.path().join(".woodie.toml"));
        assert_eq!(config.api.store_id, "0000999");
    }

    #[test]
    fn test_find_config_prefers_nearest() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("woodie.toml"), "[api]\nstore_id = \"outer\"\n").unwrap();
        std::fs::write(nested.join("woodie.toml"), "[api]\nstore_id = \"inner\"\n").unwrap();

        let (_, config) = find_config(&nested).unwrap();
        assert_eq!(config.api.store_id, "inner");
    }

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(cwd, "woodie.toml"), PathBuf::from("/work/woodie.toml"));
        assert_eq!(resolve_path(cwd, "/etc/woodie.toml"), PathBuf::from("/etc/woodie.toml"));
    }
}
