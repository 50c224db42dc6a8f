//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use shopfront_cart::CartStore;
use shopfront_storage::FileStorage;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from a config file, applying the `--data-dir` override.
    pub fn load(
        config_path: Option<&str>,
        data_dir_override: Option<&str>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        if let Some(dir) = data_dir_override {
            config.storage.data_dir = dir.to_string();
        }

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory the cart files live in.
    pub fn data_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.data_dir)
    }

    /// Open the cart store over the data directory.
    pub fn open_store(&self) -> Result<CartStore<FileStorage>> {
        let dir = self.data_dir();
        let storage = FileStorage::open(&dir)
            .with_context(|| format!("Failed to open data directory: {}", dir.display()))?;
        tracing::debug!(data_dir = %dir.display(), key = %self.config.cart.storage_key, "opening cart");
        Ok(CartStore::with_config(storage, &self.config.cart))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(dir: &Path, data_dir: &str) -> Context {
        let mut config = CliConfig::default();
        config.storage.data_dir = data_dir.to_string();
        Context {
            config,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_relative_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_in(dir.path(), ".shopfront");
        assert_eq!(ctx.data_dir(), dir.path().join(".shopfront"));
    }

    #[test]
    fn test_find_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("shopfront.toml"),
            "[cart]\nstorage_key = \"from_parent\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Context::find_config(&nested).unwrap();
        assert_eq!(config.cart.storage_key, "from_parent");
    }

    #[test]
    fn test_open_store_persists_under_configured_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = context_in(dir.path(), "data");
        ctx.config.cart.storage_key = "guest_cart".to_string();

        let mut store = ctx.open_store().unwrap();
        store.add_one(&shopfront_cart::Product::new(
            "mug",
            "Mug",
            shopfront_cart::Price::from_cents(899),
        ));

        assert!(dir.path().join("data").join("guest_cart").exists());
        assert_eq!(ctx.open_store().unwrap().cart().len(), 1);
    }
}
