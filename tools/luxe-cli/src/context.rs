//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use luxe_cache::FileStore;
use luxe_commerce::catalog::{Catalog, Product};
use luxe_commerce::ProductId;
use luxe_storefront::{Storefront, StorefrontConfig};

use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Where the config came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    store_override: Option<PathBuf>,
}

impl Context {
    /// Load context from an explicit config file, or the nearest one found
    /// walking up from the working directory.
    pub fn load(config_path: Option<&str>, store: Option<PathBuf>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config_path = match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => StorefrontConfig::discover(&cwd),
        };

        let config = match &config_path {
            Some(path) => StorefrontConfig::load(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => StorefrontConfig::default(),
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            store_override: store,
        })
    }

    /// Directory the file store lives in.
    pub fn store_dir(&self) -> PathBuf {
        if let Some(dir) = &self.store_override {
            return self.resolve_path(dir);
        }
        match &self.config.storage.dir {
            Some(dir) => self.resolve_path(dir),
            None => dirs_path().join("luxe"),
        }
    }

    /// Open the storefront against the file store.
    pub fn storefront(&self) -> Result<Storefront<FileStore>> {
        let dir = self.store_dir();
        self.output.debug(&format!("Using store {}", dir.display()));

        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open store at {}", dir.display()))?;
        Storefront::load(store, self.config.clone()).context("Failed to load storefront state")
    }

    /// The bundled collection.
    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::luxe_collection().context("Failed to load the LUXE collection")
    }

    /// Look up a product, with a helpful error.
    pub fn product<'a>(&self, catalog: &'a Catalog, id: &str) -> Result<&'a Product> {
        catalog
            .get(&ProductId::new(id))
            .with_context(|| "Run `luxe catalog` to see available ids".to_string())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

#[cfg(test)]
impl Context {
    /// Default config with the working directory and store under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            config: StorefrontConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
            store_override: Some(dir.join("store")),
        }
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}
