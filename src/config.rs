//! Startup configuration. Settings come from `~/.book-inventory/config.toml`
//! when it exists, with the `SUPABASE_URL`/`SUPABASE_ANON_KEY` environment
//! variables taking precedence for the hosted store. Anything left unset falls
//! back to a local SQLite file in the same data directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use serde::Deserialize;

use crate::store::{BookStore, RestStore, SqliteStore, DEFAULT_TABLE};

/// Folder name used beneath the user's home directory for application data.
pub const DATA_DIR_NAME: &str = ".book-inventory";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "books.sqlite";
const LOG_FILE_NAME: &str = "book-inventory.log";

pub const URL_ENV: &str = "SUPABASE_URL";
pub const KEY_ENV: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default tracing filter; `RUST_LOG` overrides it.
    pub log_level: String,
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            store: StoreConfig::default(),
        }
    }
}

/// Which kind of store the viewer reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Rest,
    #[default]
    Sqlite,
}

/// The `[store]` table. Every key is optional; `url`/`api_key` only matter for
/// the REST backend and `path` only for SQLite.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: Backend,
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub path: Option<PathBuf>,
    pub table: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            url: None,
            api_key: None,
            path: None,
            table: DEFAULT_TABLE.to_string(),
        }
    }
}

impl AppConfig {
    /// Load the config file from the data directory (if present) and apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let path = data_dir()?.join(CONFIG_FILE_NAME);
        let mut config = Self::from_file(&path)?;
        config.apply_env(env::var(URL_ENV).ok(), env::var(KEY_ENV).ok());
        Ok(config)
    }

    /// Parse `path`, or return defaults when the file does not exist.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Both variables must be set for the hosted store to take over. The
    /// configured table name is kept.
    pub fn apply_env(&mut self, url: Option<String>, api_key: Option<String>) {
        let (Some(url), Some(api_key)) = (url, api_key) else {
            return;
        };
        self.store.backend = Backend::Rest;
        self.store.url = Some(url);
        self.store.api_key = Some(api_key);
    }
}

impl StoreConfig {
    /// Construct the store client this config describes.
    pub fn build(&self) -> Result<Arc<dyn BookStore>> {
        match self.backend {
            Backend::Rest => {
                let url = self
                    .url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .ok_or_else(|| anyhow!("store url is empty"))?;
                let api_key = self
                    .api_key
                    .as_deref()
                    .ok_or_else(|| anyhow!("store api_key is missing"))?;
                let store = RestStore::new(url, api_key, &self.table)
                    .context("failed to build HTTP client")?;
                Ok(Arc::new(store))
            }
            Backend::Sqlite => {
                let path = match &self.path {
                    Some(path) => path.clone(),
                    None => data_dir()?.join(DB_FILE_NAME),
                };
                let store = SqliteStore::open(&path, &self.table)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                Ok(Arc::new(store))
            }
        }
    }
}

/// `~/.book-inventory`.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LOG_FILE_NAME))
}
