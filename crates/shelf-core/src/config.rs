//! Configuration for shelf
//!
//! Loaded from `~/.shelf/config.toml` when present, then overridden from the
//! environment. Every section has defaults, so an empty file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::{SearchPaging, MAX_PAGE_SIZE};
use crate::sources::DEFAULT_BASE_URL;
use crate::store::{validate_key, DEFAULT_STORAGE_KEY};

/// Environment override for the listen address
pub const ENV_ADDR: &str = "SHELF_ADDR";
/// Environment override for the data directory
pub const ENV_DATA_DIR: &str = "SHELF_DATA_DIR";
/// Environment override for the storage key
pub const ENV_STORAGE_KEY: &str = "SHELF_STORAGE_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ShelfConfig {
    pub storage: StorageConfig,
    pub catalog: CatalogConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding `{key}.json`; `~/.shelf/data` when unset
    pub data_dir: Option<PathBuf>,
    /// Key the book list is stored under
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub page_size: u32,
    /// Results addressable through paging, whatever the catalog total says
    pub result_cap: u32,
    /// Characters of description shown on a search card
    pub description_preview_chars: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let paging = SearchPaging::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: paging.page_size(),
            result_cap: paging.result_cap(),
            description_preview_chars: 40,
            timeout_secs: 30,
            user_agent: format!("shelf/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CatalogConfig {
    pub fn paging(&self) -> Result<SearchPaging, ConfigError> {
        SearchPaging::new(self.page_size, self.result_cap)
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl ShelfConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// `~/.shelf`
    pub fn home_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".shelf"))
    }

    /// Load from `~/.shelf/config.toml` (if it exists) and the environment
    pub fn load_standard() -> Result<Self, ConfigError> {
        let mut config = match Self::home_dir().map(|dir| dir.join("config.toml")) {
            Some(path) if path.exists() => {
                tracing::info!("Loading config from {}", path.display());
                Self::from_file(&path)?
            }
            _ => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// `load_standard`)
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = var(ENV_ADDR) {
            self.server.addr = addr;
        }
        if let Some(dir) = var(ENV_DATA_DIR) {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(key) = var(ENV_STORAGE_KEY) {
            self.storage.key = key;
        }
    }

    /// Directory the file storage writes to
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(|| Self::home_dir().map(|dir| dir.join("data")))
            .unwrap_or_else(|| PathBuf::from(".shelf").join("data"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_key(&self.storage.key).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if self.catalog.page_size == 0 || self.catalog.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "catalog.page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        if self.catalog.result_cap < self.catalog.page_size {
            return Err(ConfigError::Invalid(
                "catalog.result_cap must be at least catalog.page_size".to_string(),
            ));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "catalog.timeout_secs must be positive".to_string(),
            ));
        }

        url::Url::parse(&self.catalog.base_url)
            .map_err(|e| ConfigError::Invalid(format!("catalog.base_url: {}", e)))?;

        Ok(())
    }
}
