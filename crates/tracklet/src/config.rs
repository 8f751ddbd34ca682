//! Workspace configuration stored in `.tracklet/config.yaml`.
//!
//! ```yaml
//! id-prefix: iss
//! storage:
//!   backend: file
//!   data_dir: .tracklet/data
//!   key: issue-tracker-data
//!   on_corruption: error
//! service:
//!   latency_ms: 300
//! ```

use crate::commands::init::{DATA_DIR_NAME, TRACKLET_DIR_NAME, validate_prefix};
use crate::error::{ConfigError, Result};
use crate::service::DEFAULT_SIMULATED_LATENCY;
use crate::storage::{
    CorruptionPolicy, DEFAULT_ID_PREFIX, DEFAULT_STORAGE_KEY, SeedPolicy, StoreBackend,
    StoreOptions, validate_store_key,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

/// Largest simulated latency accepted from the config file.
pub const MAX_LATENCY_MS: u64 = 60_000;

/// Configuration file structure for tracklet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Issue ID prefix (e.g., "iss" for "iss-a3f8")
    #[serde(rename = "id-prefix")]
    pub id_prefix: String,

    /// Storage configuration
    pub storage: StorageConfig,

    /// Service configuration
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Which key-value backend holds the issue collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One file per key under `data_dir`
    #[default]
    File,
    /// Process memory; nothing survives the command
    Memory,
}

/// Storage configuration section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// Backend type
    pub backend: BackendKind,

    /// Data directory, relative to the workspace root
    pub data_dir: String,

    /// Key of the slot holding the collection
    #[serde(default = "default_key")]
    pub key: String,

    /// Handling of an unparsable collection
    #[serde(default)]
    pub on_corruption: CorruptionPolicy,
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Service configuration section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Simulated latency per request, in milliseconds
    pub latency_ms: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            latency_ms: u64::try_from(DEFAULT_SIMULATED_LATENCY.as_millis()).unwrap_or(0),
        }
    }
}

impl ServiceConfig {
    /// The configured latency as a [`Duration`].
    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl TrackerConfig {
    /// Create a new configuration with the given prefix
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            id_prefix: prefix.to_string(),
            storage: StorageConfig {
                backend: BackendKind::File,
                data_dir: format!("{TRACKLET_DIR_NAME}/{DATA_DIR_NAME}"),
                key: default_key(),
                on_corruption: CorruptionPolicy::Error,
            },
            service: ServiceConfig::default(),
        }
    }

    /// Load and validate configuration from a file
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid YAML, or holds an
    /// out-of-range value.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Fails if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Check every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPrefix`] or [`ConfigError::InvalidValue`].
    pub fn validate(&self) -> Result<()> {
        validate_prefix(&self.id_prefix)?;

        if self.storage.backend == BackendKind::File && self.storage.data_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.data_dir",
                reason: "must not be empty for the file backend".to_string(),
            }
            .into());
        }

        validate_store_key(&self.storage.key).map_err(|e| ConfigError::InvalidValue {
            field: "storage.key",
            reason: e.to_string(),
        })?;

        if self.service.latency_ms > MAX_LATENCY_MS {
            return Err(ConfigError::InvalidValue {
                field: "service.latency_ms",
                reason: format!("must be at most {MAX_LATENCY_MS}"),
            }
            .into());
        }

        Ok(())
    }

    /// Resolve the storage backend, with relative paths taken from `root`.
    #[must_use]
    pub fn to_backend(&self, root: &Path) -> StoreBackend {
        match self.storage.backend {
            BackendKind::File => StoreBackend::File(root.join(&self.storage.data_dir)),
            BackendKind::Memory => StoreBackend::InMemory,
        }
    }

    /// Store settings derived from this configuration.
    #[must_use]
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            key: self.storage.key.clone(),
            id_prefix: self.id_prefix.clone(),
            seed: SeedPolicy::Default,
            on_corruption: self.storage.on_corruption,
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}
