//! Application context for CLI command execution.
//!
//! [`App`] finds the workspace, loads its configuration, opens the store and
//! wraps it in an [`IssueService`] with the configured latency.
//!
//! # Example
//!
//! ```no_run
//! use tracklet::app::App;
//! use std::path::Path;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let app = App::from_directory(Path::new(".")).await?;
//!     let issues = app.service().get_all_issues().await?;
//!     println!("{} issues", issues.len());
//!     Ok(())
//! }
//! ```

use crate::commands::init::{CONFIG_FILE_NAME, TRACKLET_DIR_NAME, find_tracklet_root};
use crate::config::TrackerConfig;
use crate::error::{ConfigError, Result};
use crate::service::IssueService;
use crate::storage::create_store;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application context for CLI operations.
pub struct App {
    service: IssueService,

    /// Path to the `.tracklet` directory
    tracklet_dir: PathBuf,

    config: TrackerConfig,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("tracklet_dir", &self.tracklet_dir)
            .field("config", &self.config)
            .field("service", &self.service)
            .finish()
    }
}

impl App {
    /// Create an App from the given working directory.
    ///
    /// Searches up the directory tree for `.tracklet/`, loads its
    /// configuration and opens the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tracklet workspace is found in the directory tree
    /// - Configuration cannot be loaded
    /// - The store cannot be opened (including a corrupted collection
    ///   under the default corruption policy)
    pub async fn from_directory(working_dir: &Path) -> Result<Self> {
        let root_dir = find_tracklet_root(working_dir).ok_or(ConfigError::NotInitialized)?;
        let tracklet_dir = root_dir.join(TRACKLET_DIR_NAME);

        let config = TrackerConfig::load(&tracklet_dir.join(CONFIG_FILE_NAME)).await?;
        let backend = config.to_backend(&root_dir);
        debug!(?backend, key = %config.storage.key, "Opening issue store");

        let store = create_store(backend, config.store_options()).await?;
        let service = IssueService::new(store).with_latency(config.service.latency());

        Ok(Self {
            service,
            tracklet_dir,
            config,
        })
    }

    /// The issue service.
    #[must_use]
    pub fn service(&self) -> &IssueService {
        &self.service
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Get the issue ID prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.config.id_prefix
    }

    /// Get the path to the `.tracklet` directory.
    #[must_use]
    pub fn tracklet_dir(&self) -> &Path {
        &self.tracklet_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init;
    use crate::config::BackendKind;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_app_from_initialized_directory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path(), Some("test")).await.unwrap();

        let app = App::from_directory(temp_dir.path()).await.unwrap();

        assert_eq!(app.prefix(), "test");
        assert!(app.tracklet_dir().ends_with(".tracklet"));
        assert_eq!(app.service().latency(), Duration::from_millis(300));
        assert!(
            app.tracklet_dir()
                .join("data")
                .join("issue-tracker-data.json")
                .is_file()
        );
    }

    #[tokio::test]
    async fn test_app_from_subdirectory() {
        let temp_dir = TempDir::new().unwrap();
        init::init(temp_dir.path(), Some("proj")).await.unwrap();

        let sub_dir = temp_dir.path().join("src").join("lib");
        std::fs::create_dir_all(&sub_dir).unwrap();

        let app = App::from_directory(&sub_dir).await.unwrap();
        assert_eq!(app.prefix(), "proj");
    }

    #[tokio::test]
    async fn test_app_from_uninitialized_directory() {
        let temp_dir = TempDir::new().unwrap();

        let err = App::from_directory(temp_dir.path()).await.unwrap_err();
        assert!(err.to_string().contains("Not a tracklet repository"));
    }

    #[tokio::test]
    async fn test_app_with_memory_backend_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let result = init::init(temp_dir.path(), None).await.unwrap();

        let mut config = TrackerConfig::load(&result.config_file).await.unwrap();
        config.storage.backend = BackendKind::Memory;
        config.service.latency_ms = 0;
        config.save(&result.config_file).await.unwrap();

        let app = App::from_directory(temp_dir.path()).await.unwrap();
        assert_eq!(app.service().get_all_issues().await.unwrap().len(), 3);
        assert_eq!(std::fs::read_dir(&result.data_dir).unwrap().count(), 0);
    }
}
