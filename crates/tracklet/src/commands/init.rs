//! Implementation of the `init` command.
//!
//! Creates the `.tracklet/` directory with a configuration file and an empty
//! data directory. The issue collection itself is seeded on first access.

use crate::config::TrackerConfig;
use crate::error::{ConfigError, Result};
use crate::storage::DEFAULT_ID_PREFIX;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Name of the tracklet directory
pub const TRACKLET_DIR_NAME: &str = ".tracklet";

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the data directory within `.tracklet`
pub const DATA_DIR_NAME: &str = "data";

/// Minimum prefix length
pub const MIN_PREFIX_LENGTH: usize = 2;

/// Maximum prefix length
pub const MAX_PREFIX_LENGTH: usize = 20;

/// Maximum directory depth to traverse when searching for the tracklet root
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Result of the init command
#[derive(Debug)]
pub struct InitResult {
    /// Path to the created `.tracklet` directory
    pub tracklet_dir: PathBuf,
    /// Path to the created config file
    pub config_file: PathBuf,
    /// Path to the created data directory
    pub data_dir: PathBuf,
    /// The prefix used for issue IDs
    pub prefix: String,
}

/// Validate issue ID prefix format.
///
/// A prefix is 2-20 ASCII letters or digits. Expects pre-trimmed input.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPrefix`] describing the first violation.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.len() < MIN_PREFIX_LENGTH {
        return Err(ConfigError::InvalidPrefix(format!(
            "must be at least {MIN_PREFIX_LENGTH} characters"
        ))
        .into());
    }

    if prefix.len() > MAX_PREFIX_LENGTH {
        return Err(ConfigError::InvalidPrefix(format!(
            "cannot exceed {MAX_PREFIX_LENGTH} characters"
        ))
        .into());
    }

    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::InvalidPrefix(
            "must contain only alphanumeric characters".to_string(),
        )
        .into());
    }

    Ok(())
}

/// Initialize tracklet in `base_dir`.
///
/// `prefix` defaults to [`DEFAULT_ID_PREFIX`] and is trimmed before use.
///
/// # Errors
///
/// Returns an error if:
/// - `.tracklet/` already exists
/// - The prefix is invalid
/// - File system operations fail
pub async fn init(base_dir: &Path, prefix: Option<&str>) -> Result<InitResult> {
    let prefix = prefix.unwrap_or(DEFAULT_ID_PREFIX).trim();
    validate_prefix(prefix)?;

    let tracklet_dir = base_dir.join(TRACKLET_DIR_NAME);
    if fs::try_exists(&tracklet_dir).await? {
        return Err(ConfigError::AlreadyInitialized(base_dir.display().to_string()).into());
    }

    let data_dir = tracklet_dir.join(DATA_DIR_NAME);
    fs::create_dir_all(&data_dir).await?;

    let config_file = tracklet_dir.join(CONFIG_FILE_NAME);
    TrackerConfig::new(prefix).save(&config_file).await?;

    info!(dir = %tracklet_dir.display(), prefix, "Initialized tracklet");

    Ok(InitResult {
        tracklet_dir,
        config_file,
        data_dir,
        prefix: prefix.to_string(),
    })
}

/// Check if a directory has been initialized with tracklet.
#[must_use]
pub fn is_initialized(base_dir: &Path) -> bool {
    base_dir.join(TRACKLET_DIR_NAME).is_dir()
}

/// Find the directory containing `.tracklet/`, starting at `start_dir` and
/// walking up through its parents.
///
/// Returns `None` once the filesystem root or [`MAX_TRAVERSAL_DEPTH`] is
/// reached without a match.
#[must_use]
pub fn find_tracklet_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if is_initialized(&current) {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
