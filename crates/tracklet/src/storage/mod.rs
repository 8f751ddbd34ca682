//! Storage abstraction layer for tracklet.
//!
//! The [`IssueStore`] trait owns the canonical issue collection. The one
//! production implementation, [`KvIssueStore`], keeps the whole collection
//! as a single JSON array under one key of a [`KvBackend`] and rewrites it
//! in full on every mutation.
//!
//! Backends:
//!
//! - **In-memory**: [`MemoryKv`], ephemeral, for tests and throwaway sessions
//! - **File**: [`FileKv`], one file per key in a data directory
//!
//! # Absence is not an error
//!
//! The store reports a missing issue as `Ok(None)` / `Ok(false)`. Turning
//! absence into [`Error::IssueNotFound`](crate::error::Error::IssueNotFound)
//! is the job of the [service](crate::service) layer.
//!
//! # Example
//!
//! ```
//! use tracklet::domain::{IssuePriority, IssueStatus, NewIssue};
//! use tracklet::storage::{create_store, StoreBackend, StoreOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let store = create_store(StoreBackend::InMemory, StoreOptions::default()).await?;
//!
//!     // First access materializes the three seed issues.
//!     assert_eq!(store.load_all().await?.len(), 3);
//!
//!     let issue = store
//!         .create(NewIssue {
//!             title: "Implement feature X".to_string(),
//!             description: "Add new functionality".to_string(),
//!             status: IssueStatus::Open,
//!             priority: IssuePriority::Medium,
//!         })
//!         .await?;
//!     println!("Created issue: {}", issue.id);
//!     Ok(())
//! }
//! ```

mod kv_store;
mod seed;

pub use kv_store::{CORRUPT_BACKUP_SUFFIX, KvIssueStore, validate_store_key};
pub use seed::seed_issues;

use crate::domain::{Issue, IssueId, IssueUpdate, NewIssue};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracklet_kv::{FileKv, KvBackend, MemoryKv};

/// Storage key holding the serialized issue collection.
pub const DEFAULT_STORAGE_KEY: &str = "issue-tracker-data";

/// Default prefix for generated issue IDs.
pub const DEFAULT_ID_PREFIX: &str = "iss";

/// Core storage trait for issue management.
///
/// Implementations must be `Send + Sync` so a store can be shared as
/// `Arc<dyn IssueStore>` between the service and tests.
///
/// # Consistency
///
/// Every mutating method reads the full collection, applies one change and
/// writes the full collection back. Implementations must make that sequence
/// atomic with respect to other calls on the same store.
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Return the full collection.
    ///
    /// On first-ever access the slot is seeded and the seed is returned.
    async fn load_all(&self) -> Result<Vec<Issue>>;

    /// Get an issue by ID.
    ///
    /// Returns `None` if the issue doesn't exist.
    async fn get_by_id(&self, id: &IssueId) -> Result<Option<Issue>>;

    /// Create a new issue.
    ///
    /// Generates a unique ID and the creation timestamp, appends the issue
    /// and persists the collection. Field validation is the caller's job.
    async fn create(&self, fields: NewIssue) -> Result<Issue>;

    /// Merge `patch` into an existing issue.
    ///
    /// Returns `None`, without writing, if the issue doesn't exist.
    async fn update(&self, id: &IssueId, patch: IssueUpdate) -> Result<Option<Issue>>;

    /// Delete an issue.
    ///
    /// Returns whether an issue was removed. Nothing is written on a miss.
    async fn delete(&self, id: &IssueId) -> Result<bool>;
}

/// What to write when the storage slot has never been written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedPolicy {
    /// The three example issues from [`seed_issues`]
    #[default]
    Default,

    /// An empty collection
    Empty,
}

/// What to do when the stored blob cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptionPolicy {
    /// Fail the operation with `StorageError::Corrupted`; write nothing
    #[default]
    Error,

    /// Copy the blob to `<key>.corrupt`, then re-seed the slot
    #[serde(rename = "reset")]
    ResetToSeed,
}

/// Settings for a [`KvIssueStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Key of the slot holding the collection
    pub key: String,

    /// Prefix for generated issue IDs
    pub id_prefix: String,

    /// Contents written on first access
    pub seed: SeedPolicy,

    /// Handling of an unparsable blob
    pub on_corruption: CorruptionPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_STORAGE_KEY.to_string(),
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            seed: SeedPolicy::Default,
            on_corruption: CorruptionPolicy::Error,
        }
    }
}

/// Storage backend configuration.
///
/// Determines which key-value backend the store writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-memory slots (ephemeral)
    InMemory,

    /// One file per slot in the given directory (persistent)
    File(PathBuf),
}

impl StoreBackend {
    /// Returns the data directory for file-based backends.
    #[must_use]
    pub fn data_path(&self) -> Option<&Path> {
        match self {
            StoreBackend::File(dir) => Some(dir),
            StoreBackend::InMemory => None,
        }
    }
}

/// Create a store for the given backend.
///
/// The store is opened immediately, so the seed is materialized (or a
/// corrupted slot reported) before this returns.
///
/// # Errors
///
/// - `Error::Storage` if the data directory cannot be created, the key is
///   invalid, or the existing blob is corrupted under
///   [`CorruptionPolicy::Error`]
pub async fn create_store(
    backend: StoreBackend,
    options: StoreOptions,
) -> Result<Arc<dyn IssueStore>> {
    let kv: Arc<dyn KvBackend> = match backend {
        StoreBackend::InMemory => Arc::new(MemoryKv::new()),
        StoreBackend::File(dir) => Arc::new(FileKv::open(dir).await?),
    };
    let store = KvIssueStore::open(kv, options).await?;
    Ok(Arc::new(store))
}

// ========== Test Utilities ==========

/// An [`IssueStore`] whose every operation fails with a backend error.
///
/// Useful for checking that callers surface storage failures instead of
/// masking them as "not found".
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct FailingStore;

#[cfg(any(test, feature = "test-util"))]
impl FailingStore {
    /// Message carried by every error this store returns.
    pub const MESSAGE: &'static str = "simulated storage failure";

    /// Create a new failing store.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn error() -> crate::error::Error {
        tracklet_kv::Error::Io(std::io::Error::other(Self::MESSAGE)).into()
    }
}

#[cfg(any(test, feature = "test-util"))]
#[async_trait]
impl IssueStore for FailingStore {
    async fn load_all(&self) -> Result<Vec<Issue>> {
        Err(Self::error())
    }

    async fn get_by_id(&self, _id: &IssueId) -> Result<Option<Issue>> {
        Err(Self::error())
    }

    async fn create(&self, _fields: NewIssue) -> Result<Issue> {
        Err(Self::error())
    }

    async fn update(&self, _id: &IssueId, _patch: IssueUpdate) -> Result<Option<Issue>> {
        Err(Self::error())
    }

    async fn delete(&self, _id: &IssueId) -> Result<bool> {
        Err(Self::error())
    }
}
