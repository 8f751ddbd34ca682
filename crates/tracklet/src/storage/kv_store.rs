//! [`IssueStore`] over a single key-value slot.
//!
//! The whole collection lives in one slot as a JSON array. Every operation
//! holds the store mutex for its full read (-modify-write) sequence, so two
//! tasks sharing a store never interleave their writes. Separate processes
//! sharing a slot are not coordinated: the last write wins.

use super::{CorruptionPolicy, IssueStore, SeedPolicy, StoreOptions, seed_issues};
use crate::domain::{Issue, IssueId, IssueUpdate, NewIssue};
use crate::error::{Result, StorageError};
use crate::id_generation::{IdGenerator, IdGeneratorConfig};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use tracklet_kv::KvBackend;

/// Suffix of the slot that receives an unreadable blob before re-seeding.
pub const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt";

/// Check that `key` and its corruption backup key are both valid slot keys.
///
/// The backup key is `key` plus [`CORRUPT_BACKUP_SUFFIX`], so store keys are
/// limited to `MAX_KEY_LENGTH - CORRUPT_BACKUP_SUFFIX.len()` bytes.
///
/// # Errors
///
/// Returns [`tracklet_kv::Error::InvalidKey`] naming whichever key failed.
pub fn validate_store_key(key: &str) -> tracklet_kv::Result<()> {
    tracklet_kv::validate_key(key)?;
    tracklet_kv::validate_key(&format!("{key}{CORRUPT_BACKUP_SUFFIX}"))
}

/// Issue store persisting the full collection under one key.
pub struct KvIssueStore {
    backend: Arc<dyn KvBackend>,
    options: StoreOptions,
    lock: Mutex<()>,
}

impl std::fmt::Debug for KvIssueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvIssueStore")
            .field("options", &self.options)
            .field("backend", &"<dyn KvBackend>")
            .finish_non_exhaustive()
    }
}

impl KvIssueStore {
    /// Open a store over `backend`.
    ///
    /// Validates the key (and its backup key) and reads the slot once, which
    /// seeds it if it has never been written.
    ///
    /// # Errors
    ///
    /// - `StorageError::Backend` if the key is invalid or the backend fails
    /// - `StorageError::Corrupted` if the blob is unreadable and the policy
    ///   is [`CorruptionPolicy::Error`]
    pub async fn open(backend: Arc<dyn KvBackend>, options: StoreOptions) -> Result<Self> {
        validate_store_key(&options.key)?;

        let store = Self {
            backend,
            options,
            lock: Mutex::new(()),
        };
        {
            let _guard = store.lock.lock().await;
            let issues = store.read_collection().await?;
            debug!(key = %store.options.key, count = issues.len(), "Opened issue store");
        }
        Ok(store)
    }

    /// The slot key holding the collection.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.options.key
    }

    /// The slot key that receives a corrupted blob.
    #[must_use]
    pub fn backup_key(&self) -> String {
        format!("{}{CORRUPT_BACKUP_SUFFIX}", self.options.key)
    }

    /// Read and parse the collection, seeding an absent slot.
    ///
    /// Callers must hold `self.lock`.
    async fn read_collection(&self) -> Result<Vec<Issue>> {
        let Some(raw) = self.backend.get(&self.options.key).await? else {
            let seed = self.seed();
            self.write_collection(&seed).await?;
            info!(key = %self.options.key, count = seed.len(), "Seeded empty issue store");
            return Ok(seed);
        };

        // Bytes that are not UTF-8 fail here too and take the corruption path.
        match serde_json::from_slice::<Vec<Issue>>(&raw) {
            Ok(issues) => {
                warn_on_duplicate_ids(&issues);
                Ok(issues)
            }
            Err(source) => match self.options.on_corruption {
                CorruptionPolicy::Error => Err(StorageError::Corrupted {
                    key: self.options.key.clone(),
                    source,
                }
                .into()),
                CorruptionPolicy::ResetToSeed => {
                    let backup_key = self.backup_key();
                    warn!(
                        key = %self.options.key,
                        backup = %backup_key,
                        error = %source,
                        "Stored issues are corrupted; backing up and re-seeding"
                    );
                    self.backend.set(&backup_key, &raw).await?;
                    let seed = self.seed();
                    self.write_collection(&seed).await?;
                    Ok(seed)
                }
            },
        }
    }

    /// Serialize and store the whole collection in one write.
    ///
    /// Callers must hold `self.lock`.
    async fn write_collection(&self, issues: &[Issue]) -> Result<()> {
        let blob = serde_json::to_vec(issues).map_err(StorageError::Serialization)?;
        self.backend.set(&self.options.key, &blob).await?;
        debug!(key = %self.options.key, count = issues.len(), "Persisted issue collection");
        Ok(())
    }

    fn seed(&self) -> Vec<Issue> {
        match self.options.seed {
            SeedPolicy::Default => seed_issues(Utc::now()),
            SeedPolicy::Empty => Vec::new(),
        }
    }
}

fn warn_on_duplicate_ids(issues: &[Issue]) {
    let mut seen = HashSet::with_capacity(issues.len());
    for issue in issues {
        if !seen.insert(&issue.id) {
            warn!(id = %issue.id, "Duplicate issue ID in stored collection");
        }
    }
}

#[async_trait]
impl IssueStore for KvIssueStore {
    async fn load_all(&self) -> Result<Vec<Issue>> {
        let _guard = self.lock.lock().await;
        self.read_collection().await
    }

    async fn get_by_id(&self, id: &IssueId) -> Result<Option<Issue>> {
        let _guard = self.lock.lock().await;
        let issues = self.read_collection().await?;
        Ok(issues.into_iter().find(|issue| &issue.id == id))
    }

    async fn create(&self, fields: NewIssue) -> Result<Issue> {
        let _guard = self.lock.lock().await;
        let mut issues = self.read_collection().await?;

        let mut generator = IdGenerator::new(IdGeneratorConfig {
            prefix: self.options.id_prefix.clone(),
            database_size: issues.len(),
        });
        for issue in &issues {
            generator.register_id(issue.id.as_str().to_string());
        }
        let id = IssueId::new(generator.generate(&fields.title, &fields.description)?);

        let issue = Issue {
            id,
            title: fields.title,
            description: fields.description,
            status: fields.status,
            priority: fields.priority,
            created_at: Utc::now(),
        };
        issues.push(issue.clone());
        self.write_collection(&issues).await?;

        debug!(id = %issue.id, "Created issue");
        Ok(issue)
    }

    async fn update(&self, id: &IssueId, patch: IssueUpdate) -> Result<Option<Issue>> {
        let _guard = self.lock.lock().await;
        let mut issues = self.read_collection().await?;

        let Some(issue) = issues.iter_mut().find(|issue| &issue.id == id) else {
            return Ok(None);
        };
        issue.apply(patch);
        let updated = issue.clone();
        self.write_collection(&issues).await?;

        debug!(id = %id, "Updated issue");
        Ok(Some(updated))
    }

    async fn delete(&self, id: &IssueId) -> Result<bool> {
        let _guard = self.lock.lock().await;
        let mut issues = self.read_collection().await?;

        let before = issues.len();
        issues.retain(|issue| &issue.id != id);
        if issues.len() == before {
            return Ok(false);
        }
        self.write_collection(&issues).await?;

        debug!(id = %id, "Deleted issue");
        Ok(true)
    }
}
