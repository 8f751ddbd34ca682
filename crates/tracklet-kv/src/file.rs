//! Directory-backed key-value backend.
//!
//! Each key is stored in its own file, `<dir>/<key>.json`. Writes go
//! through [`write_atomic`], so a slot file always holds a complete value.

use crate::{KvBackend, Result, validate_key, write_atomic};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension used for slot files.
pub const SLOT_EXTENSION: &str = "json";

/// Key-value backend storing one file per key in a directory.
///
/// Several `FileKv` instances (or processes) may point at the same
/// directory. Each write is atomic, but there is no coordination between
/// writers: the last rename wins.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    /// Open a backend rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the directory cannot be
    /// created.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        debug!(dir = %dir.display(), "Opened file key-value backend");
        Ok(Self { dir })
    }

    /// The directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`](crate::Error::InvalidKey) if the key
    /// fails validation.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{SLOT_EXTENSION}")))
    }
}

#[async_trait]
impl KvBackend for FileKv {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.slot_path(key)?;
        match tokio::fs::read(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.slot_path(key)?;
        write_atomic(&path, value).await
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let path = self.slot_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
