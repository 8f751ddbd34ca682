//! Key-value slot storage for tracklet.
//!
//! A [`KvBackend`] maps string keys to whole byte values. Every write
//! replaces the complete value under a key, so a reader observes either the
//! previous value or the new one, never a mix of the two.
//!
//! Two backends are provided:
//!
//! - [`MemoryKv`]: a process-local map, useful for tests and ephemeral runs
//! - [`FileKv`]: one file per key inside a directory, written with the
//!   temp-file-then-rename pattern from [`atomic`]
//!
//! # Example
//!
//! ```
//! use tracklet_kv::{KvBackend, MemoryKv};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> tracklet_kv::Result<()> {
//! let kv = MemoryKv::new();
//! kv.set("greeting", b"hello").await?;
//! assert_eq!(kv.get("greeting").await?.as_deref(), Some(&b"hello"[..]));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod file;
pub mod key;
pub mod memory;

use async_trait::async_trait;

pub use atomic::write_atomic;
pub use error::{Error, Result};
pub use file::FileKv;
pub use key::validate_key;
pub use memory::MemoryKv;

/// A string-keyed store of whole byte values.
///
/// Values are opaque bytes; decoding them is the caller's concern.
///
/// Implementations must be `Send + Sync` so they can sit behind an
/// `Arc<dyn KvBackend>` shared between async tasks.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written or was removed.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the value stored under `key` as a single operation.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove `key`, returning whether a value was present.
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Report whether a value is stored under `key`.
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
