//! In-memory key-value backend.

use crate::{KvBackend, Result, validate_key};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Process-local key-value backend.
///
/// Values live in a `HashMap` behind an async mutex and are lost when the
/// backend is dropped. Keys are validated with the same rules as
/// [`FileKv`](crate::FileKv) so code exercised against one backend behaves
/// the same against the other.
#[derive(Debug, Default)]
pub struct MemoryKv {
    slots: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryKv {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with `entries`.
    ///
    /// Keys are not validated here; this is intended for test fixtures.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let slots = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            slots: Mutex::new(slots),
        }
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    /// Whether the backend holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.slots.lock().await.is_empty()
    }
}

#[async_trait]
impl KvBackend for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.slots.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        validate_key(key)?;
        self.slots
            .lock()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        validate_key(key)?;
        Ok(self.slots.lock().await.remove(key).is_some())
    }
}
