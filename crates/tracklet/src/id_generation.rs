//! Hash-based ID generation for issues.
//!
//! IDs look like `{prefix}-{hash}` (e.g. `iss-a3f8`). The hash is base36 over
//! a SHA-256 of the issue content, a nanosecond timestamp, a per-generator
//! sequence number and a retry nonce, so two creates in the same instant
//! still hash differently.
//!
//! # Features
//!
//! - **Adaptive length**: ID length grows with collection size (4-6 characters)
//! - **Collision checked**: every candidate is tested against the registered
//!   IDs and retried with a new nonce, then a longer length, on collision
//!
//! # Example
//!
//! ```
//! use tracklet::id_generation::{IdGenerator, IdGeneratorConfig};
//!
//! let mut generator = IdGenerator::new(IdGeneratorConfig {
//!     prefix: "iss".to_string(),
//!     database_size: 3,
//! });
//! generator.register_id("iss-0000".to_string());
//!
//! let id = generator.generate("My Issue Title", "Issue description").unwrap();
//! assert!(id.starts_with("iss-"));
//! ```

use chrono::Utc;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

const BASE36_CHARS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const MAX_NONCE: u32 = 100;
const MIN_ID_LENGTH: usize = 4;
const MAX_ID_LENGTH: usize = 8;

/// Errors that can occur during ID generation
#[derive(Debug, Error)]
pub enum IdGenerationError {
    /// Unable to generate a unique ID after exhausting all nonces and lengths
    #[error("Unable to generate unique ID after {attempts} attempts")]
    CollisionExhausted {
        /// Number of candidates tried.
        attempts: u32,
    },

    /// Invalid length parameter
    #[error("Length must be greater than 0")]
    InvalidLength,
}

/// Configuration for ID generation
#[derive(Debug, Clone)]
pub struct IdGeneratorConfig {
    /// Prefix for all IDs (e.g., "iss")
    pub prefix: String,

    /// Current size of the collection (affects adaptive length)
    pub database_size: usize,
}

/// Hash-based ID generator with collision detection.
///
/// The store builds one generator per create, registering every ID in the
/// collection it just loaded, so the set of known IDs is always current.
pub struct IdGenerator {
    config: IdGeneratorConfig,
    existing_ids: HashSet<String>,
    sequence: u64,
}

impl IdGenerator {
    /// Create a new ID generator with the given configuration
    #[must_use]
    pub fn new(config: IdGeneratorConfig) -> Self {
        Self {
            config,
            existing_ids: HashSet::new(),
            sequence: 0,
        }
    }

    /// Register an existing ID to prevent collisions
    pub fn register_id(&mut self, id: String) {
        self.existing_ids.insert(id);
    }

    /// Generate a new unique ID.
    ///
    /// The returned ID is registered, so later calls on the same generator
    /// never return it again.
    ///
    /// # Errors
    ///
    /// Returns [`IdGenerationError::CollisionExhausted`] if every nonce at
    /// every permitted length collides.
    pub fn generate(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<String, IdGenerationError> {
        self.sequence += 1;
        let mut attempts = 0;

        for length in self.adaptive_length()..=MAX_ID_LENGTH {
            for nonce in 0..MAX_NONCE {
                attempts += 1;
                let id = self.generate_hash_id(title, description, nonce, length)?;

                if !self.existing_ids.contains(&id) {
                    if attempts > 1 {
                        debug!(attempts, length, "Generated unique ID after collision retries");
                    }
                    self.existing_ids.insert(id.clone());
                    return Ok(id);
                }
            }
            warn!(
                length,
                max_nonce = MAX_NONCE,
                "All nonces exhausted, increasing ID length"
            );
        }

        Err(IdGenerationError::CollisionExhausted { attempts })
    }

    /// Generate a hash-based ID with the given parameters
    fn generate_hash_id(
        &self,
        title: &str,
        description: &str,
        nonce: u32,
        length: usize,
    ) -> Result<String, IdGenerationError> {
        let timestamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let content = format!(
            "{}|{}|{}|{}|{}",
            title, description, timestamp, self.sequence, nonce
        );

        let hash_bytes = Sha256::digest(content.as_bytes());
        let hash_str = encode_base36(&hash_bytes[..8], length)?;

        Ok(format!("{}-{}", self.config.prefix, hash_str))
    }

    /// Determine ID length based on collection size
    ///
    /// - 0-500 issues: 4 chars
    /// - 501-1,500: 5 chars
    /// - 1,501+: 6 chars
    fn adaptive_length(&self) -> usize {
        match self.config.database_size {
            0..=500 => MIN_ID_LENGTH,
            501..=1500 => 5,
            _ => 6,
        }
    }
}

/// Encode bytes as a fixed-length base36 string.
///
/// Only the first 8 bytes fit in the `u64` accumulator; callers pass a
/// slice of that size.
fn encode_base36(bytes: &[u8], length: usize) -> Result<String, IdGenerationError> {
    if length == 0 {
        return Err(IdGenerationError::InvalidLength);
    }

    let mut num: u64 = 0;
    for &byte in bytes {
        num = num.wrapping_shl(8).wrapping_add(u64::from(byte));
    }

    let mut result = Vec::with_capacity(length);
    while result.len() < length {
        #[allow(clippy::cast_possible_truncation)]
        let remainder = (num % 36) as usize;
        result.push(BASE36_CHARS[remainder]);
        num /= 36;
    }
    result.reverse();

    Ok(result.into_iter().map(char::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(size: usize) -> IdGenerator {
        IdGenerator::new(IdGeneratorConfig {
            prefix: "test".to_string(),
            database_size: size,
        })
    }

    #[test]
    fn test_base36_encoding() {
        let result = encode_base36(&[0x12, 0x34, 0x56, 0x78], 4).unwrap();
        assert_eq!(result.len(), 4);
        assert!(result.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_base36_zero_length_rejected() {
        assert!(matches!(
            encode_base36(&[1], 0),
            Err(IdGenerationError::InvalidLength)
        ));
    }

    #[test]
    fn test_adaptive_length() {
        assert_eq!(generator(100).adaptive_length(), 4);
        assert_eq!(generator(800).adaptive_length(), 5);
        assert_eq!(generator(2000).adaptive_length(), 6);
    }

    #[test]
    fn test_id_format() {
        let id = generator(0).generate("Title", "Description").unwrap();

        let hash = id.strip_prefix("test-").unwrap();
        assert_eq!(hash.len(), 4);
        assert!(hash.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_same_content_yields_distinct_ids() {
        let mut generator = generator(0);

        let ids: HashSet<String> = (0..500)
            .map(|_| generator.generate("Same Title", "Same Description").unwrap())
            .collect();

        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_register_existing_ids() {
        let mut generator = generator(100);
        generator.register_id("test-a3f8".to_string());
        generator.register_id("test-b4g9".to_string());

        let new_id = generator.generate("New", "Issue").unwrap();
        assert_ne!(new_id, "test-a3f8");
        assert_ne!(new_id, "test-b4g9");
    }
}
