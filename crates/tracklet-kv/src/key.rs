//! Slot key validation.

use crate::{Error, Result};

/// Maximum key length in bytes.
pub const MAX_KEY_LENGTH: usize = 128;

/// Check that `key` is usable as a slot name on every backend.
///
/// Keys must be 1-128 bytes of ASCII alphanumerics, `-`, `_` or `.`, and
/// must not start with `.`. This keeps file-backed slots inside their
/// directory and away from hidden or temporary files.
///
/// # Errors
///
/// Returns [`Error::InvalidKey`] describing the first rule the key breaks.
pub fn validate_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        Some("key cannot be empty")
    } else if key.len() > MAX_KEY_LENGTH {
        Some("key is longer than 128 bytes")
    } else if key.starts_with('.') {
        Some("key cannot start with '.'")
    } else if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        Some("key may only contain ASCII letters, digits, '-', '_' and '.'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidKey {
            key: key.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
