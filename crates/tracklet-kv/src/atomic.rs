//! Atomic whole-file writes.
//!
//! Data is written to a sibling file with a `.tmp` extension, flushed, and
//! then renamed over the target. On POSIX systems a rename within one
//! filesystem is atomic, so the target is never observed half-written. If
//! the process dies before the rename, the original file is untouched.

use crate::Result;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Atomically replaces the contents of `path` with `contents`.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created or written,
/// or if the final rename fails (e.g. a cross-filesystem move). On failure
/// the temporary file is removed on a best-effort basis and the original
/// file is left unchanged.
///
/// # Examples
///
/// ```no_run
/// use tracklet_kv::write_atomic;
///
/// # async fn example() -> tracklet_kv::Result<()> {
/// write_atomic("slot.json", br#"[{"id":"1"}]"#).await?;
/// # Ok(())
/// # }
/// ```
pub async fn write_atomic<P>(path: P, contents: &[u8]) -> Result<()>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, contents).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;
    tracing::trace!(path = %path.display(), bytes = contents.len(), "Atomic write complete");
    Ok(())
}

/// Creates the temporary path used while writing `path`.
///
/// `.tmp` is appended to the existing extension, or used as the extension
/// when there is none.
pub(crate) fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

async fn write_to_temp_file(temp_path: &Path, contents: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).await?;
    file.write_all(contents).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(())
}
