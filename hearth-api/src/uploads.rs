/// Image intake: storage naming, file writes, and cleanup
///
/// Uploaded images are written to a flat directory and served back under the
/// [`PUBLIC_PREFIX`] path. Storage names are derived from the upload
/// timestamp plus the sanitized original extension; a process-wide sequence
/// number keeps names unique even when several files land in the same
/// millisecond.
///
/// The intake also owns removal of superseded files: when a listing is
/// deleted or its image list replaced, the files that fell out of the record
/// are unlinked here. Removal is best-effort; a failure is logged and does
/// not fail the request that triggered it.
///
/// # Example
///
/// ```no_run
/// use hearth_api::uploads::ImageIntake;
///
/// # async fn example() -> std::io::Result<()> {
/// let intake = ImageIntake::new("uploads");
/// intake.ensure_root().await?;
///
/// let path = intake.save(Some("kitchen.JPG"), b"...").await?;
/// assert!(path.starts_with("/uploads/"));
/// assert!(path.ends_with(".jpg"));
/// # Ok(())
/// # }
/// ```

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::{debug, warn};

/// URL prefix uploaded images are served under
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Longest extension carried over from an original filename
const MAX_EXT_LEN: usize = 8;

/// Handle to the upload directory
#[derive(Debug)]
pub struct ImageIntake {
    root: PathBuf,
    seq: AtomicU64,
}

impl ImageIntake {
    /// Creates an intake rooted at `root`
    ///
    /// The directory is not touched until [`ensure_root`](Self::ensure_root)
    /// or the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            seq: AtomicU64::new(0),
        }
    }

    /// Root directory files are written to
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Creates the upload directory if it does not exist
    pub async fn ensure_root(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Assigns a storage name for an uploaded file
    ///
    /// The name is `<unix-millis>-<seq><ext>`. The sequence number makes
    /// names unique within the process even under same-millisecond uploads;
    /// the extension is carried over from the original filename only after
    /// sanitization.
    pub fn assign_name(&self, original: Option<&str>) -> String {
        let millis = Utc::now().timestamp_millis();
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        let ext = sanitize_extension(original);
        format!("{}-{}{}", millis, seq, ext)
    }

    /// Writes an uploaded file and returns its public relative path
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the write
    /// fails. A batch caller is expected to tolerate partial failure: files
    /// written before the error stay on disk until a cleanup pass.
    pub async fn save(&self, original: Option<&str>, bytes: &[u8]) -> io::Result<String> {
        self.ensure_root().await?;

        let name = self.assign_name(original);
        let target = self.root.join(&name);
        tokio::fs::write(&target, bytes).await?;

        debug!(file = %name, size = bytes.len(), "Stored uploaded image");
        Ok(format!("{}/{}", PUBLIC_PREFIX, name))
    }

    /// Removes stored files by their public paths, best-effort
    ///
    /// Paths that do not point directly into the upload directory are
    /// skipped. Failures are logged at warn level and never propagated: the
    /// record change that orphaned these files has already been committed.
    pub async fn remove(&self, paths: &[String]) {
        for path in paths {
            let Some(name) = storage_name(path) else {
                warn!(path = %path, "Refusing to remove path outside the upload directory");
                continue;
            };

            match tokio::fs::remove_file(self.root.join(name)).await {
                Ok(()) => debug!(file = %name, "Removed superseded image"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(file = %name, "Superseded image already gone")
                }
                Err(e) => warn!(file = %name, error = %e, "Failed to remove superseded image"),
            }
        }
    }
}

/// Maps a public path back to its storage name
///
/// Returns `None` for anything that is not a plain file name under
/// [`PUBLIC_PREFIX`], so a crafted path can never escape the directory.
fn storage_name(public_path: &str) -> Option<&str> {
    let name = public_path
        .strip_prefix(PUBLIC_PREFIX)?
        .strip_prefix('/')?;

    if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
        return None;
    }

    Some(name)
}

/// Sanitizes the extension of an original filename
///
/// Lowercased, ASCII alphanumeric, bounded length; anything else is dropped
/// entirely rather than guessed at.
fn sanitize_extension(original: Option<&str>) -> String {
    let Some(original) = original else {
        return String::new();
    };

    let Some((_, ext)) = original.rsplit_once('.') else {
        return String::new();
    };

    let ext = ext.to_ascii_lowercase();
    if ext.is_empty()
        || ext.len() > MAX_EXT_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return String::new();
    }

    format!(".{}", ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_name_carries_extension() {
        let intake = ImageIntake::new("uploads");
        let name = intake.assign_name(Some("kitchen.JPG"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_assign_name_unique_within_same_instant() {
        let intake = ImageIntake::new("uploads");
        let a = intake.assign_name(Some("a.png"));
        let b = intake.assign_name(Some("b.png"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_hostile_extension_dropped() {
        assert_eq!(sanitize_extension(Some("x.p/ng")), "");
        assert_eq!(sanitize_extension(Some("x.")), "");
        assert_eq!(sanitize_extension(Some("x.superlongextension")), "");
        assert_eq!(sanitize_extension(Some("no-extension")), "");
        assert_eq!(sanitize_extension(None), "");
    }

    #[test]
    fn test_storage_name_rejects_traversal() {
        assert_eq!(storage_name("/uploads/a.png"), Some("a.png"));
        assert_eq!(storage_name("/uploads/../etc/passwd"), None);
        assert_eq!(storage_name("/uploads/sub/a.png"), None);
        assert_eq!(storage_name("/elsewhere/a.png"), None);
        assert_eq!(storage_name("/uploads/"), None);
    }
}
