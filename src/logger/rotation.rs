//! Size-based log rotation
//!
//! The active log is either *active* (below the threshold, appended to) or
//! *rotated out* (renamed to `{stem}-{epochMillis}.{ext}` and never written
//! again). The next append after a rotation starts a fresh active file.

use chrono::Utc;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Result of a rotation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RotationOutcome {
    /// No active log yet
    NotPresent,

    /// Active log is smaller than the threshold
    BelowThreshold,

    /// Active log was moved to the contained path
    Rotated(PathBuf),

    /// Rotation was attempted but failed; writing continues on the old file
    Failed(String),
}

/// Rotates `path` out when it has reached `max_size` bytes
///
/// Never returns an error: failures are logged and reported as
/// [`RotationOutcome::Failed`].
pub async fn rotate_if_needed(path: &Path, max_size: u64) -> RotationOutcome {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return RotationOutcome::NotPresent,
        Err(e) => {
            tracing::warn!("Cannot check size of {}: {}", path.display(), e);
            return RotationOutcome::Failed(e.to_string());
        }
    };

    if metadata.len() < max_size {
        return RotationOutcome::BelowThreshold;
    }

    let mut millis = Utc::now().timestamp_millis();
    let mut target = rotated_path(path, millis);
    // Never overwrite an archive from the same millisecond
    while tokio::fs::try_exists(&target).await.unwrap_or(false) {
        millis += 1;
        target = rotated_path(path, millis);
    }

    match tokio::fs::rename(path, &target).await {
        Ok(()) => {
            tracing::info!(
                "Rotated submission log ({} bytes) to {}",
                metadata.len(),
                target.display()
            );
            RotationOutcome::Rotated(target)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to rotate {}: {}; continuing with the current file",
                path.display(),
                e
            );
            RotationOutcome::Failed(e.to_string())
        }
    }
}

/// Archive name for `path` rotated at `epoch_millis`
///
/// `logs/indexnow-submissions.json` becomes
/// `logs/indexnow-submissions-1700000000000.json`.
pub fn rotated_path(path: &Path, epoch_millis: i64) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("indexnow-submissions");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    path.with_file_name(format!("{}-{}.{}", stem, epoch_millis, ext))
}
