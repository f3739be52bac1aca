use std::path::PathBuf;

/// Errors that abort a reconciliation pass.
///
/// Misplaced video files are not errors: they are logged and counted in
/// [`ScanReport::skipped`](crate::ScanReport::skipped).
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The configured storage root does not exist.
    #[error("Storage root not found: {0}")]
    RootNotFound(PathBuf),

    /// The configured storage root exists but is not a directory.
    #[error("Storage root is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A directory could not be read during traversal.
    #[error("Storage traversal failed: {0}")]
    Traversal(#[from] walkdir::Error),

    /// A catalog write or read failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The blocking traversal task panicked or was cancelled.
    #[error("Traversal task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
