//! Filesystem traversal for the reconciler.
//!
//! Blocking code: callers on the async runtime run it via
//! `tokio::task::spawn_blocking`.

use std::path::Path;

use vfe_core::storage_layout::{
    is_video_file_name, parse_recording_path, LayoutMismatch, RecordingLocation,
};
use walkdir::WalkDir;

use crate::error::ScanError;

/// A well-placed recording found on disk.
#[derive(Debug, Clone)]
pub struct FoundRecording {
    /// Forward-slash path relative to the storage root.
    pub relative: String,
    pub location: RecordingLocation,
}

/// Everything one traversal learned about the tree.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub recordings: Vec<FoundRecording>,
    /// Video files found outside `teams/<team>/players/<player>/vods/`.
    pub skipped: usize,
}

/// Walk the tree under `root` once, depth-first, collecting every
/// well-placed video file.
///
/// Non-video files are ignored. Video files at any other position are logged
/// at `warn` and counted as skipped. Any unreadable entry aborts the walk.
pub fn walk_storage(root: &Path) -> Result<WalkOutcome, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut outcome = WalkOutcome::default();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(relative) = relative_key(root, entry.path()) else {
            tracing::warn!(path = %entry.path().display(), "Skipping file with a non-UTF-8 path");
            if is_video_file_name(&entry.file_name().to_string_lossy()) {
                outcome.skipped += 1;
            }
            continue;
        };

        match parse_recording_path(&relative) {
            Ok(location) => outcome.recordings.push(FoundRecording { relative, location }),
            Err(LayoutMismatch::NotAVideo) => {
                tracing::trace!(path = %relative, "Ignoring non-video file");
            }
            Err(reason) => {
                tracing::warn!(path = %relative, %reason, "Skipping misplaced video file");
                outcome.skipped += 1;
            }
        }
    }

    tracing::debug!(
        found = outcome.recordings.len(),
        skipped = outcome.skipped,
        "Storage walk complete"
    );
    Ok(outcome)
}

/// Join the components of `path` below `root` with `/`.
///
/// Returns `None` when any component is not valid UTF-8, since such a name
/// cannot be stored as a catalog key or served back by URL.
fn relative_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<&str>>>()?;
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn collects_well_placed_videos_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "teams/T/players/P/vods/a.mp4");
        touch(dir.path(), "teams/T/players/P/vods/notes.txt");
        touch(dir.path(), "teams/T/stray.mkv");

        let outcome = walk_storage(dir.path()).unwrap();
        assert_eq!(outcome.recordings.len(), 1);
        assert_eq!(outcome.recordings[0].relative, "teams/T/players/P/vods/a.mp4");
        assert_eq!(outcome.recordings[0].location.player, "P");
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn empty_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = walk_storage(dir.path()).unwrap();
        assert!(outcome.recordings.is_empty());
        assert_eq!(outcome.skipped, 0);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "teams/T/players/P/vods/ok.mp4");
        let vods = dir.path().join("teams/T/players/P/vods");
        fs::write(vods.join(OsStr::from_bytes(b"bad\xff.mp4")), b"").unwrap();
        fs::write(vods.join(OsStr::from_bytes(b"bad\xfe.mp4")), b"").unwrap();
        fs::write(vods.join(OsStr::from_bytes(b"notes\xff.txt")), b"").unwrap();

        let outcome = walk_storage(dir.path()).unwrap();
        assert_eq!(outcome.recordings.len(), 1);
        assert_eq!(outcome.recordings[0].relative, "teams/T/players/P/vods/ok.mp4");
        assert_eq!(outcome.skipped, 2);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            walk_storage(&missing),
            Err(ScanError::RootNotFound(_))
        ));
    }

    #[test]
    fn file_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "file.mp4");
        assert!(matches!(
            walk_storage(&dir.path().join("file.mp4")),
            Err(ScanError::NotADirectory(_))
        ));
    }
}
