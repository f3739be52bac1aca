//! Storage tree layout rules shared by the reconciler and the admin
//! handlers.
//!
//! Recordings live at a fixed depth below the storage root:
//!
//! ```text
//! <root>/teams/<team>/players/<player>/vods/<file>.<ext>
//! ```
//!
//! Everything here is pure string/path manipulation so that malformed
//! layouts can be tested without touching the filesystem.

use std::path::{Path, PathBuf};

use crate::error::CoreError;

// ── Constants ────────────────────────────────────────────────────────

/// Video file extensions recognised by the reconciler (compared lowercase).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "avi", "mkv"];

/// Directory holding one sub-directory per team.
pub const TEAMS_DIR: &str = "teams";

/// Directory inside a team holding one sub-directory per player.
pub const PLAYERS_DIR: &str = "players";

/// Directory inside a player holding the recordings.
pub const VODS_DIR: &str = "vods";

/// Number of path segments below the root for a well-placed recording.
const RECORDING_DEPTH: usize = 6;

/// Maximum length of a team or player name.
pub const MAX_NAME_LENGTH: usize = 128;

// ── Types ────────────────────────────────────────────────────────────

/// Team/player/file identity derived from a recording's position in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingLocation {
    pub team: String,
    pub player: String,
    pub file_name: String,
}

/// Why a root-relative path is not a well-placed recording.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutMismatch {
    #[error("not a recognised video file")]
    NotAVideo,

    #[error("expected 6 path segments, found {0}")]
    WrongDepth(usize),

    #[error("segment {position} should be '{expected}', found '{found}'")]
    UnexpectedSegment {
        position: usize,
        expected: &'static str,
        found: String,
    },

    #[error("empty path segment")]
    EmptySegment,
}

// ── Pure functions ───────────────────────────────────────────────────

/// Whether a file name ends in a recognised video extension (case-insensitive).
pub fn is_video_file_name(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        }
        _ => false,
    }
}

/// Parse a forward-slash, root-relative path into its team/player/file parts.
///
/// Accepts exactly `teams/<team>/players/<player>/vods/<file>` where `<file>`
/// has a video extension.
pub fn parse_recording_path(relative: &str) -> Result<RecordingLocation, LayoutMismatch> {
    let segments: Vec<&str> = relative.split('/').collect();

    let file_name = segments.last().copied().unwrap_or_default();
    if !is_video_file_name(file_name) {
        return Err(LayoutMismatch::NotAVideo);
    }

    if segments.len() != RECORDING_DEPTH {
        return Err(LayoutMismatch::WrongDepth(segments.len()));
    }

    if segments.iter().any(|s| s.is_empty()) {
        return Err(LayoutMismatch::EmptySegment);
    }

    for (position, expected) in [(0, TEAMS_DIR), (2, PLAYERS_DIR), (4, VODS_DIR)] {
        if segments[position] != expected {
            return Err(LayoutMismatch::UnexpectedSegment {
                position,
                expected,
                found: segments[position].to_string(),
            });
        }
    }

    Ok(RecordingLocation {
        team: segments[1].to_string(),
        player: segments[3].to_string(),
        file_name: file_name.to_string(),
    })
}

/// Normalise a storage root into the prefix used in recording keys.
///
/// Backslashes become forward slashes and trailing slashes are dropped, so
/// `storage`, `storage/` and `storage\` all yield `storage`.
pub fn normalize_root(root: &Path) -> String {
    let raw = root.to_string_lossy().replace('\\', "/");
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() && raw.starts_with('/') {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Build the catalog key for a recording: `<root>/<relative>`.
pub fn recording_key(root_key: &str, relative: &str) -> String {
    if root_key.is_empty() {
        relative.to_string()
    } else if root_key.ends_with('/') {
        format!("{root_key}{relative}")
    } else {
        format!("{root_key}/{relative}")
    }
}

/// Validate a team or player name for use both as a catalog row and as a
/// directory name. Returns the trimmed name.
pub fn validate_entity_name<'a>(kind: &str, name: &'a str) -> Result<&'a str, CoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CoreError::Validation(format!("{kind} name is required")));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{kind} name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(CoreError::Validation(format!(
            "{kind} name must not contain path separators or be '.' or '..'"
        )));
    }
    Ok(name)
}

/// `<root>/teams/<team>/players`
pub fn team_players_dir(root: &Path, team: &str) -> PathBuf {
    root.join(TEAMS_DIR).join(team).join(PLAYERS_DIR)
}

/// `<root>/teams/<team>/players/<player>/vods`
pub fn player_vods_dir(root: &Path, team: &str, player: &str) -> PathBuf {
    team_players_dir(root, team).join(player).join(VODS_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_placed_recording() {
        let loc = parse_recording_path("teams/Titan/players/Vegard/vods/match1.mp4").unwrap();
        assert_eq!(
            loc,
            RecordingLocation {
                team: "Titan".into(),
                player: "Vegard".into(),
                file_name: "match1.mp4".into(),
            }
        );
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert!(is_video_file_name("Final.MP4"));
        assert!(is_video_file_name("scrim.Mkv"));
        assert!(!is_video_file_name("notes.txt"));
        assert!(!is_video_file_name("mp4"));
        assert!(!is_video_file_name(".mp4"));
    }

    #[test]
    fn rejects_non_video() {
        assert_eq!(
            parse_recording_path("teams/T/players/P/vods/readme.txt"),
            Err(LayoutMismatch::NotAVideo)
        );
    }

    #[test]
    fn rejects_shallow_and_deep_paths() {
        assert_eq!(
            parse_recording_path("teams/T/loose.mp4"),
            Err(LayoutMismatch::WrongDepth(3))
        );
        assert_eq!(
            parse_recording_path("teams/T/players/P/vods/extra/deep.mp4"),
            Err(LayoutMismatch::WrongDepth(7))
        );
        assert_eq!(
            parse_recording_path("loose.mp4"),
            Err(LayoutMismatch::WrongDepth(1))
        );
    }

    #[test]
    fn rejects_misnamed_segments() {
        assert_eq!(
            parse_recording_path("squads/T/players/P/vods/a.mp4"),
            Err(LayoutMismatch::UnexpectedSegment {
                position: 0,
                expected: "teams",
                found: "squads".into(),
            })
        );
        assert_eq!(
            parse_recording_path("teams/T/players/P/clips/a.mp4"),
            Err(LayoutMismatch::UnexpectedSegment {
                position: 4,
                expected: "vods",
                found: "clips".into(),
            })
        );
    }

    #[test]
    fn rejects_empty_segments() {
        assert_eq!(
            parse_recording_path("teams//players/P/vods/a.mp4"),
            Err(LayoutMismatch::EmptySegment)
        );
    }

    #[test]
    fn root_normalisation() {
        assert_eq!(normalize_root(Path::new("storage")), "storage");
        assert_eq!(normalize_root(Path::new("storage/")), "storage");
        assert_eq!(normalize_root(Path::new("data\\storage")), "data/storage");
        assert_eq!(normalize_root(Path::new("/")), "/");
    }

    #[test]
    fn recording_key_joins_with_single_slash() {
        assert_eq!(
            recording_key("storage", "teams/T/players/P/vods/a.mp4"),
            "storage/teams/T/players/P/vods/a.mp4"
        );
        assert_eq!(recording_key("/", "teams/a.mp4"), "/teams/a.mp4");
    }

    #[test]
    fn entity_name_rules() {
        assert_eq!(validate_entity_name("Team", "  Titan ").unwrap(), "Titan");
        assert!(validate_entity_name("Team", "   ").is_err());
        assert!(validate_entity_name("Team", "..").is_err());
        assert!(validate_entity_name("Player", "a/b").is_err());
        assert!(validate_entity_name("Player", "a\\b").is_err());
        assert!(validate_entity_name("Player", &"x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn directory_helpers() {
        let root = Path::new("storage");
        assert_eq!(
            player_vods_dir(root, "T", "P"),
            Path::new("storage/teams/T/players/P/vods")
        );
        assert_eq!(team_players_dir(root, "T"), Path::new("storage/teams/T/players"));
    }
}
