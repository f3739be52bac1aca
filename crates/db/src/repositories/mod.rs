//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod annotation_repo;
pub mod player_repo;
pub mod recording_repo;
pub mod team_repo;
pub mod user_repo;

pub use annotation_repo::AnnotationRepo;
pub use player_repo::PlayerRepo;
pub use recording_repo::RecordingRepo;
pub use team_repo::TeamRepo;
pub use user_repo::UserRepo;
