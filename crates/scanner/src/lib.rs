//! Storage reconciler.
//!
//! Keeps the catalog's recordings in step with the media files found under
//! the storage root. See [`Reconciler::run`] for the algorithm.

pub mod error;
pub mod reconciler;
pub mod walk;

pub use error::ScanError;
pub use reconciler::{Reconciler, ScanReport};
