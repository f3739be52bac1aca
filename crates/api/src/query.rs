//! Query parameter types for the listing and annotation endpoints.
//!
//! Required ids are declared `Option` so a missing parameter becomes a
//! `VALIDATION_ERROR` from [`require`] instead of an extractor rejection.

use serde::Deserialize;
use vfe_core::error::CoreError;
use vfe_core::types::DbId;

/// `?team_id=`
#[derive(Debug, Deserialize)]
pub struct TeamFilter {
    pub team_id: Option<DbId>,
}

/// `?player_id=`
#[derive(Debug, Deserialize)]
pub struct PlayerFilter {
    pub player_id: Option<DbId>,
}

/// `?recording_id=&author_id=`
#[derive(Debug, Deserialize)]
pub struct AnnotationFilter {
    pub recording_id: Option<DbId>,
    pub author_id: Option<DbId>,
}

/// Unwrap a required query parameter.
pub fn require(value: Option<DbId>, name: &str) -> Result<DbId, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("{name} is required")))
}
