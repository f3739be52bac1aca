//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and, where rows are created from external input, a create DTO.

pub mod annotation;
pub mod player;
pub mod recording;
pub mod team;
pub mod user;
