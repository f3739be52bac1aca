//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Access-token issuance and validation.

pub mod jwt;
pub mod password;
