//! Pure domain logic for the VOD review service.
//!
//! Nothing in this crate touches the database, the network, or the
//! filesystem. It holds the shared error type, id and timestamp aliases,
//! role names, the storage layout rules used by the reconciler, and the
//! annotation content rules used by the synchronizer.

pub mod annotation;
pub mod error;
pub mod roles;
pub mod storage_layout;
pub mod types;
