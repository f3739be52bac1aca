pub mod admin;
pub mod annotation;
pub mod auth;
pub mod catalog;
