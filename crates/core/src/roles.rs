//! Well-known role name constants.
//!
//! These must match the `CHECK` constraint on `users.role` in
//! `20261019000001_create_users.sql`.

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_COACH: &str = "coach";
pub const ROLE_PLAYER: &str = "player";

/// All roles a user may be created with.
pub const VALID_ROLES: &[&str] = &[ROLE_PLAYER, ROLE_COACH, ROLE_ADMIN];

/// Validate a role name, returning the canonical (trimmed) form.
pub fn validate_role(role: &str) -> Result<&str, CoreError> {
    let role = role.trim();
    if VALID_ROLES.contains(&role) {
        Ok(role)
    } else {
        Err(CoreError::Validation(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_roles() {
        assert_eq!(validate_role("admin").unwrap(), "admin");
        assert_eq!(validate_role(" coach ").unwrap(), "coach");
        assert_eq!(validate_role("player").unwrap(), "player");
    }

    #[test]
    fn rejects_unknown_role() {
        let err = validate_role("superuser").unwrap_err();
        assert!(err.to_string().contains("player, coach, admin"));
    }

    #[test]
    fn role_names_are_case_sensitive() {
        assert!(validate_role("Admin").is_err());
    }
}
