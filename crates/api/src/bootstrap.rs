//! First-run admin seeding.

use vfe_core::roles::ROLE_ADMIN;
use vfe_db::models::user::{CreateUser, User};
use vfe_db::repositories::UserRepo;
use vfe_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Username of the seeded administrator.
pub const BOOTSTRAP_ADMIN_USERNAME: &str = "admin";

/// Create the `admin` account with `password` unless a user of that name
/// already exists. Returns the new user, or `None` when nothing was done.
pub async fn ensure_admin(pool: &DbPool, password: &str) -> AppResult<Option<User>> {
    if UserRepo::find_by_username(pool, BOOTSTRAP_ADMIN_USERNAME)
        .await?
        .is_some()
    {
        return Ok(None);
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: BOOTSTRAP_ADMIN_USERNAME.to_string(),
            display_name: Some("Administrator".to_string()),
            role: ROLE_ADMIN.to_string(),
            password_hash,
        },
    )
    .await?;

    Ok(Some(user))
}
