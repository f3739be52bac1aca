//! Tests for first-run admin seeding.

mod common;

use axum::http::StatusCode;
use common::post_json;
use serde_json::json;
use sqlx::SqlitePool;
use vfe_api::bootstrap::{ensure_admin, BOOTSTRAP_ADMIN_USERNAME};
use vfe_db::repositories::UserRepo;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeds_admin_once(pool: SqlitePool) {
    let created = ensure_admin(&pool, "bootstrap-secret").await.unwrap();
    let admin = created.expect("first call should create the admin");
    assert_eq!(admin.username, BOOTSTRAP_ADMIN_USERNAME);
    assert_eq!(admin.role, "admin");
    assert_eq!(admin.display_name.as_deref(), Some("Administrator"));

    assert!(ensure_admin(&pool, "other-secret").await.unwrap().is_none());
    assert_eq!(UserRepo::list(&pool).await.unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        json!({ "username": "admin", "password": "bootstrap-secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_existing_admin_user_is_left_alone(pool: SqlitePool) {
    common::create_user(&pool, "admin", "coach").await;
    assert!(ensure_admin(&pool, "bootstrap-secret").await.unwrap().is_none());

    let user = UserRepo::find_by_username(&pool, "admin")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, "coach");
}
