//! HTTP-level tests for the team/player/recording listings.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth};
use sqlx::SqlitePool;
use vfe_db::models::recording::CreateRecording;
use vfe_db::repositories::{PlayerRepo, RecordingRepo, TeamRepo};

async fn seed_recording(pool: &SqlitePool, team: &str, player: &str, file: &str) -> (i64, i64) {
    let (team, _) = TeamRepo::find_or_create(pool, team).await.unwrap();
    let (player, _) = PlayerRepo::find_or_create(pool, team.id, player).await.unwrap();
    let (recording, _) = RecordingRepo::find_or_create(
        pool,
        &CreateRecording {
            player_id: player.id,
            path: format!("storage/teams/{}/players/{}/vods/{file}", team.name, player.name),
            title: Some(file.to_string()),
        },
    )
    .await
    .unwrap();
    (player.id, recording.id)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_state_lists_are_empty(pool: SqlitePool) {
    let (_user, token) = common::user_with_token(&pool, "coach", "coach").await;
    let app = common::build_test_app(pool);

    for uri in [
        "/api/v1/teams",
        "/api/v1/players?team_id=1",
        "/api/v1/recordings",
        "/api/v1/recordings?player_id=1",
        "/api/v1/annotations?recording_id=1",
    ] {
        let response = get_auth(app.clone(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["data"], serde_json::json!([]), "{uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_teams_listed_by_name(pool: SqlitePool) {
    for name in ["Zeta", "Alpha"] {
        TeamRepo::find_or_create(&pool, name).await.unwrap();
    }
    let (_user, token) = common::user_with_token(&pool, "p", "player").await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/v1/teams", &token).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Alpha", "Zeta"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_players_require_team_id(pool: SqlitePool) {
    let (_user, token) = common::user_with_token(&pool, "p", "player").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/players", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_numeric_team_id_uses_error_envelope(pool: SqlitePool) {
    let (_user, token) = common::user_with_token(&pool, "p", "player").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/players?team_id=abc", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_players_listed_for_team(pool: SqlitePool) {
    let (team, _) = TeamRepo::find_or_create(&pool, "Titan").await.unwrap();
    PlayerRepo::find_or_create(&pool, team.id, "Ola").await.unwrap();
    PlayerRepo::find_or_create(&pool, team.id, "Kim").await.unwrap();
    let (_user, token) = common::user_with_token(&pool, "p", "player").await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/players?team_id={}", team.id);
    let json = body_json(get_auth(app, &uri, &token).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Kim", "Ola"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recordings_newest_first_and_filtered(pool: SqlitePool) {
    let (p1, first) = seed_recording(&pool, "T", "A", "one.mp4").await;
    let (_p2, second) = seed_recording(&pool, "T", "B", "two.mp4").await;
    let (_, third) = seed_recording(&pool, "T", "A", "three.mp4").await;
    let (_user, token) = common::user_with_token(&pool, "p", "player").await;
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app.clone(), "/api/v1/recordings", &token).await).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [third, second, first]);
    assert_eq!(json["data"][0]["title"], "three.mp4");
    assert!(json["data"][0]["path"]
        .as_str()
        .unwrap()
        .ends_with("/vods/three.mp4"));

    let uri = format!("/api/v1/recordings?player_id={p1}");
    let json = body_json(get_auth(app, &uri, &token).await).await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [third, first]);
}
