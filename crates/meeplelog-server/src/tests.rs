//! Router-level tests against the fully in-memory state.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use meeplelog_auth::{User, UserStorage, password::hash_password};

use crate::config::AppConfig;
use crate::routes::build_router;
use crate::state::AppState;

fn test_state() -> AppState {
    let mut config = AppConfig::default();
    config.auth.secret_key = "router-test-secret".to_string();
    AppState::in_memory(config).unwrap()
}

fn request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    let body: Vec<String> = fields.iter().map(|(k, v)| format!("{k}={v}")).collect();
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.join("&")))
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register(app: &Router, name: &str, email: &str, password: &str) -> StatusCode {
    let (status, _) = send(
        app,
        request(
            "POST",
            "/api/v1/users/create",
            None,
            Some(json!({
                "name": name,
                "email": email,
                "password": password,
                "check_password": password,
            })),
        ),
    )
    .await;
    status
}

/// Logs in and returns (access_token, refresh_token).
async fn login(app: &Router, name: &str, password: &str) -> (String, String) {
    let (status, body) = send(
        app,
        form_request(
            "/api/v1/users/login",
            &[("username", name), ("password", password)],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (
        body["access_token"].as_str().unwrap().to_string(),
        body["refresh_token"].as_str().unwrap().to_string(),
    )
}

/// Inserts an admin directly into storage and logs them in.
async fn login_as_admin(state: &AppState, app: &Router) -> String {
    let mut admin = User::new("admin", "admin@example.com", hash_password("adminpw").unwrap());
    admin.is_admin = true;
    state.users.create(&admin).await.unwrap();
    login(app, "admin", "adminpw").await.0
}

async fn create_game(app: &Router, admin_token: &str, name: &str, min: u32, max: u32) {
    let (status, _) = send(
        app,
        request(
            "POST",
            "/api/v1/games/create",
            Some(admin_token),
            Some(json!({
                "name": name,
                "weight": 2.5,
                "min_players": min,
                "max_players": max,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

// =============================================================================
// Users: registration and login
// =============================================================================

#[tokio::test]
async fn register_login_me_logout_round_trip() {
    let state = test_state();
    let app = build_router(state);

    assert_eq!(
        register(&app, "alice", "alice@example.com", "pw123").await,
        StatusCode::CREATED
    );

    let (access, _) = login(&app, "alice", "pw123").await;

    let (status, body) = send(
        &app,
        request("GET", "/api/v1/users/list/me", Some(&access), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "alice");
    assert!(body.get("password_hash").is_none());

    let (status, _) = send(
        &app,
        request("POST", "/api/v1/users/logout", Some(&access), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Same token, same endpoint: revoked now.
    let (status, _) = send(
        &app,
        request("GET", "/api/v1/users/list/me", Some(&access), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registration_validations() {
    let state = test_state();
    let app = build_router(state);
    register(&app, "alice", "alice@example.com", "pw123").await;

    // Duplicate name.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/users/create",
            None,
            Some(json!({
                "name": "alice",
                "email": "other@example.com",
                "password": "pw",
                "check_password": "pw",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Duplicate email.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/users/create",
            None,
            Some(json!({
                "name": "bob",
                "email": "alice@example.com",
                "password": "pw",
                "check_password": "pw",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Password mismatch.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/users/create",
            None,
            Some(json!({
                "name": "carol",
                "email": "carol@example.com",
                "password": "pw",
                "check_password": "pw2",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);

    // Reserved name.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/users/create",
            None,
            Some(json!({
                "name": "All",
                "email": "all@example.com",
                "password": "pw",
                "check_password": "pw",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let state = test_state();
    let app = build_router(state);
    register(&app, "alice", "alice@example.com", "pw123").await;

    let (status1, body1) = send(
        &app,
        form_request(
            "/api/v1/users/login",
            &[("username", "alice"), ("password", "wrong")],
        ),
    )
    .await;
    let (status2, body2) = send(
        &app,
        form_request(
            "/api/v1/users/login",
            &[("username", "ghost"), ("password", "pw123")],
        ),
    )
    .await;

    assert_eq!(status1, StatusCode::UNAUTHORIZED);
    assert_eq!(status2, StatusCode::UNAUTHORIZED);
    assert_eq!(body1["detail"], body2["detail"]);
}

// =============================================================================
// Users: refresh and token handling
// =============================================================================

#[tokio::test]
async fn refresh_issues_new_access_token() {
    let state = test_state();
    let app = build_router(state);
    register(&app, "alice", "alice@example.com", "pw123").await;
    let (access, refresh) = login(&app, "alice", "pw123").await;

    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    let (status, body) = send(
        &app,
        request("POST", "/api/v1/users/refresh", Some(&refresh), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let new_access = body["access_token"].as_str().unwrap();
    assert_ne!(new_access, access);

    // The refreshed access token is usable on protected endpoints.
    let (status, _) = send(
        &app,
        request("GET", "/api/v1/users/list/me", Some(new_access), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn refresh_rejects_tampered_and_rotated_tokens() {
    let state = test_state();
    let app = build_router(state);
    register(&app, "alice", "alice@example.com", "pw123").await;
    let (_, first_refresh) = login(&app, "alice", "pw123").await;

    let tampered = format!("{first_refresh}12332");
    let (status, _) = send(
        &app,
        request("POST", "/api/v1/users/refresh", Some(&tampered), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Re-login rotates the stored token; the old one stops matching.
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    let (_, second_refresh) = login(&app, "alice", "pw123").await;
    assert_ne!(first_refresh, second_refresh);

    let (status, _) = send(
        &app,
        request("POST", "/api/v1/users/refresh", Some(&first_refresh), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request("POST", "/api/v1/users/refresh", Some(&second_refresh), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn expired_access_token_rejected_but_refresh_recovers() {
    let state = test_state();
    let app = build_router(state.clone());
    register(&app, "alice", "alice@example.com", "pw123").await;
    let (_, refresh) = login(&app, "alice", "pw123").await;

    let expired = state
        .auth
        .codec
        .create("alice", time::Duration::minutes(-1))
        .unwrap();
    let (status, body) = send(
        &app,
        request("GET", "/api/v1/users/list/me", Some(&expired), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Token has expired");

    let (status, body) = send(
        &app,
        request("POST", "/api/v1/users/refresh", Some(&refresh), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let access = body["access_token"].as_str().unwrap();

    let (status, _) = send(
        &app,
        request("GET", "/api/v1/users/list/me", Some(access), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn missing_and_malformed_authorization_rejected() {
    let state = test_state();
    let app = build_router(state);

    let (status, _) = send(&app, request("GET", "/api/v1/users/list/me", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let malformed = Request::builder()
        .method("GET")
        .uri("/api/v1/users/list/me")
        .header(header::AUTHORIZATION, "Basic abc123")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Users: profile updates and lifecycle
// =============================================================================

#[tokio::test]
async fn patch_email_rules() {
    let state = test_state();
    let app = build_router(state);
    register(&app, "alice", "alice@example.com", "pw123").await;
    register(&app, "bob", "bob@example.com", "pw123").await;
    let (access, _) = login(&app, "alice", "pw123").await;

    // Unknown fields are rejected by the enumerated-update type.
    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/api/v1/users/patch",
            Some(&access),
            Some(json!({ "name": "newname" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Identical value conflicts.
    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/api/v1/users/patch",
            Some(&access),
            Some(json!({ "email": "alice@example.com" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Taken by another user.
    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/api/v1/users/patch",
            Some(&access),
            Some(json!({ "email": "bob@example.com" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Happy path is visible from /list/me.
    let (status, body) = send(
        &app,
        request(
            "PATCH",
            "/api/v1/users/patch",
            Some(&access),
            Some(json!({ "email": "new@example.com" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "new@example.com");

    let (_, body) = send(
        &app,
        request("GET", "/api/v1/users/list/me", Some(&access), None),
    )
    .await;
    assert_eq!(body["email"], "new@example.com");
}

#[tokio::test]
async fn deactivate_ends_session_and_hides_user() {
    let state = test_state();
    let app = build_router(state.clone());
    register(&app, "alice", "alice@example.com", "pw123").await;
    let admin_access = login_as_admin(&state, &app).await;
    let (access, _) = login(&app, "alice", "pw123").await;

    let (status, _) = send(
        &app,
        request("PATCH", "/api/v1/users/deactivate", Some(&access), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Session ended with the request.
    let (status, _) = send(
        &app,
        request("GET", "/api/v1/users/list/me", Some(&access), None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Hidden from public lookups.
    let (status, _) = send(&app, request("GET", "/api/v1/users/list/alice", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, request("GET", "/api/v1/users/list", None, None)).await;
    assert!(
        body.as_array()
            .unwrap()
            .iter()
            .all(|u| u["name"] != "alice")
    );

    // Visible on the admin's deactivated list.
    let (status, body) = send(
        &app,
        request(
            "GET",
            "/api/v1/users/list/deactivate",
            Some(&admin_access),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Restore can be requested once deactivated, not before.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/users/restore",
            None,
            Some(json!({ "name": "alice" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn restore_confirm_reactivates_account() {
    let state = test_state();
    let app = build_router(state.clone());
    register(&app, "alice", "alice@example.com", "pw123").await;
    let (access, _) = login(&app, "alice", "pw123").await;

    send(
        &app,
        request("PATCH", "/api/v1/users/deactivate", Some(&access), None),
    )
    .await;

    // Restore of an active user 404s; the deactivated one succeeds.
    let token = state
        .auth
        .codec
        .create("alice", time::Duration::minutes(30))
        .unwrap();
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/users/restore/confirm",
            None,
            Some(json!({ "token": token })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, request("GET", "/api/v1/users/list/alice", None, None)).await;
    assert_eq!(status, StatusCode::OK);

    // The token was consumed on first use.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/users/restore/confirm",
            None,
            Some(json!({ "token": token })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn password_reset_flow_swaps_credentials() {
    let state = test_state();
    let app = build_router(state.clone());
    register(&app, "alice", "alice@example.com", "pw123").await;

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/users/reset-password",
            None,
            Some(json!({ "name": "alice" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/users/reset-password",
            None,
            Some(json!({ "name": "ghost" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Recovery tokens are stateless, so an equivalent token mints the
    // same capability the mailed link carries.
    let token = state
        .auth
        .codec
        .create("alice", time::Duration::minutes(30))
        .unwrap();
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/users/reset-password/confirm",
            None,
            Some(json!({ "token": token, "new_password": "pw456" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Old password out, new password in.
    let (status, _) = send(
        &app,
        form_request(
            "/api/v1/users/login",
            &[("username", "alice"), ("password", "pw123")],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    login(&app, "alice", "pw456").await;
}

// =============================================================================
// Games
// =============================================================================

#[tokio::test]
async fn game_writes_require_admin() {
    let state = test_state();
    let app = build_router(state.clone());
    register(&app, "alice", "alice@example.com", "pw123").await;
    let (user_access, _) = login(&app, "alice", "pw123").await;

    let payload = json!({
        "name": "catan",
        "weight": 2.3,
        "min_players": 3,
        "max_players": 4,
    });

    let (status, _) = send(
        &app,
        request("POST", "/api/v1/games/create", None, Some(payload.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/games/create",
            Some(&user_access),
            Some(payload.clone()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin_access = login_as_admin(&state, &app).await;
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/games/create",
            Some(&admin_access),
            Some(payload),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn game_validation_and_lookup() {
    let state = test_state();
    let app = build_router(state.clone());
    let admin = login_as_admin(&state, &app).await;

    // Weight outside [0, 5].
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/games/create",
            Some(&admin),
            Some(json!({ "name": "heavy", "weight": 5.5, "min_players": 2, "max_players": 4 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Empty player range.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/games/create",
            Some(&admin),
            Some(json!({ "name": "odd", "weight": 2.0, "min_players": 5, "max_players": 4 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    create_game(&app, &admin, "Catan", 3, 4).await;

    // Names are normalized to lowercase.
    let (status, body) = send(&app, request("GET", "/api/v1/games/list/catan", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "catan");

    // Duplicate (case-insensitive) is a conflict.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/games/create",
            Some(&admin),
            Some(json!({ "name": "CATAN", "weight": 2.0, "min_players": 3, "max_players": 4 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, request("GET", "/api/v1/games/list/azul", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn game_patch_checks_cross_field_range() {
    let state = test_state();
    let app = build_router(state.clone());
    let admin = login_as_admin(&state, &app).await;
    create_game(&app, &admin, "catan", 3, 4).await;

    // Raising min above the current max fails.
    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/api/v1/games/patch/catan",
            Some(&admin),
            Some(json!({ "min_players": 5 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Raising both together is fine.
    let (status, body) = send(
        &app,
        request(
            "PATCH",
            "/api/v1/games/patch/catan",
            Some(&admin),
            Some(json!({ "min_players": 5, "max_players": 6 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["min_players"], 5);

    // Empty patch is a validation failure.
    let (status, _) = send(
        &app,
        request(
            "PATCH",
            "/api/v1/games/patch/catan",
            Some(&admin),
            Some(json!({})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        request("DELETE", "/api/v1/games/delete/catan", Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(
        &app,
        request("DELETE", "/api/v1/games/delete/catan", Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Game logs
// =============================================================================

async fn log_fixture() -> (AppState, Router, String, i64) {
    let state = test_state();
    let app = build_router(state.clone());
    let admin = login_as_admin(&state, &app).await;
    create_game(&app, &admin, "catan", 3, 4).await;
    register(&app, "alice", "alice@example.com", "pw123").await;
    let (access, _) = login(&app, "alice", "pw123").await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/api/v1/game_logs/create",
            Some(&access),
            Some(json!({
                "game_name": "catan",
                "subject": "friday night",
                "duration_minutes": 90,
                "participant_count": 4,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let log_id = body["id"].as_i64().unwrap();

    (state, app, access, log_id)
}

#[tokio::test]
async fn game_log_creation_validates_participants_and_game() {
    let state = test_state();
    let app = build_router(state.clone());
    let admin = login_as_admin(&state, &app).await;
    create_game(&app, &admin, "catan", 3, 4).await;
    register(&app, "alice", "alice@example.com", "pw123").await;
    let (access, _) = login(&app, "alice", "pw123").await;

    // Out of the game's player range.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/game_logs/create",
            Some(&access),
            Some(json!({
                "game_name": "catan",
                "subject": "solo run",
                "duration_minutes": 30,
                "participant_count": 1,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Unknown game.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/game_logs/create",
            Some(&access),
            Some(json!({
                "game_name": "azul",
                "subject": "tiles",
                "duration_minutes": 30,
                "participant_count": 3,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Reserved name never reaches the catalog.
    let (status, _) = send(
        &app,
        request(
            "POST",
            "/api/v1/game_logs/create",
            Some(&access),
            Some(json!({
                "game_name": "all",
                "subject": "x",
                "duration_minutes": 30,
                "participant_count": 3,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn game_log_listings_filter_by_user_and_game() {
    let (_state, app, access, _log_id) = log_fixture().await;

    let (status, body) = send(&app, request("GET", "/api/v1/game_logs/list/all", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        request("GET", "/api/v1/game_logs/list/my", Some(&access), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["user_name"], "alice");

    let (status, body) = send(
        &app,
        request("GET", "/api/v1/game_logs/list/catan", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["game_name"], "catan");

    let (status, body) = send(
        &app,
        request(
            "GET",
            "/api/v1/game_logs/list/my/catan",
            Some(&access),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Listing for an unknown game 404s instead of returning empty.
    let (status, _) = send(&app, request("GET", "/api/v1/game_logs/list/azul", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Likes
// =============================================================================

#[tokio::test]
async fn like_toggle_flow_maintains_like_count() {
    let (state, app, access, log_id) = log_fixture().await;

    // First like.
    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/api/v1/game_log_like/create/{log_id}"),
            Some(&access),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = send(
        &app,
        request(
            "GET",
            &format!("/api/v1/game_log_like/is_liked/{log_id}"),
            Some(&access),
            None,
        ),
    )
    .await;
    assert_eq!(body["is_liked"], true);

    let (_, body) = send(&app, request("GET", "/api/v1/game_logs/list/all", None, None)).await;
    assert_eq!(body[0]["like_count"], 1);

    // A second create is redirected to the toggle endpoint.
    let (status, body) = send(
        &app,
        request(
            "POST",
            &format!("/api/v1/game_log_like/create/{log_id}"),
            Some(&access),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "PATCH");

    // Toggling off drops the count back to zero.
    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/v1/game_log_like/update/{log_id}"),
            Some(&access),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["active"], false);

    let (_, body) = send(&app, request("GET", "/api/v1/game_logs/list/all", None, None)).await;
    assert_eq!(body[0]["like_count"], 0);

    // Inactive rows can be purged by an admin.
    let admin = login_as_admin(&state, &app).await;
    let (status, _) = send(
        &app,
        request("DELETE", "/api/v1/game_log_like/delete", Some(&admin), None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // With the row purged, update redirects back to create.
    let (status, body) = send(
        &app,
        request(
            "PATCH",
            &format!("/api/v1/game_log_like/update/{log_id}"),
            Some(&access),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action"], "POST");
}

#[tokio::test]
async fn like_endpoints_check_log_existence_and_auth() {
    let (_state, app, access, log_id) = log_fixture().await;

    let (status, _) = send(
        &app,
        request("POST", "/api/v1/game_log_like/create/9999", Some(&access), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/api/v1/game_log_like/create/{log_id}"),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The public paged listing works without auth.
    let (status, body) = send(
        &app,
        request(
            "GET",
            &format!("/api/v1/game_log_like/list/{log_id}?skip=0&limit=10"),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}
