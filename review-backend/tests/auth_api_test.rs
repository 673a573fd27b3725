// tests/auth_api_test.rs
//
// 登録・ログイン・ログアウトの結合テスト。

mod common;

use axum::http::StatusCode;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::json;

use review_backend::domain::user_model;
use review_backend::utils::password::hash_password;

use common::test_data;

#[tokio::test]
async fn test_register_creates_user_without_leaking_password_hash() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // username重複チェック → なし
        .append_query_results([Vec::<user_model::Model>::new()])
        // email重複チェック → なし
        .append_query_results([Vec::<user_model::Model>::new()])
        // INSERT ... RETURNING
        .append_query_results([vec![test_data::alice("$argon2id$stored")]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = common::build_test_app(db);

    let body = json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "Password123!",
        "full_name": "Alice Example"
    });
    let response = common::send(
        &app,
        common::json_request("POST", "/auth/register", None, Some(body)),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "user");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_data::alice("$argon2id$stored")]])
        .into_connection();
    let app = common::build_test_app(db);

    let body = json!({
        "username": "alice",
        "email": "new@example.com",
        "password": "Password123!",
        "full_name": "Alice Example"
    });
    let response = common::send(
        &app,
        common::json_request("POST", "/auth/register", None, Some(body)),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_with_short_password_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = common::build_test_app(db);

    let body = json!({
        "username": "alice",
        "email": "alice@example.com",
        "password": "short",
        "full_name": "Alice Example"
    });
    let response = common::send(
        &app,
        common::json_request("POST", "/auth/register", None, Some(body)),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_returns_verifiable_token() {
    let password_hash = hash_password("Password123!").unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_data::alice(&password_hash)]])
        // セッションの INSERT ... RETURNING
        .append_query_results([vec![test_data::session("stored-hash")]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = common::build_test_app(db);

    let body = json!({
        "email": "alice@example.com",
        "password": "Password123!"
    });
    let response = common::send(
        &app,
        common::json_request("POST", "/auth/login", None, Some(body)),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "alice@example.com");

    // 発行されたトークンは検証可能で、クレームはaliceを指す
    let token = body["access_token"].as_str().unwrap();
    let claims = app.jwt_manager.verify_access_token(token).unwrap();
    assert_eq!(claims.user.user_id, test_data::alice_id());
    assert_eq!(claims.user.username, "alice");
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let password_hash = hash_password("Password123!").unwrap();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![test_data::alice(&password_hash)]])
        .into_connection();
    let app = common::build_test_app(db);

    let body = json!({
        "email": "alice@example.com",
        "password": "WrongPassword"
    });
    let response = common::send(
        &app,
        common::json_request("POST", "/auth/login", None, Some(body)),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_with_unknown_email_is_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<user_model::Model>::new()])
        .into_connection();
    let app = common::build_test_app(db);

    let body = json!({
        "email": "nobody@example.com",
        "password": "Password123!"
    });
    let response = common::send(
        &app,
        common::json_request("POST", "/auth/login", None, Some(body)),
    )
    .await;

    let (status, _) = common::response_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_inactive_account_is_unauthorized() {
    let password_hash = hash_password("Password123!").unwrap();
    let mut inactive = test_data::alice(&password_hash);
    inactive.is_active = false;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![inactive]])
        .into_connection();
    let app = common::build_test_app(db);

    let body = json!({
        "email": "alice@example.com",
        "password": "Password123!"
    });
    let response = common::send(
        &app,
        common::json_request("POST", "/auth/login", None, Some(body)),
    )
    .await;

    let (status, _) = common::response_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_deletes_calling_session() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let response = common::send(
        &app,
        common::json_request("POST", "/auth/logout", Some(&token), None),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_logout_without_token_is_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = common::build_test_app(db);

    let response =
        common::send(&app, common::json_request("POST", "/auth/logout", None, None)).await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_protected_route_with_tampered_token_is_unauthorized() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = common::build_test_app(db);
    let mut token = common::bearer_token(&app);
    token.push('x');

    let response = common::send(
        &app,
        common::json_request("GET", "/user/list", Some(&token), None),
    )
    .await;

    let (status, _) = common::response_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
