// tests/common/mod.rs
pub mod mock_storage;
pub mod test_data;

use std::collections::BTreeMap;
use std::sync::{Arc, Once};

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use sea_orm::{DatabaseConnection, Value};
use serde_json::json;
use tower::ServiceExt;

use review_backend::api::{create_app, AppState};
use review_backend::domain::user_model::UserClaims;
use review_backend::service::storage_service::StorageService;
use review_backend::utils::jwt::{JwtConfig, JwtManager};

use mock_storage::MockStorageService;

// テスト環境の初期化を一度だけ実行
static INIT: Once = Once::new();

pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("review_backend=debug,tower_http=debug")
            .with_test_writer()
            .try_init();
    });
}

pub struct TestApp {
    pub router: Router,
    pub jwt_manager: Arc<JwtManager>,
    pub storage: Arc<MockStorageService>,
}

/// MockDatabaseとモックストレージでアプリケーションを組み立てる
pub fn build_test_app(db: DatabaseConnection) -> TestApp {
    init_test_env();

    let jwt_config = JwtConfig {
        secret_key: "integration-test-secret-key-0123456789".to_string(),
        access_token_expiry_minutes: 60,
        issuer: "review-backend-test".to_string(),
    };
    let jwt_manager = Arc::new(JwtManager::new(jwt_config).unwrap());
    let storage = Arc::new(MockStorageService::new());

    let app_state = AppState::new(
        db,
        storage.clone() as Arc<dyn StorageService>,
        jwt_manager.clone(),
    );

    TestApp {
        router: create_app(app_state),
        jwt_manager,
        storage,
    }
}

/// テスト用の認証済みクレーム（test_dataのaliceに対応）
pub fn alice_claims() -> UserClaims {
    UserClaims {
        user_id: test_data::alice_id(),
        username: "alice".to_string(),
        role: "user".to_string(),
    }
}

pub fn bearer_token(app: &TestApp) -> String {
    app.jwt_manager.create_access_token(alice_claims()).unwrap()
}

/// COUNT(*) クエリのモック行
pub fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    let mut row = BTreeMap::new();
    row.insert("num_items", Value::from(n));
    row
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// multipartの `file` フィールド1つを持つアップロードリクエスト
pub fn multipart_request(
    uri: &str,
    token: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Request<Body> {
    let boundary = "test-boundary-1234567890";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn send(app: &TestApp, request: Request<Body>) -> Response<Body> {
    app.router.clone().oneshot(request).await.unwrap()
}

/// レスポンスをステータスとJSONに分解する
pub async fn response_json(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        json!(null)
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
