// tests/review_api_test.rs
//
// レビューAPIの結合テスト。MockDatabaseにクエリ結果を積み、
// ルーター全体（認証ミドルウェア込み)をoneshotで叩く。

mod common;

use axum::http::StatusCode;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::json;
use uuid::Uuid;

use review_backend::domain::review_model;

use common::test_data;

#[tokio::test]
async fn test_list_reviews_with_malformed_business_id_returns_quirk_404() {
    // DBには一切到達しない
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let response = common::send(
        &app,
        common::json_request(
            "GET",
            "/review/list?business_id=not-a-uuid",
            Some(&token),
            None,
        ),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["Error:"], "Wrong format type please write UUID");
}

#[tokio::test]
async fn test_list_reviews_empty_business_id_lists_all() {
    let reviews = vec![
        test_data::review(test_data::review_id(), 5),
        test_data::review(Uuid::new_v4(), 3),
    ];
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![common::count_row(2)]])
        .append_query_results([reviews])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let response = common::send(
        &app,
        common::json_request("GET", "/review/list?business_id=", Some(&token), None),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["reviews"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_reviews_filters_by_business_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![common::count_row(1)]])
        .append_query_results([vec![test_data::review(test_data::review_id(), 4)]])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let uri = format!("/review/list?business_id={}", test_data::business_id());
    let response = common::send(&app, common::json_request("GET", &uri, Some(&token), None)).await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(
        body["reviews"][0]["business_id"],
        test_data::business_id().to_string()
    );
}

#[tokio::test]
async fn test_list_reviews_out_of_range_page_returns_empty_page_with_total() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![common::count_row(2)]])
        .append_query_results([Vec::<review_model::Model>::new()])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let response = common::send(
        &app,
        common::json_request("GET", "/review/list?page=99&limit=10", Some(&token), None),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert!(body["reviews"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_list_reviews_non_numeric_page_falls_back_to_defaults() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![common::count_row(1)]])
        .append_query_results([vec![test_data::review(test_data::review_id(), 5)]])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let response = common::send(
        &app,
        common::json_request("GET", "/review/list?page=abc&limit=xyz", Some(&token), None),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_create_review_returns_created_entity() {
    let created = test_data::review(test_data::review_id(), 5);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![created]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let body = json!({
        "business_id": test_data::business_id(),
        "rating": 5,
        "comment": "Great coffee"
    });
    let response = common::send(
        &app,
        common::json_request("POST", "/review", Some(&token), Some(body)),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], test_data::review_id().to_string());
    // 投稿者は認証済みクレームのユーザー
    assert_eq!(body["user_id"], test_data::alice_id().to_string());
}

#[tokio::test]
async fn test_create_review_with_invalid_rating_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let body = json!({
        "business_id": test_data::business_id(),
        "rating": 9,
        "comment": "way too enthusiastic"
    });
    let response = common::send(
        &app,
        common::json_request("POST", "/review", Some(&token), Some(body)),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_review_with_malformed_body_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    // rating欠落はデシリアライズ失敗 → 400
    let body = json!({ "business_id": test_data::business_id() });
    let response = common::send(
        &app,
        common::json_request("POST", "/review", Some(&token), Some(body)),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_get_review_missing_returns_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<review_model::Model>::new()])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let uri = format!("/review/{}", Uuid::new_v4());
    let response = common::send(&app, common::json_request("GET", &uri, Some(&token), None)).await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_review_with_invalid_uuid_path_returns_400() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let response = common::send(
        &app,
        common::json_request("GET", "/review/not-a-uuid", Some(&token), None),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_review_missing_returns_404() {
    // UPDATE ... RETURNING が0行 → RecordNotUpdated → 404
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<review_model::Model>::new()])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let body = json!({
        "id": Uuid::new_v4(),
        "business_id": test_data::business_id(),
        "user_id": test_data::alice_id(),
        "rating": 2,
        "comment": "edited",
        "photos": null
    });
    let response = common::send(
        &app,
        common::json_request("PUT", "/review", Some(&token), Some(body)),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_review_replaces_record() {
    let mut updated = test_data::review(test_data::review_id(), 2);
    updated.comment = Some("edited".to_string());
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![updated]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let body = json!({
        "id": test_data::review_id(),
        "business_id": test_data::business_id(),
        "user_id": test_data::alice_id(),
        "rating": 2,
        "comment": "edited",
        "photos": null
    });
    let response = common::send(
        &app,
        common::json_request("PUT", "/review", Some(&token), Some(body)),
    )
    .await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 2);
    assert_eq!(body["comment"], "edited");
}

#[tokio::test]
async fn test_delete_review_returns_message() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let uri = format!("/review/{}", test_data::review_id());
    let response =
        common::send(&app, common::json_request("DELETE", &uri, Some(&token), None)).await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Review deleted successfully");
}

#[tokio::test]
async fn test_delete_review_missing_returns_404() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let uri = format!("/review/{}", Uuid::new_v4());
    let response =
        common::send(&app, common::json_request("DELETE", &uri, Some(&token), None)).await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_review_routes_require_bearer_token() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = common::build_test_app(db);

    let response = common::send(&app, common::json_request("GET", "/review/list", None, None)).await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_set_review_image_uploads_and_overwrites_photos() {
    let existing = test_data::review(test_data::review_id(), 5);
    let mut updated = existing.clone();
    updated.photos = Some(
        "http://mock-storage.local/test-bucket/abc-storefront.png".to_string(),
    );

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![existing]])
        .append_query_results([vec![updated]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let uri = format!("/review/{}/image", test_data::review_id());
    let request =
        common::multipart_request(&uri, &token, "storefront.png", "image/png", b"png-bytes");
    let response = common::send(&app, request).await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::OK);
    // URLには元のファイル名が残る
    assert!(body["photos"].as_str().unwrap().contains("storefront.png"));

    // ストレージにはUUIDプレフィックス付きキーで1件だけ置かれている
    let keys = app.storage.keys();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].ends_with("-storefront.png"));
    assert_eq!(app.storage.object(&keys[0]).unwrap(), b"png-bytes".to_vec());
}

#[tokio::test]
async fn test_set_review_image_without_file_field_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = common::build_test_app(db);
    let token = common::bearer_token(&app);

    let boundary = "test-boundary-1234567890";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{b}--\r\n",
        b = boundary
    );
    let request = axum::http::Request::builder()
        .method("POST")
        .uri(format!("/review/{}/image", test_data::review_id()))
        .header(
            axum::http::header::AUTHORIZATION,
            format!("Bearer {}", token),
        )
        .header(
            axum::http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(axum::body::Body::from(body))
        .unwrap();
    let response = common::send(&app, request).await;

    let (status, body) = common::response_json(response).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(body["message"], "No file provided");
}
