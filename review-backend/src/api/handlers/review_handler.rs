// src/api/handlers/review_handler.rs
use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    routing::{get, post},
    Json, Router,
};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, IntoActiveModel, Set};
use tracing::info;
use validator::Validate;

use crate::api::dto::common::{parse_uuid_filter, MessageResponse};
use crate::api::dto::review_dto::{
    CreateReviewDto, ReviewDto, ReviewListDto, ReviewListQuery, UpdateReviewDto,
};
use crate::api::handlers::{read_file_field, AppJson, UuidPath, MAX_UPLOAD_BYTES};
use crate::api::AppState;
use crate::domain::review_model;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::service::storage_service::build_object_key;
use crate::shared::query::ListParams;
use crate::utils::error_helper::{convert_validation_errors, not_found_error};

pub async fn create_review_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateReviewDto>,
) -> AppResult<Json<ReviewDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "review_handler::create_review"))?;

    info!(
        user_id = %user.user_id(),
        business_id = %payload.business_id,
        rating = %payload.rating,
        "Creating review"
    );

    // レビューの投稿者は検証済みクレームから取る。ボディでは受け付けない。
    let model = review_model::ActiveModel {
        business_id: Set(payload.business_id),
        user_id: Set(user.user_id()),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        ..review_model::ActiveModel::new()
    };

    let review = app_state.review_repo.create(model).await?;
    Ok(Json(ReviewDto::from(review)))
}

pub async fn get_review_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<ReviewDto>> {
    let review = app_state
        .review_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("Review", &id.to_string(), "review_handler::get_review"))?;

    Ok(Json(ReviewDto::from(review)))
}

pub async fn list_reviews_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ReviewListQuery>,
) -> AppResult<Json<ReviewListDto>> {
    // business_id が非UUIDなら404の固定レスポンス
    let business_id = parse_uuid_filter(query.business_id.as_deref())?;

    let mut params = ListParams::new(query.page, query.limit).order_by_desc("created_at");
    if let Some(business_id) = business_id {
        params = params.filter_eq("business_id", business_id);
    }

    let (reviews, count) = app_state.review_repo.find_with_params(&params).await?;

    Ok(Json(ReviewListDto {
        reviews: reviews.into_iter().map(ReviewDto::from).collect(),
        count,
    }))
}

pub async fn update_review_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateReviewDto>,
) -> AppResult<Json<ReviewDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "review_handler::update_review"))?;

    // 全項目置き換え。対象行が無ければ RecordNotUpdated → 404
    let model = review_model::ActiveModel {
        id: Set(payload.id),
        business_id: Set(payload.business_id),
        user_id: Set(payload.user_id),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        photos: Set(payload.photos),
        ..ActiveModelTrait::default()
    };

    let review = app_state.review_repo.update(model).await?;
    Ok(Json(ReviewDto::from(review)))
}

pub async fn delete_review_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<MessageResponse>> {
    let deleted = app_state.review_repo.delete_by_id(id).await?;
    if deleted == 0 {
        return Err(not_found_error(
            "Review",
            &id.to_string(),
            "review_handler::delete_review",
        ));
    }

    Ok(Json(MessageResponse::new("Review deleted successfully")))
}

/// multipartの `file` フィールドをストレージにアップロードし、
/// レビューの photos を公開URLで上書きする。
pub async fn set_review_image_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    mut multipart: Multipart,
) -> AppResult<Json<ReviewDto>> {
    let file = read_file_field(&mut multipart).await?;

    info!(
        user_id = %user.user_id(),
        review_id = %id,
        filename = %file.filename,
        size = file.data.len(),
        "Uploading review image"
    );

    let review = app_state.review_repo.find_by_id(id).await?.ok_or_else(|| {
        not_found_error("Review", &id.to_string(), "review_handler::set_review_image")
    })?;

    let key = build_object_key(&file.filename);
    let url = app_state
        .storage
        .upload(&key, file.data, &file.content_type)
        .await?;

    // 画像URL以外は取得済みの値をそのまま持ち越す
    let mut model = review.into_active_model();
    model.photos = Set(Some(url));

    let updated = app_state.review_repo.update(model).await?;
    Ok(Json(ReviewDto::from(updated)))
}

// --- Router Setup ---

pub fn review_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/review",
            post(create_review_handler).put(update_review_handler),
        )
        .route("/review/list", get(list_reviews_handler))
        .route(
            "/review/{id}",
            get(get_review_handler).delete(delete_review_handler),
        )
        .route(
            "/review/{id}/image",
            post(set_review_image_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(app_state)
}
