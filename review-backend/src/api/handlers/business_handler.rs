// src/api/handlers/business_handler.rs
use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    routing::{get, post},
    Json, Router,
};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, IntoActiveModel, Set};
use tracing::info;
use validator::Validate;

use crate::api::dto::business_dto::{
    BusinessDto, BusinessListDto, BusinessListQuery, CreateBusinessDto, UpdateBusinessDto,
};
use crate::api::dto::common::{parse_uuid_filter, MessageResponse};
use crate::api::handlers::{read_file_field, AppJson, UuidPath, MAX_UPLOAD_BYTES};
use crate::api::AppState;
use crate::domain::business_model;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::service::storage_service::build_object_key;
use crate::shared::query::ListParams;
use crate::utils::error_helper::{convert_validation_errors, not_found_error};

pub async fn create_business_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateBusinessDto>,
) -> AppResult<Json<BusinessDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "business_handler::create_business"))?;

    info!(
        user_id = %user.user_id(),
        name = %payload.name,
        "Creating business"
    );

    // オーナーは検証済みクレームから取る
    let model = business_model::ActiveModel {
        owner_id: Set(user.user_id()),
        name: Set(payload.name),
        description: Set(payload.description),
        category: Set(payload.category),
        address: Set(payload.address),
        phone: Set(payload.phone),
        ..business_model::ActiveModel::new()
    };

    let business = app_state.business_repo.create(model).await?;
    Ok(Json(BusinessDto::from(business)))
}

pub async fn get_business_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<BusinessDto>> {
    let business = app_state.business_repo.find_by_id(id).await?.ok_or_else(|| {
        not_found_error("Business", &id.to_string(), "business_handler::get_business")
    })?;

    Ok(Json(BusinessDto::from(business)))
}

pub async fn list_businesses_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<BusinessListQuery>,
) -> AppResult<Json<BusinessListDto>> {
    let owner_id = parse_uuid_filter(query.owner_id.as_deref())?;

    let mut params = ListParams::new(query.page, query.limit).order_by_desc("created_at");
    if let Some(owner_id) = owner_id {
        params = params.filter_eq("owner_id", owner_id);
    }
    if let Some(category) = query.category {
        params = params.filter_eq("category", category);
    }

    let (businesses, count) = app_state.business_repo.find_with_params(&params).await?;

    Ok(Json(BusinessListDto {
        businesses: businesses.into_iter().map(BusinessDto::from).collect(),
        count,
    }))
}

pub async fn update_business_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateBusinessDto>,
) -> AppResult<Json<BusinessDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "business_handler::update_business"))?;

    let model = business_model::ActiveModel {
        id: Set(payload.id),
        owner_id: Set(payload.owner_id),
        name: Set(payload.name),
        description: Set(payload.description),
        category: Set(payload.category),
        address: Set(payload.address),
        phone: Set(payload.phone),
        photos: Set(payload.photos),
        ..ActiveModelTrait::default()
    };

    let business = app_state.business_repo.update(model).await?;
    Ok(Json(BusinessDto::from(business)))
}

pub async fn delete_business_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<MessageResponse>> {
    let deleted = app_state.business_repo.delete_by_id(id).await?;
    if deleted == 0 {
        return Err(not_found_error(
            "Business",
            &id.to_string(),
            "business_handler::delete_business",
        ));
    }

    Ok(Json(MessageResponse::new("Business deleted successfully")))
}

/// 店舗画像をアップロードし、photos を公開URLで上書きする。
pub async fn set_business_image_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    mut multipart: Multipart,
) -> AppResult<Json<BusinessDto>> {
    let file = read_file_field(&mut multipart).await?;

    info!(
        user_id = %user.user_id(),
        business_id = %id,
        filename = %file.filename,
        "Uploading business image"
    );

    let business = app_state.business_repo.find_by_id(id).await?.ok_or_else(|| {
        not_found_error(
            "Business",
            &id.to_string(),
            "business_handler::set_business_image",
        )
    })?;

    let key = build_object_key(&file.filename);
    let url = app_state
        .storage
        .upload(&key, file.data, &file.content_type)
        .await?;

    let mut model = business.into_active_model();
    model.photos = Set(Some(url));

    let updated = app_state.business_repo.update(model).await?;
    Ok(Json(BusinessDto::from(updated)))
}

// --- Router Setup ---

pub fn business_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/business",
            post(create_business_handler).put(update_business_handler),
        )
        .route("/business/list", get(list_businesses_handler))
        .route(
            "/business/{id}",
            get(get_business_handler).delete(delete_business_handler),
        )
        .route(
            "/business/{id}/image",
            post(set_business_image_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(app_state)
}
