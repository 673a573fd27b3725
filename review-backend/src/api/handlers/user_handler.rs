// src/api/handlers/user_handler.rs
use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    routing::{get, post},
    Json, Router,
};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, IntoActiveModel, Set};
use tracing::info;
use validator::Validate;

use crate::api::dto::common::MessageResponse;
use crate::api::dto::user_dto::{
    CreateUserDto, UpdateUserDto, UserDto, UserListDto, UserListQuery,
};
use crate::api::handlers::{read_file_field, AppJson, UuidPath, MAX_UPLOAD_BYTES};
use crate::api::AppState;
use crate::domain::user_model;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::service::storage_service::build_object_key;
use crate::shared::query::ListParams;
use crate::utils::error_helper::{conflict_error, convert_validation_errors, not_found_error};
use crate::utils::password::hash_password;

/// ロールの許可値
pub const USER_ROLES: &[&str] = &["user", "admin"];

fn validate_role(role: &str) -> AppResult<()> {
    if !USER_ROLES.contains(&role) {
        return Err(AppError::ValidationError(
            "Role must be 'user' or 'admin'".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_user_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateUserDto>,
) -> AppResult<Json<UserDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "user_handler::create_user"))?;

    let role = payload.role.unwrap_or_else(|| "user".to_string());
    validate_role(&role)?;

    // 一意制約違反はDBまで行かずに409で返す
    if app_state
        .user_repo
        .find_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(conflict_error(
            "Username already taken",
            "user_handler::create_user",
        ));
    }
    if app_state
        .user_repo
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(conflict_error(
            "Email already registered",
            "user_handler::create_user",
        ));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        crate::utils::error_helper::internal_server_error(
            e,
            "user_handler::create_user",
            "Failed to process password",
        )
    })?;

    info!(username = %payload.username, "Creating user");

    let model = user_model::ActiveModel {
        username: Set(payload.username),
        email: Set(payload.email),
        password_hash: Set(password_hash),
        full_name: Set(payload.full_name),
        role: Set(role),
        is_active: Set(true),
        ..user_model::ActiveModel::new()
    };

    let user = app_state.user_repo.create(model).await?;
    Ok(Json(UserDto::from(user)))
}

pub async fn get_user_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<UserDto>> {
    let user = app_state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("User", &id.to_string(), "user_handler::get_user"))?;

    Ok(Json(UserDto::from(user)))
}

pub async fn list_users_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<UserListQuery>,
) -> AppResult<Json<UserListDto>> {
    let mut params = ListParams::new(query.page, query.limit).order_by_desc("created_at");
    if let Some(role) = query.role {
        params = params.filter_eq("role", role);
    }

    let (users, count) = app_state.user_repo.find_with_params(&params).await?;

    Ok(Json(UserListDto {
        users: users.into_iter().map(UserDto::from).collect(),
        count,
    }))
}

pub async fn update_user_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateUserDto>,
) -> AppResult<Json<UserDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "user_handler::update_user"))?;

    validate_role(&payload.role)?;

    // パスワードハッシュは持ち越し（このエンドポイントでは変更しない）
    let model = user_model::ActiveModel {
        id: Set(payload.id),
        username: Set(payload.username),
        email: Set(payload.email),
        full_name: Set(payload.full_name),
        role: Set(payload.role),
        avatar: Set(payload.avatar),
        is_active: Set(payload.is_active),
        ..ActiveModelTrait::default()
    };

    let user = app_state.user_repo.update(model).await?;
    Ok(Json(UserDto::from(user)))
}

pub async fn delete_user_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<MessageResponse>> {
    let deleted = app_state.user_repo.delete_by_id(id).await?;
    if deleted == 0 {
        return Err(not_found_error(
            "User",
            &id.to_string(),
            "user_handler::delete_user",
        ));
    }

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// アバター画像をアップロードし、avatar を公開URLで上書きする。
pub async fn set_user_image_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
    mut multipart: Multipart,
) -> AppResult<Json<UserDto>> {
    let file = read_file_field(&mut multipart).await?;

    info!(
        user_id = %user.user_id(),
        target_user_id = %id,
        filename = %file.filename,
        "Uploading user avatar"
    );

    let target = app_state
        .user_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("User", &id.to_string(), "user_handler::set_user_image"))?;

    let key = build_object_key(&file.filename);
    let url = app_state
        .storage
        .upload(&key, file.data, &file.content_type)
        .await?;

    let mut model = target.into_active_model();
    model.avatar = Set(Some(url));

    let updated = app_state.user_repo.update(model).await?;
    Ok(Json(UserDto::from(updated)))
}

// --- Router Setup ---

pub fn user_router(app_state: AppState) -> Router {
    Router::new()
        .route("/user", post(create_user_handler).put(update_user_handler))
        .route("/user/list", get(list_users_handler))
        .route(
            "/user/{id}",
            get(get_user_handler).delete(delete_user_handler),
        )
        .route(
            "/user/{id}/image",
            post(set_user_image_handler).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(app_state)
}
