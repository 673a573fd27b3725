// src/api/handlers/auth_handler.rs
use axum::{
    extract::State,
    http::{header, HeaderMap},
    routing::post,
    Json, Router,
};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelBehavior, Set};
use tracing::{info, warn};
use validator::Validate;

use crate::api::dto::auth_dto::{LoginDto, LoginResponseDto, RegisterDto};
use crate::api::dto::common::MessageResponse;
use crate::api::dto::user_dto::UserDto;
use crate::api::handlers::AppJson;
use crate::api::AppState;
use crate::domain::session_model;
use crate::domain::user_model::{self, UserClaims};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::utils::error_helper::{
    conflict_error, convert_validation_errors, internal_server_error,
};
use crate::utils::password::{hash_password, verify_password};
use crate::utils::token::hash_token;

/// 新規ユーザー登録。認証不要の唯一の書き込みエンドポイント。
pub async fn register_handler(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<RegisterDto>,
) -> AppResult<Json<UserDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "auth_handler::register"))?;

    if app_state
        .user_repo
        .find_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(conflict_error(
            "Username already taken",
            "auth_handler::register",
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
            "auth_handler::register",
        ));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        internal_server_error(e, "auth_handler::register", "Failed to process password")
    })?;

    info!(username = %payload.username, "Registering user");

    let model = user_model::ActiveModel {
        username: Set(payload.username),
        email: Set(payload.email),
        password_hash: Set(password_hash),
        full_name: Set(payload.full_name),
        role: Set("user".to_string()),
        is_active: Set(true),
        ..user_model::ActiveModel::new()
    };

    let user = app_state.user_repo.create(model).await?;
    Ok(Json(UserDto::from(user)))
}

/// メールアドレスとパスワードでログインし、アクセストークンと
/// セッション行を発行する。
pub async fn login_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    AppJson(payload): AppJson<LoginDto>,
) -> AppResult<Json<LoginResponseDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "auth_handler::login"))?;

    // 存在しないメールと誤パスワードは同じ応答にする
    let user = app_state
        .user_repo
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %payload.email, "Login attempt for unknown email");
            AppError::Unauthorized("Invalid email or password".to_string())
        })?;

    if !user.is_active {
        warn!(user_id = %user.id, "Login attempt for inactive account");
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let password_ok = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| internal_server_error(e, "auth_handler::login", "Failed to verify password"))?;

    if !password_ok {
        warn!(user_id = %user.id, "Login attempt with wrong password");
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let claims = UserClaims::from(&user);
    let access_token = app_state
        .jwt_manager
        .create_access_token(claims)
        .map_err(|e| {
            internal_server_error(e, "auth_handler::login", "Failed to issue access token")
        })?;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string());

    let expires_at =
        Utc::now() + Duration::minutes(app_state.jwt_manager.access_token_expiry_minutes());

    // トークン本体は保存せず、SHA-256ハッシュをセッションに残す
    let session = session_model::ActiveModel {
        user_id: Set(user.id),
        token_hash: Set(hash_token(&access_token)),
        user_agent: Set(user_agent),
        ip_address: Set(ip_address),
        expires_at: Set(expires_at),
        ..session_model::ActiveModel::new()
    };

    app_state.session_repo.create(session).await?;

    info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(Json(LoginResponseDto {
        access_token,
        user: UserDto::from(user),
    }))
}

/// 呼び出し元のセッションを削除する。
pub async fn logout_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> AppResult<Json<MessageResponse>> {
    let deleted = app_state
        .session_repo
        .delete_by_token_hash(&hash_token(&user.access_token))
        .await?;

    info!(
        user_id = %user.user_id(),
        deleted_sessions = deleted,
        "User logged out"
    );

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

// --- Router Setup ---

/// 認証不要のルート
pub fn auth_public_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .with_state(app_state)
}

/// Bearerトークン必須のルート（認証ミドルウェアの内側にマウントする）
pub fn auth_session_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/logout", post(logout_handler))
        .with_state(app_state)
}
