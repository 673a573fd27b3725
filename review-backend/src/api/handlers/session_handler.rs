// src/api/handlers/session_handler.rs
//
// セッションはログインで作られログアウトで消える。ここでは参照と
// 明示的な失効（削除）だけを公開する。

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::api::dto::common::{parse_uuid_filter, MessageResponse};
use crate::api::dto::session_dto::{SessionDto, SessionListDto, SessionListQuery};
use crate::api::handlers::UuidPath;
use crate::api::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::shared::query::ListParams;
use crate::utils::error_helper::not_found_error;

pub async fn get_session_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<SessionDto>> {
    let session = app_state
        .session_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| {
            not_found_error("Session", &id.to_string(), "session_handler::get_session")
        })?;

    Ok(Json(SessionDto::from(session)))
}

pub async fn list_sessions_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<SessionListQuery>,
) -> AppResult<Json<SessionListDto>> {
    let user_id = parse_uuid_filter(query.user_id.as_deref())?;

    let mut params = ListParams::new(query.page, query.limit).order_by_desc("created_at");
    if let Some(user_id) = user_id {
        params = params.filter_eq("user_id", user_id);
    }

    let (sessions, count) = app_state.session_repo.find_with_params(&params).await?;

    Ok(Json(SessionListDto {
        sessions: sessions.into_iter().map(SessionDto::from).collect(),
        count,
    }))
}

pub async fn delete_session_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<MessageResponse>> {
    info!(user_id = %user.user_id(), session_id = %id, "Revoking session");

    let deleted = app_state.session_repo.delete_by_id(id).await?;
    if deleted == 0 {
        return Err(not_found_error(
            "Session",
            &id.to_string(),
            "session_handler::delete_session",
        ));
    }

    Ok(Json(MessageResponse::new("Session deleted successfully")))
}

// --- Router Setup ---

pub fn session_router(app_state: AppState) -> Router {
    Router::new()
        .route("/session/list", get(list_sessions_handler))
        .route(
            "/session/{id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .with_state(app_state)
}
