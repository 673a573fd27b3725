// src/api/handlers/notification_handler.rs
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, Set};
use tracing::info;
use validator::Validate;

use crate::api::dto::common::{parse_uuid_filter, MessageResponse};
use crate::api::dto::notification_dto::{
    CreateNotificationDto, NotificationDto, NotificationListDto, NotificationListQuery,
    UpdateNotificationDto,
};
use crate::api::handlers::{AppJson, UuidPath};
use crate::api::AppState;
use crate::domain::notification_model;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::shared::query::ListParams;
use crate::utils::error_helper::{convert_validation_errors, not_found_error};

pub async fn create_notification_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateNotificationDto>,
) -> AppResult<Json<NotificationDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "notification_handler::create_notification"))?;

    info!(
        user_id = %user.user_id(),
        recipient_id = %payload.user_id,
        title = %payload.title,
        "Creating notification"
    );

    // 通知は未読で作成される
    let model = notification_model::ActiveModel {
        user_id: Set(payload.user_id),
        title: Set(payload.title),
        message: Set(payload.message),
        is_read: Set(false),
        ..notification_model::ActiveModel::new()
    };

    let notification = app_state.notification_repo.create(model).await?;
    Ok(Json(NotificationDto::from(notification)))
}

pub async fn get_notification_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<NotificationDto>> {
    let notification = app_state
        .notification_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| {
            not_found_error(
                "Notification",
                &id.to_string(),
                "notification_handler::get_notification",
            )
        })?;

    Ok(Json(NotificationDto::from(notification)))
}

pub async fn list_notifications_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<NotificationListQuery>,
) -> AppResult<Json<NotificationListDto>> {
    let user_id = parse_uuid_filter(query.user_id.as_deref())?;

    let mut params = ListParams::new(query.page, query.limit).order_by_desc("created_at");
    if let Some(user_id) = user_id {
        params = params.filter_eq("user_id", user_id);
    }
    if let Some(is_read) = query.is_read {
        params = params.filter_eq("is_read", is_read);
    }

    let (notifications, count) = app_state
        .notification_repo
        .find_with_params(&params)
        .await?;

    Ok(Json(NotificationListDto {
        notifications: notifications.into_iter().map(NotificationDto::from).collect(),
        count,
    }))
}

pub async fn update_notification_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateNotificationDto>,
) -> AppResult<Json<NotificationDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "notification_handler::update_notification"))?;

    let model = notification_model::ActiveModel {
        id: Set(payload.id),
        user_id: Set(payload.user_id),
        title: Set(payload.title),
        message: Set(payload.message),
        is_read: Set(payload.is_read),
        ..ActiveModelTrait::default()
    };

    let notification = app_state.notification_repo.update(model).await?;
    Ok(Json(NotificationDto::from(notification)))
}

pub async fn delete_notification_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<MessageResponse>> {
    let deleted = app_state.notification_repo.delete_by_id(id).await?;
    if deleted == 0 {
        return Err(not_found_error(
            "Notification",
            &id.to_string(),
            "notification_handler::delete_notification",
        ));
    }

    Ok(Json(MessageResponse::new(
        "Notification deleted successfully",
    )))
}

// --- Router Setup ---

pub fn notification_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/notification",
            post(create_notification_handler).put(update_notification_handler),
        )
        .route("/notification/list", get(list_notifications_handler))
        .route(
            "/notification/{id}",
            get(get_notification_handler).delete(delete_notification_handler),
        )
        .with_state(app_state)
}
