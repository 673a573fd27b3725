// src/api/handlers/event_participant_handler.rs
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, Set};
use tracing::info;
use validator::Validate;

use crate::api::dto::common::{parse_uuid_filter, MessageResponse};
use crate::api::dto::event_participant_dto::{
    CreateEventParticipantDto, EventParticipantDto, EventParticipantListDto,
    EventParticipantListQuery, UpdateEventParticipantDto, PARTICIPATION_STATUSES,
};
use crate::api::handlers::{AppJson, UuidPath};
use crate::api::AppState;
use crate::domain::event_participant_model;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::shared::query::ListParams;
use crate::utils::error_helper::{convert_validation_errors, not_found_error};

fn validate_status(status: &str) -> AppResult<()> {
    if !PARTICIPATION_STATUSES.contains(&status) {
        return Err(AppError::ValidationError(
            "Status must be 'going', 'interested', or 'declined'".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_event_participant_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateEventParticipantDto>,
) -> AppResult<Json<EventParticipantDto>> {
    payload.validate().map_err(|e| {
        convert_validation_errors(e, "event_participant_handler::create_event_participant")
    })?;
    validate_status(&payload.status)?;

    info!(
        user_id = %user.user_id(),
        event_id = %payload.event_id,
        status = %payload.status,
        "Creating event participation"
    );

    // 参加者は検証済みクレームから取る
    let model = event_participant_model::ActiveModel {
        event_id: Set(payload.event_id),
        user_id: Set(user.user_id()),
        status: Set(payload.status),
        ..event_participant_model::ActiveModel::new()
    };

    let participant = app_state.event_participant_repo.create(model).await?;
    Ok(Json(EventParticipantDto::from(participant)))
}

pub async fn get_event_participant_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<EventParticipantDto>> {
    let participant = app_state
        .event_participant_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| {
            not_found_error(
                "EventParticipant",
                &id.to_string(),
                "event_participant_handler::get_event_participant",
            )
        })?;

    Ok(Json(EventParticipantDto::from(participant)))
}

pub async fn list_event_participants_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<EventParticipantListQuery>,
) -> AppResult<Json<EventParticipantListDto>> {
    let event_id = parse_uuid_filter(query.event_id.as_deref())?;
    let user_id = parse_uuid_filter(query.user_id.as_deref())?;

    let mut params = ListParams::new(query.page, query.limit).order_by_desc("created_at");
    if let Some(event_id) = event_id {
        params = params.filter_eq("event_id", event_id);
    }
    if let Some(user_id) = user_id {
        params = params.filter_eq("user_id", user_id);
    }

    let (participants, count) = app_state
        .event_participant_repo
        .find_with_params(&params)
        .await?;

    Ok(Json(EventParticipantListDto {
        event_participants: participants
            .into_iter()
            .map(EventParticipantDto::from)
            .collect(),
        count,
    }))
}

pub async fn update_event_participant_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateEventParticipantDto>,
) -> AppResult<Json<EventParticipantDto>> {
    payload.validate().map_err(|e| {
        convert_validation_errors(e, "event_participant_handler::update_event_participant")
    })?;
    validate_status(&payload.status)?;

    let model = event_participant_model::ActiveModel {
        id: Set(payload.id),
        event_id: Set(payload.event_id),
        user_id: Set(payload.user_id),
        status: Set(payload.status),
        ..ActiveModelTrait::default()
    };

    let participant = app_state.event_participant_repo.update(model).await?;
    Ok(Json(EventParticipantDto::from(participant)))
}

pub async fn delete_event_participant_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<MessageResponse>> {
    let deleted = app_state.event_participant_repo.delete_by_id(id).await?;
    if deleted == 0 {
        return Err(not_found_error(
            "EventParticipant",
            &id.to_string(),
            "event_participant_handler::delete_event_participant",
        ));
    }

    Ok(Json(MessageResponse::new(
        "Event participant deleted successfully",
    )))
}

// --- Router Setup ---

pub fn event_participant_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/event-participant",
            post(create_event_participant_handler).put(update_event_participant_handler),
        )
        .route(
            "/event-participant/list",
            get(list_event_participants_handler),
        )
        .route(
            "/event-participant/{id}",
            get(get_event_participant_handler).delete(delete_event_participant_handler),
        )
        .with_state(app_state)
}
