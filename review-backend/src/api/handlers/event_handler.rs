// src/api/handlers/event_handler.rs
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, Set};
use tracing::info;
use validator::Validate;

use crate::api::dto::common::{parse_uuid_filter, MessageResponse};
use crate::api::dto::event_dto::{
    CreateEventDto, EventDto, EventListDto, EventListQuery, UpdateEventDto,
};
use crate::api::handlers::{AppJson, UuidPath};
use crate::api::AppState;
use crate::domain::event_model;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::shared::query::ListParams;
use crate::utils::error_helper::{convert_validation_errors, not_found_error};

pub async fn create_event_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateEventDto>,
) -> AppResult<Json<EventDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "event_handler::create_event"))?;

    info!(
        user_id = %user.user_id(),
        business_id = %payload.business_id,
        name = %payload.name,
        "Creating event"
    );

    let model = event_model::ActiveModel {
        business_id: Set(payload.business_id),
        name: Set(payload.name),
        description: Set(payload.description),
        starts_at: Set(payload.starts_at),
        location: Set(payload.location),
        ..event_model::ActiveModel::new()
    };

    let event = app_state.event_repo.create(model).await?;
    Ok(Json(EventDto::from(event)))
}

pub async fn get_event_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<EventDto>> {
    let event = app_state
        .event_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("Event", &id.to_string(), "event_handler::get_event"))?;

    Ok(Json(EventDto::from(event)))
}

pub async fn list_events_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<EventListQuery>,
) -> AppResult<Json<EventListDto>> {
    let business_id = parse_uuid_filter(query.business_id.as_deref())?;

    let mut params = ListParams::new(query.page, query.limit).order_by_desc("created_at");
    if let Some(business_id) = business_id {
        params = params.filter_eq("business_id", business_id);
    }

    let (events, count) = app_state.event_repo.find_with_params(&params).await?;

    Ok(Json(EventListDto {
        events: events.into_iter().map(EventDto::from).collect(),
        count,
    }))
}

pub async fn update_event_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateEventDto>,
) -> AppResult<Json<EventDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "event_handler::update_event"))?;

    let model = event_model::ActiveModel {
        id: Set(payload.id),
        business_id: Set(payload.business_id),
        name: Set(payload.name),
        description: Set(payload.description),
        starts_at: Set(payload.starts_at),
        location: Set(payload.location),
        ..ActiveModelTrait::default()
    };

    let event = app_state.event_repo.update(model).await?;
    Ok(Json(EventDto::from(event)))
}

pub async fn delete_event_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<MessageResponse>> {
    let deleted = app_state.event_repo.delete_by_id(id).await?;
    if deleted == 0 {
        return Err(not_found_error(
            "Event",
            &id.to_string(),
            "event_handler::delete_event",
        ));
    }

    Ok(Json(MessageResponse::new("Event deleted successfully")))
}

// --- Router Setup ---

pub fn event_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/event",
            post(create_event_handler).put(update_event_handler),
        )
        .route("/event/list", get(list_events_handler))
        .route(
            "/event/{id}",
            get(get_event_handler).delete(delete_event_handler),
        )
        .with_state(app_state)
}
