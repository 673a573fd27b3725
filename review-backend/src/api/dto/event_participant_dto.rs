// src/api/dto/event_participant_dto.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::common::{default_limit, default_page, deserialize_limit, deserialize_page};
use crate::domain::event_participant_model;

/// 参加ステータスの許可値
pub const PARTICIPATION_STATUSES: &[&str] = &["going", "interested", "declined"];

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateEventParticipantDto {
    pub event_id: Uuid,

    #[validate(length(min = 1, max = 20, message = "Status is required"))]
    pub status: String,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct UpdateEventParticipantDto {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 20, message = "Status is required"))]
    pub status: String,
}

// --- List query ---

#[derive(Debug, Deserialize)]
pub struct EventParticipantListQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    pub page: u64,
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: u64,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct EventParticipantDto {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<event_participant_model::Model> for EventParticipantDto {
    fn from(model: event_participant_model::Model) -> Self {
        Self {
            id: model.id,
            event_id: model.event_id,
            user_id: model.user_id,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct EventParticipantListDto {
    pub event_participants: Vec<EventParticipantDto>,
    pub count: u64,
}
