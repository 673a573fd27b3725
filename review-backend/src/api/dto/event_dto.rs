// src/api/dto/event_dto.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::common::{default_limit, default_page, deserialize_limit, deserialize_page};
use crate::domain::event_model;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateEventDto {
    pub business_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    pub starts_at: DateTime<Utc>,

    #[validate(length(max = 500, message = "Location must not exceed 500 characters"))]
    pub location: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct UpdateEventDto {
    pub id: Uuid,
    pub business_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,

    pub starts_at: DateTime<Utc>,

    #[validate(length(max = 500, message = "Location must not exceed 500 characters"))]
    pub location: Option<String>,
}

// --- List query ---

#[derive(Debug, Deserialize)]
pub struct EventListQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    pub page: u64,
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: u64,
    #[serde(default)]
    pub business_id: Option<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct EventDto {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<event_model::Model> for EventDto {
    fn from(model: event_model::Model) -> Self {
        Self {
            id: model.id,
            business_id: model.business_id,
            name: model.name,
            description: model.description,
            starts_at: model.starts_at,
            location: model.location,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct EventListDto {
    pub events: Vec<EventDto>,
    pub count: u64,
}
