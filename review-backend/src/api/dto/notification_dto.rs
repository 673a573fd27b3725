// src/api/dto/notification_dto.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::common::{default_limit, default_page, deserialize_limit, deserialize_page};
use crate::domain::notification_model;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateNotificationDto {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Message is required"))]
    pub message: String,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct UpdateNotificationDto {
    pub id: Uuid,
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Message is required"))]
    pub message: String,

    pub is_read: bool,
}

// --- List query ---

#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    pub page: u64,
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: u64,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub is_read: Option<bool>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct NotificationDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<notification_model::Model> for NotificationDto {
    fn from(model: notification_model::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            message: model.message,
            is_read: model.is_read,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct NotificationListDto {
    pub notifications: Vec<NotificationDto>,
    pub count: u64,
}
