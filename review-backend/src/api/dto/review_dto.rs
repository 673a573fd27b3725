// src/api/dto/review_dto.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::common::{default_limit, default_page, deserialize_limit, deserialize_page};
use crate::domain::review_model;

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateReviewDto {
    pub business_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,

    #[validate(length(max = 2000, message = "Comment must not exceed 2000 characters"))]
    pub comment: Option<String>,
}

/// PUTは全項目置き換え。部分更新したい場合は呼び出し側が
/// 取得してからマージする。
#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct UpdateReviewDto {
    pub id: Uuid,
    pub business_id: Uuid,
    pub user_id: Uuid,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,

    #[validate(length(max = 2000, message = "Comment must not exceed 2000 characters"))]
    pub comment: Option<String>,

    pub photos: Option<String>,
}

// --- List query ---

#[derive(Debug, Deserialize)]
pub struct ReviewListQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    pub page: u64,
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: u64,
    #[serde(default)]
    pub business_id: Option<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct ReviewDto {
    pub id: Uuid,
    pub business_id: Uuid,
    pub user_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub photos: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<review_model::Model> for ReviewDto {
    fn from(model: review_model::Model) -> Self {
        Self {
            id: model.id,
            business_id: model.business_id,
            user_id: model.user_id,
            rating: model.rating,
            comment: model.comment,
            photos: model.photos,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ReviewListDto {
    pub reviews: Vec<ReviewDto>,
    pub count: u64,
}
