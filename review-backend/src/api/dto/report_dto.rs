// src/api/dto/report_dto.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::common::{default_limit, default_page, deserialize_limit, deserialize_page};
use crate::domain::report_model;

/// 通報対象の許可値
pub const REPORT_TARGET_TYPES: &[&str] = &["business", "review", "user", "event"];
/// 通報ステータスの許可値
pub const REPORT_STATUSES: &[&str] = &["open", "resolved", "dismissed"];

// --- Request DTOs ---

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct CreateReportDto {
    #[validate(length(min = 1, max = 20, message = "Target type is required"))]
    pub target_type: String,

    pub target_id: Uuid,

    #[validate(length(min = 1, max = 2000, message = "Reason is required"))]
    pub reason: String,
}

#[derive(Deserialize, Serialize, Debug, Validate)]
pub struct UpdateReportDto {
    pub id: Uuid,
    pub reporter_id: Uuid,

    #[validate(length(min = 1, max = 20, message = "Target type is required"))]
    pub target_type: String,

    pub target_id: Uuid,

    #[validate(length(min = 1, max = 2000, message = "Reason is required"))]
    pub reason: String,

    #[validate(length(min = 1, max = 20, message = "Status is required"))]
    pub status: String,
}

// --- List query ---

#[derive(Debug, Deserialize)]
pub struct ReportListQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    pub page: u64,
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: u64,
    #[serde(default)]
    pub reporter_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug)]
pub struct ReportDto {
    pub id: Uuid,
    pub reporter_id: Uuid,
    pub target_type: String,
    pub target_id: Uuid,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<report_model::Model> for ReportDto {
    fn from(model: report_model::Model) -> Self {
        Self {
            id: model.id,
            reporter_id: model.reporter_id,
            target_type: model.target_type,
            target_id: model.target_id,
            reason: model.reason,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ReportListDto {
    pub reports: Vec<ReportDto>,
    pub count: u64,
}
