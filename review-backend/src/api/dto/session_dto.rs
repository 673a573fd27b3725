// src/api/dto/session_dto.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::dto::common::{default_limit, default_page, deserialize_limit, deserialize_page};
use crate::domain::session_model;

// セッションはログインで作られ、ログアウト/削除以外で変更されないため
// リクエストDTOは持たない。

// --- List query ---

#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    pub page: u64,
    #[serde(default = "default_limit", deserialize_with = "deserialize_limit")]
    pub limit: u64,
    #[serde(default)]
    pub user_id: Option<String>,
}

// --- Response DTOs ---

/// token_hash はここで落とす
#[derive(Serialize, Deserialize, Debug)]
pub struct SessionDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<session_model::Model> for SessionDto {
    fn from(model: session_model::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            user_agent: model.user_agent,
            ip_address: model.ip_address,
            expires_at: model.expires_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SessionListDto {
    pub sessions: Vec<SessionDto>,
    pub count: u64,
}
