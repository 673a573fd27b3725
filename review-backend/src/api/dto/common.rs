// src/api/dto/common.rs
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::shared::query::DEFAULT_PAGE_SIZE;

/// デフォルトページ番号
pub fn default_page() -> u64 {
    1
}

/// デフォルトページサイズ
pub fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

// クエリ文字列は数値も文字列として届く。非数値はエラーにせず
// デフォルト値に黙ってフォールバックする。
fn lenient_u64<'de, D>(deserializer: D, fallback: u64) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Number(u64),
        String(String),
    }

    Ok(match StringOrNumber::deserialize(deserializer) {
        Ok(StringOrNumber::Number(n)) => n,
        Ok(StringOrNumber::String(s)) => s.parse::<u64>().unwrap_or(fallback),
        Err(_) => fallback,
    })
}

pub fn deserialize_page<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_u64(deserializer, default_page())
}

pub fn deserialize_limit<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_u64(deserializer, default_limit())
}

/// 一覧フィルタのUUIDキーを検証する。
/// 空文字・未指定は「フィルタなし」。形式不正は404の固定レスポンスに
/// なる `WrongUuidFormat` を返す。
pub fn parse_uuid_filter(value: Option<&str>) -> Result<Option<Uuid>, AppError> {
    match value {
        None | Some("") => Ok(None),
        Some(s) => Uuid::parse_str(s)
            .map(Some)
            .map_err(|_| AppError::WrongUuidFormat),
    }
}

/// `{"message": "..."}` 形式の成功レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
