// src/api/handlers/mod.rs
//
// 全ハンドラー共通の抽出器とmultipart読み出しヘルパー。

use axum::extract::multipart::Multipart;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

pub mod auth_handler;
pub mod business_handler;
pub mod event_handler;
pub mod event_participant_handler;
pub mod notification_handler;
pub mod report_handler;
pub mod review_handler;
pub mod session_handler;
pub mod user_handler;

/// multipartアップロードの上限（10MB）
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// パスセグメントのUUID抽出器。非UUIDはバリデーションエラー（400）。
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(path_str) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::ValidationErrors(vec!["Invalid path parameter".to_string()]))?;

        let uuid = Uuid::parse_str(&path_str).map_err(|_| {
            AppError::ValidationErrors(vec![format!("Invalid UUID format: '{}'", path_str)])
        })?;

        Ok(UuidPath(uuid))
    }
}

/// JSONボディ抽出器。不正・欠落ボディをaxum標準の422ではなく
/// `{code, message}` 付きの400に揃える。
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// multipartから読み出したファイル
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// multipartの `file` フィールドを読み出す。
/// Content-Typeが無ければ application/octet-stream にフォールバック。
pub async fn read_file_field(multipart: &mut Multipart) -> AppResult<UploadedFile> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .ok_or_else(|| AppError::BadRequest("File name is required".to_string()))?
            .to_string();

        let content_type = field
            .content_type()
            .map(|ct| ct.to_string())
            .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file data: {}", e)))?;

        return Ok(UploadedFile {
            filename,
            content_type,
            data: data.to_vec(),
        });
    }

    Err(AppError::BadRequest("No file provided".to_string()))
}
