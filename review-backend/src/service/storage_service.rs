// src/service/storage_service.rs

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{Client, Config};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppResult;
use crate::utils::error_helper::external_service_error;

/// ストレージプロバイダーの種類
#[derive(Debug, Clone, PartialEq)]
pub enum StorageProvider {
    MinIO,
    R2,
}

impl StorageProvider {
    /// 環境変数からプロバイダーを判定
    pub fn from_env() -> Self {
        match std::env::var("STORAGE_PROVIDER")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "r2" | "cloudflare" | "cloudflare-r2" => Self::R2,
            _ => Self::MinIO,
        }
    }
}

/// ストレージサービスのトレイト定義
#[async_trait]
pub trait StorageService: Send + Sync {
    /// ファイルをアップロードして公開URLを返す
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> AppResult<String>;

    /// ファイルを削除
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// S3互換ストレージサービスの実装
pub struct S3StorageService {
    client: Client,
    bucket: String,
    public_base: String,
}

impl S3StorageService {
    pub fn new(config: StorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "storage_service",
        );

        let mut s3_config_builder = Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint)
            .credentials_provider(credentials);

        // プロバイダー固有の設定
        match config.provider {
            StorageProvider::MinIO => {
                // MinIOはpath styleを強制
                s3_config_builder = s3_config_builder.force_path_style(true);
            }
            StorageProvider::R2 => {}
        }

        let client = Client::from_conf(s3_config_builder.build());
        let public_base = format!(
            "{}/{}",
            config.endpoint.trim_end_matches('/'),
            config.bucket
        );

        Self {
            client,
            bucket: config.bucket,
            public_base,
        }
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn upload(&self, key: &str, data: Vec<u8>, content_type: &str) -> AppResult<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                external_service_error(e, "s3_storage_service::upload", "Failed to upload file")
            })?;

        Ok(format!("{}/{}", self.public_base, key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                external_service_error(e, "s3_storage_service::delete", "Failed to delete file")
            })?;

        Ok(())
    }
}

/// ストレージ設定
#[derive(Clone)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub endpoint: String,
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
}

impl StorageConfig {
    /// 環境変数から設定を読み込み
    pub fn from_env() -> AppResult<Self> {
        let provider = StorageProvider::from_env();

        tracing::info!("Storage provider: {:?}", provider);

        Ok(Self {
            provider,
            endpoint: std::env::var("STORAGE_ENDPOINT").map_err(|_| {
                crate::error::AppError::InternalServerError("STORAGE_ENDPOINT not set".to_string())
            })?,
            bucket: std::env::var("STORAGE_BUCKET").map_err(|_| {
                crate::error::AppError::InternalServerError("STORAGE_BUCKET not set".to_string())
            })?,
            region: std::env::var("STORAGE_REGION")
                .unwrap_or_else(|_| "us-east-1".to_string()),
            access_key: std::env::var("STORAGE_ACCESS_KEY").map_err(|_| {
                crate::error::AppError::InternalServerError(
                    "STORAGE_ACCESS_KEY not set".to_string(),
                )
            })?,
            secret_key: std::env::var("STORAGE_SECRET_KEY").map_err(|_| {
                crate::error::AppError::InternalServerError(
                    "STORAGE_SECRET_KEY not set".to_string(),
                )
            })?,
        })
    }
}

/// ストレージサービスのファクトリ関数
pub fn create_storage_service(config: StorageConfig) -> Arc<dyn StorageService> {
    // MinIOもR2もS3互換なので同じ実装を使用
    Arc::new(S3StorageService::new(config))
}

/// ファイルサニタイゼーション用のヘルパー関数
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '.' || *c == '-' || *c == '_')
        .collect::<String>()
        .trim_matches('.')
        .to_string()
}

/// 衝突しないオブジェクトキーを生成する。
/// URLに元のファイル名が残るよう、UUIDプレフィックス + ファイル名にする。
pub fn build_object_key(filename: &str) -> String {
    format!("{}-{}", Uuid::new_v4(), sanitize_filename(filename))
}
