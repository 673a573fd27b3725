// src/main.rs
use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use review_backend::api::{create_app, AppState};
use review_backend::config::Config;
use review_backend::db::create_db_pool;
use review_backend::service::storage_service::{create_storage_service, StorageConfig};
use review_backend::utils::jwt::{JwtConfig, JwtManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "review_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Review Backend server...");

    let app_config = Config::from_env().expect("Failed to load configuration");

    let db_pool = create_db_pool(&app_config)
        .await
        .expect("Failed to create database pool");
    tracing::info!("Database pool created successfully.");

    Migrator::up(&db_pool, None)
        .await
        .expect("Failed to run database migrations");

    let storage_config = StorageConfig::from_env().expect("Failed to load storage configuration");
    let storage = create_storage_service(storage_config);

    let jwt_config = JwtConfig::from_env().expect("Failed to load JWT configuration");
    let jwt_manager =
        Arc::new(JwtManager::new(jwt_config).expect("Failed to initialize JWT manager"));

    let app_state = AppState::new(db_pool, storage, jwt_manager);
    let app_router = create_app(app_state);

    tracing::info!(
        "Router configured. Server listening on {}",
        app_config.server_addr
    );

    let listener = TcpListener::bind(&app_config.server_addr).await?;
    axum::serve(listener, app_router.into_make_service()).await?;

    Ok(())
}
