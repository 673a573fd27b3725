// src/api/mod.rs
use std::sync::Arc;

use axum::{middleware, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::DbPool;
use crate::middleware::auth::jwt_auth_middleware;
use crate::repository::business_repository::BusinessRepository;
use crate::repository::event_participant_repository::EventParticipantRepository;
use crate::repository::event_repository::EventRepository;
use crate::repository::notification_repository::NotificationRepository;
use crate::repository::report_repository::ReportRepository;
use crate::repository::review_repository::ReviewRepository;
use crate::repository::session_repository::SessionRepository;
use crate::repository::user_repository::UserRepository;
use crate::service::storage_service::StorageService;
use crate::utils::jwt::JwtManager;

pub mod dto;
pub mod handlers;

/// 統一されたアプリケーション状態。
/// リポジトリはDB接続のクローンを持つだけなので、リクエストごとの
/// クローンは安価。
#[derive(Clone)]
pub struct AppState {
    pub user_repo: UserRepository,
    pub business_repo: BusinessRepository,
    pub review_repo: ReviewRepository,
    pub event_repo: EventRepository,
    pub event_participant_repo: EventParticipantRepository,
    pub report_repo: ReportRepository,
    pub notification_repo: NotificationRepository,
    pub session_repo: SessionRepository,
    pub storage: Arc<dyn StorageService>,
    pub jwt_manager: Arc<JwtManager>,
}

impl AppState {
    pub fn new(db: DbPool, storage: Arc<dyn StorageService>, jwt_manager: Arc<JwtManager>) -> Self {
        Self {
            user_repo: UserRepository::new(db.clone()),
            business_repo: BusinessRepository::new(db.clone()),
            review_repo: ReviewRepository::new(db.clone()),
            event_repo: EventRepository::new(db.clone()),
            event_participant_repo: EventParticipantRepository::new(db.clone()),
            report_repo: ReportRepository::new(db.clone()),
            notification_repo: NotificationRepository::new(db.clone()),
            session_repo: SessionRepository::new(db),
            storage,
            jwt_manager,
        }
    }
}

/// 全リソースのルーターを束ねたアプリケーションを構築する。
/// `/auth/register` と `/auth/login` 以外はBearerトークン検証を通る。
pub fn create_app(app_state: AppState) -> Router {
    let jwt_manager = app_state.jwt_manager.clone();

    let protected = Router::new()
        .merge(handlers::auth_handler::auth_session_router(
            app_state.clone(),
        ))
        .merge(handlers::user_handler::user_router(app_state.clone()))
        .merge(handlers::business_handler::business_router(
            app_state.clone(),
        ))
        .merge(handlers::review_handler::review_router(app_state.clone()))
        .merge(handlers::event_handler::event_router(app_state.clone()))
        .merge(handlers::event_participant_handler::event_participant_router(app_state.clone()))
        .merge(handlers::report_handler::report_router(app_state.clone()))
        .merge(handlers::notification_handler::notification_router(
            app_state.clone(),
        ))
        .merge(handlers::session_handler::session_router(app_state.clone()))
        .layer(middleware::from_fn_with_state(
            jwt_manager,
            jwt_auth_middleware,
        ));

    Router::new()
        .merge(handlers::auth_handler::auth_public_router(app_state))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
