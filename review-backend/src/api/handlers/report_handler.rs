// src/api/handlers/report_handler.rs
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use sea_orm::{ActiveModelBehavior, ActiveModelTrait, Set};
use tracing::info;
use validator::Validate;

use crate::api::dto::common::{parse_uuid_filter, MessageResponse};
use crate::api::dto::report_dto::{
    CreateReportDto, ReportDto, ReportListDto, ReportListQuery, UpdateReportDto,
    REPORT_STATUSES, REPORT_TARGET_TYPES,
};
use crate::api::handlers::{AppJson, UuidPath};
use crate::api::AppState;
use crate::domain::report_model;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::shared::query::ListParams;
use crate::utils::error_helper::{convert_validation_errors, not_found_error};

fn validate_target_type(target_type: &str) -> AppResult<()> {
    if !REPORT_TARGET_TYPES.contains(&target_type) {
        return Err(AppError::ValidationError(
            "Target type must be 'business', 'review', 'user', or 'event'".to_string(),
        ));
    }
    Ok(())
}

fn validate_report_status(status: &str) -> AppResult<()> {
    if !REPORT_STATUSES.contains(&status) {
        return Err(AppError::ValidationError(
            "Status must be 'open', 'resolved', or 'dismissed'".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_report_handler(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateReportDto>,
) -> AppResult<Json<ReportDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "report_handler::create_report"))?;
    validate_target_type(&payload.target_type)?;

    info!(
        user_id = %user.user_id(),
        target_type = %payload.target_type,
        target_id = %payload.target_id,
        "Creating report"
    );

    // 通報者は検証済みクレームから取り、ステータスは open で開始
    let model = report_model::ActiveModel {
        reporter_id: Set(user.user_id()),
        target_type: Set(payload.target_type),
        target_id: Set(payload.target_id),
        reason: Set(payload.reason),
        status: Set("open".to_string()),
        ..report_model::ActiveModel::new()
    };

    let report = app_state.report_repo.create(model).await?;
    Ok(Json(ReportDto::from(report)))
}

pub async fn get_report_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<ReportDto>> {
    let report = app_state
        .report_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found_error("Report", &id.to_string(), "report_handler::get_report"))?;

    Ok(Json(ReportDto::from(report)))
}

pub async fn list_reports_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ReportListQuery>,
) -> AppResult<Json<ReportListDto>> {
    let reporter_id = parse_uuid_filter(query.reporter_id.as_deref())?;

    let mut params = ListParams::new(query.page, query.limit).order_by_desc("created_at");
    if let Some(reporter_id) = reporter_id {
        params = params.filter_eq("reporter_id", reporter_id);
    }
    if let Some(status) = query.status {
        params = params.filter_eq("status", status);
    }

    let (reports, count) = app_state.report_repo.find_with_params(&params).await?;

    Ok(Json(ReportListDto {
        reports: reports.into_iter().map(ReportDto::from).collect(),
        count,
    }))
}

pub async fn update_report_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    AppJson(payload): AppJson<UpdateReportDto>,
) -> AppResult<Json<ReportDto>> {
    payload
        .validate()
        .map_err(|e| convert_validation_errors(e, "report_handler::update_report"))?;
    validate_target_type(&payload.target_type)?;
    validate_report_status(&payload.status)?;

    let model = report_model::ActiveModel {
        id: Set(payload.id),
        reporter_id: Set(payload.reporter_id),
        target_type: Set(payload.target_type),
        target_id: Set(payload.target_id),
        reason: Set(payload.reason),
        status: Set(payload.status),
        ..ActiveModelTrait::default()
    };

    let report = app_state.report_repo.update(model).await?;
    Ok(Json(ReportDto::from(report)))
}

pub async fn delete_report_handler(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    UuidPath(id): UuidPath,
) -> AppResult<Json<MessageResponse>> {
    let deleted = app_state.report_repo.delete_by_id(id).await?;
    if deleted == 0 {
        return Err(not_found_error(
            "Report",
            &id.to_string(),
            "report_handler::delete_report",
        ));
    }

    Ok(Json(MessageResponse::new("Report deleted successfully")))
}

// --- Router Setup ---

pub fn report_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/report",
            post(create_report_handler).put(update_report_handler),
        )
        .route("/report/list", get(list_reports_handler))
        .route(
            "/report/{id}",
            get(get_report_handler).delete(delete_report_handler),
        )
        .with_state(app_state)
}
