//! Incident reports. A report is keyed by its (category, category_id) pair.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

use crate::error::{ApiError, AppJson};
use crate::models::{NewReport, Report, ReportSearch};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports", post(create_report).get(get_all_reports))
        .route("/reports/search", post(search_reports))
        .route("/reports/{report_id}", get(get_report))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

// POST /api/reports
async fn create_report(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<NewReport>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let report = Report::insert(&req, &state.db).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict(format!(
                "Report for {} {} already exists",
                req.category, req.category_id
            ))
        } else {
            ApiError::storage("create_report", e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(report)))
}

// GET /api/reports
async fn get_all_reports(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let reports = Report::find_all(&state.db)
        .await
        .map_err(|e| ApiError::storage("get_all_reports", e))?;

    Ok((StatusCode::OK, Json(reports)))
}

// GET /api/reports/{report_id}
async fn get_report(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let report = Report::find_by_id(report_id, &state.db)
        .await
        .map_err(|e| ApiError::storage("get_report", e))?
        .ok_or_else(|| ApiError::NotFound(format!("Report {report_id} not found")))?;

    Ok((StatusCode::OK, Json(report)))
}

// POST /api/reports/search
async fn search_reports(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ReportSearch>,
) -> Result<impl IntoResponse, ApiError> {
    let reports = Report::search(&req, &state.db)
        .await
        .map_err(|e| ApiError::storage("search_reports", e))?;

    Ok((StatusCode::OK, Json(reports)))
}
