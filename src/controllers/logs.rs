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
use crate::models::{LogEntry, LogSearch, NewLogEntry};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/logs", post(create_log).get(get_all_logs))
        .route("/logs/search", post(search_logs))
        .route("/logs/{member_id}", get(get_member_logs))
}

// POST /api/logs
async fn create_log(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<NewLogEntry>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let log = LogEntry::insert(&req, &state.db)
        .await
        .map_err(|e| ApiError::storage("create_log", e))?;

    tracing::info!("log {} recorded for member {} on {}", log.id, log.member_id, log.table_name);
    Ok((StatusCode::CREATED, Json(log)))
}

// GET /api/logs
async fn get_all_logs(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let logs = LogEntry::find_all(&state.db)
        .await
        .map_err(|e| ApiError::storage("get_all_logs", e))?;

    if logs.is_empty() {
        return Err(ApiError::NotFound("No logs found".to_string()));
    }
    Ok((StatusCode::OK, Json(logs)))
}

// GET /api/logs/{member_id}
async fn get_member_logs(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let logs = LogEntry::find_by_member(member_id, &state.db)
        .await
        .map_err(|e| ApiError::storage("get_member_logs", e))?;

    if logs.is_empty() {
        return Err(ApiError::NotFound(format!("Logs not found for member {member_id}")));
    }
    Ok((StatusCode::OK, Json(logs)))
}

// POST /api/logs/search
async fn search_logs(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<LogSearch>,
) -> Result<impl IntoResponse, ApiError> {
    let logs = LogEntry::search(&req, &state.db)
        .await
        .map_err(|e| ApiError::storage("search_logs", e))?;

    Ok((StatusCode::OK, Json(logs)))
}
