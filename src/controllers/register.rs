//! register.rs
//!
//! Show registration endpoints:
//! - registering a show with its prices, seats and schedules in one go;
//! - reading a registered show back as a single composite document;
//! - theater and hall lookups used to pick the hall of a new show.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

use crate::error::{ApiError, AppJson};
use crate::models::{Hall, ShowRegistration, Theater, TheaterSearch};
use crate::services::registration;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register_show", post(register_show))
        .route("/register/show_detail/{show_detail_id}", get(get_show_detail))
        .route("/register/theaters", get(search_theaters))
        .route("/register/theaters/{theater_id}/halls", get(list_halls))
}

/* ---------- SHOWS ---------- */

// POST /api/register_show
async fn register_show(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ShowRegistration>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let show = registration::register_show(&state.shows, &req).await?;
    Ok((StatusCode::OK, Json(show)))
}

// GET /api/register/show_detail/{show_detail_id}
async fn get_show_detail(
    State(state): State<Arc<AppState>>,
    Path(show_detail_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let full = registration::get_full_show_detail(&state.shows, show_detail_id).await?;
    Ok((StatusCode::OK, Json(full)))
}

/* ---------- VENUES ---------- */

// GET /api/register/theaters?name=&skip=&limit=
async fn search_theaters(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TheaterSearch>,
) -> Result<impl IntoResponse, ApiError> {
    params.validate()?;

    let theaters = Theater::search_by_name(&params, &state.db)
        .await
        .map_err(|e| ApiError::storage("search_theaters", e))?;

    Ok((StatusCode::OK, Json(theaters)))
}

// GET /api/register/theaters/{theater_id}/halls
async fn list_halls(
    State(state): State<Arc<AppState>>,
    Path(theater_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let halls = Hall::find_by_theater(theater_id, &state.db)
        .await
        .map_err(|e| ApiError::storage("list_halls", e))?;

    Ok((StatusCode::OK, Json(halls)))
}
