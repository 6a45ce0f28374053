//! Health handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub entries: usize,
}

/// GET /api/health - Liveness plus a store round-trip
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, AppError> {
    let entries = state.db.count_entries()?;
    Ok(Json(HealthResponse {
        status: "ok",
        entries,
    }))
}
