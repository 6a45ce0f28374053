//! Journal entry handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{parse_date_param, AppError, AppState, SuccessResponse};
use recovery_core::models::{EntryCollection, JournalEntry};

/// Query parameters for listing entries
#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    /// Inclusive start date (YYYY-MM-DD)
    pub from: Option<String>,
    /// Inclusive end date (YYYY-MM-DD)
    pub to: Option<String>,
}

/// GET /api/entries - Stored entries keyed by date, optionally bounded
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EntriesQuery>,
) -> Result<Json<EntryCollection>, AppError> {
    let from = params.from.as_deref().map(parse_date_param).transpose()?;
    let to = params.to.as_deref().map(parse_date_param).transpose()?;

    if let (Some(from), Some(to)) = (from, to) {
        if from > to {
            return Err(AppError::bad_request("'from' must not be after 'to'"));
        }
    }

    let entries = state.db.list_entries_between(from, to)?;
    Ok(Json(entries))
}

/// GET /api/entries/:date
pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<Json<JournalEntry>, AppError> {
    let date = parse_date_param(&date)?;

    state
        .db
        .get_entry(date)?
        .map(Json)
        .ok_or_else(|| AppError::not_found(&format!("No entry for {}", date)))
}

/// PUT /api/entries/:date - Store the entry, replacing any previous one
pub async fn put_entry(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
    Json(entry): Json<JournalEntry>,
) -> Result<Json<JournalEntry>, AppError> {
    let date = parse_date_param(&date)?;

    state.db.upsert_entry(date, &entry)?;

    let stored = state
        .db
        .get_entry(date)?
        .ok_or_else(|| AppError::not_found(&format!("No entry for {}", date)))?;
    Ok(Json(stored))
}

/// DELETE /api/entries/:date
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let date = parse_date_param(&date)?;

    if !state.db.delete_entry(date)? {
        return Err(AppError::not_found(&format!("No entry for {}", date)));
    }
    Ok(Json(SuccessResponse { success: true }))
}
