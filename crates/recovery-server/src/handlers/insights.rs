//! Insight handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{parse_date_param, AppError, AppState};
use recovery_core::insights::{generate_insights_at, InsightsData};
use recovery_core::models::EntryCollection;

/// Query parameters for insight generation
#[derive(Debug, Deserialize)]
pub struct InsightQuery {
    /// Reference day for freshness labels (defaults to the server's local day)
    pub today: Option<String>,
}

fn reference_day(params: &InsightQuery) -> Result<NaiveDate, AppError> {
    match params.today.as_deref() {
        Some(day) => parse_date_param(day),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// GET /api/insights - Run the engine over the stored journal
pub async fn get_insights(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InsightQuery>,
) -> Result<Json<InsightsData>, AppError> {
    let today = reference_day(&params)?;
    let entries = state.db.list_entries()?;

    Ok(Json(generate_insights_at(&entries, today)))
}

/// POST /api/insights/preview - Run the engine over the posted entries
///
/// Nothing is read from or written to the store.
pub async fn preview_insights(
    Query(params): Query<InsightQuery>,
    Json(entries): Json<EntryCollection>,
) -> Result<Json<InsightsData>, AppError> {
    let today = reference_day(&params)?;
    Ok(Json(generate_insights_at(&entries, today)))
}
