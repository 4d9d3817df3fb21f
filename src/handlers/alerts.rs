//! Alert handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::models::{Alert, AlertCounts, AlertFilter};
use crate::{AppError, AppResult, AppState};

const DEFAULT_ALERT_LIMIT: usize = 50;

#[derive(Serialize)]
pub struct MarkAllReadResponse {
    pub updated: usize,
}

/// List alerts, newest first
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<AlertFilter>,
) -> AppResult<Json<Vec<Alert>>> {
    let limit = filter.limit.unwrap_or(DEFAULT_ALERT_LIMIT);
    let unread_only = filter.unread_only.unwrap_or(false);
    Ok(Json(state.store.list_alerts(unread_only, limit, 0)))
}

/// Total and unread alert counts
pub async fn counts(State(state): State<AppState>) -> AppResult<Json<AlertCounts>> {
    Ok(Json(state.store.alert_counts()))
}

/// Mark one alert read. Idempotent.
pub async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<Alert>> {
    let alert = state
        .store
        .mark_alert_read(id)
        .ok_or_else(|| AppError::NotFound(format!("Alert {} not found", id)))?;
    Ok(Json(alert))
}

/// Mark every alert read
pub async fn mark_all_read(State(state): State<AppState>) -> AppResult<Json<MarkAllReadResponse>> {
    let updated = state.store.mark_all_alerts_read();
    Ok(Json(MarkAllReadResponse { updated }))
}
