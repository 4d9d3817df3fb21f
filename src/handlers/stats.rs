//! System stats handler

use axum::{extract::State, Json};

use crate::models::SystemStats;
use crate::{AppResult, AppState};

/// Current dashboard counters
pub async fn get(State(state): State<AppState>) -> AppResult<Json<SystemStats>> {
    Ok(Json(state.store.stats()))
}
