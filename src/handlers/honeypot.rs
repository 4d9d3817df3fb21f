//! Honeypot handlers

use axum::{
    extract::{Query, State},
    Json,
};

use crate::models::{
    HoneypotAttack, HoneypotLogFilter, HoneypotStats, SubmitAttackRequest, SubmitAttackResponse,
};
use crate::{AppResult, AppState};

const DEFAULT_LOG_LIMIT: usize = 50;

/// Ingest an attack observation (simulators post through here too)
pub async fn submit_attack(
    State(state): State<AppState>,
    Json(req): Json<SubmitAttackRequest>,
) -> AppResult<Json<SubmitAttackResponse>> {
    let response = state.correlator.submit_honeypot_attack(req)?;
    Ok(Json(response))
}

/// List attack logs, newest first, optionally per service
pub async fn list_logs(
    State(state): State<AppState>,
    Query(filter): Query<HoneypotLogFilter>,
) -> AppResult<Json<Vec<HoneypotAttack>>> {
    let limit = filter.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    Ok(Json(state.store.list_attacks(filter.service, limit, 0)))
}

/// Per-service hit counts
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<HoneypotStats>> {
    Ok(Json(state.store.honeypot_stats()))
}
