//! Phishing and deepfake analysis handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::models::{
    AnalyzeEmailRequest, AnalyzeEmailResponse, AnalyzeMediaRequest, AnalyzeMediaResponse,
};
use crate::{AppResult, AppState};

/// Score an email body and escalate if the policy says so
pub async fn analyze_email(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeEmailRequest>,
) -> AppResult<Json<AnalyzeEmailResponse>> {
    req.validate()?;
    let response = state.correlator.submit_phishing_analysis(&req.content)?;
    Ok(Json(response))
}

/// Run the deepfake detector over uploaded file metadata
pub async fn analyze_media(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeMediaRequest>,
) -> AppResult<Json<AnalyzeMediaResponse>> {
    let response = state.correlator.submit_deepfake_analysis(req)?;
    Ok(Json(response))
}
