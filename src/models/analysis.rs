//! Phishing and deepfake analysis models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Stored result of a phishing email analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhishingAnalysis {
    pub id: u64,
    pub content: String,
    /// Phishing likelihood, 0-100
    pub score: u8,
    /// Classifier confidence, 0-100
    pub confidence: u8,
    pub suspicious_link_count: u32,
    pub indicators: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Stored result of a deepfake media analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeepfakeAnalysis {
    pub id: u64,
    pub file_name: String,
    pub file_type: String,
    pub file_size_bytes: u64,
    pub is_deepfake: bool,
    /// Detector confidence, 0.0-1.0
    pub confidence: f64,
    pub processing_time_ms: u64,
    pub anomalies: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a phishing analysis; id and timestamp are assigned
/// by the store.
#[derive(Debug, Clone)]
pub struct NewPhishingAnalysis {
    pub content: String,
    pub score: u8,
    pub confidence: u8,
    pub suspicious_link_count: u32,
    pub indicators: Vec<String>,
}

/// Insert payload for a deepfake analysis
#[derive(Debug, Clone)]
pub struct NewDeepfakeAnalysis {
    pub file_name: String,
    pub file_type: String,
    pub file_size_bytes: u64,
    pub is_deepfake: bool,
    pub confidence: f64,
    pub processing_time_ms: u64,
    pub anomalies: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeEmailRequest {
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeEmailResponse {
    pub analysis: PhishingAnalysis,
    pub escalated: bool,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeMediaRequest {
    #[validate(length(min = 1, message = "file_name must not be empty"))]
    pub file_name: String,
    #[validate(length(min = 1, message = "file_type must not be empty"))]
    pub file_type: String,
    pub file_size_bytes: u64,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeMediaResponse {
    pub analysis: DeepfakeAnalysis,
    pub escalated: bool,
}
