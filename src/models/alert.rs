//! Alert model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Email,
    Media,
    Honeypot,
    System,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::Email => "email",
            AlertCategory::Media => "media",
            AlertCategory::Honeypot => "honeypot",
            AlertCategory::System => "system",
        }
    }
}

/// Insert payload for an alert; id, read flag, and timestamp are assigned
/// by the store.
#[derive(Debug, Clone)]
pub struct NewAlert {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub category: AlertCategory,
    pub metadata: serde_json::Value,
}

/// Operator-facing alert derived from a detection event.
///
/// `is_read` is the only mutable field and only ever flips false -> true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub category: AlertCategory,
    pub is_read: bool,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Default)]
pub struct AlertFilter {
    pub limit: Option<usize>,
    pub unread_only: Option<bool>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AlertCounts {
    pub total: usize,
    pub unread: usize,
}
