//! Threat model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatStatus {
    Active,
    Resolved,
    Dismissed,
}

/// Insert payload for a threat; id, status, and timestamp are assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewThreat {
    pub threat_type: String,
    pub severity: Severity,
    pub source: String,
    pub description: String,
    pub metadata: serde_json::Value,
}

/// Derived record created when a detection crosses an escalation threshold.
///
/// Create-then-immutable in this core: status transitions belong to an
/// operator workflow that does not exist here, so every stored threat
/// stays `Active`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Threat {
    pub id: u64,
    pub threat_type: String,
    pub severity: Severity,
    pub source: String,
    pub description: String,
    pub metadata: serde_json::Value,
    pub status: ThreatStatus,
    pub detected_at: DateTime<Utc>,
}
