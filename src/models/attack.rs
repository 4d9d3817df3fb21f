//! Honeypot attack models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Severity;

/// Simulated honeypot services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoneypotService {
    Ssh,
    Http,
    Ftp,
}

impl HoneypotService {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoneypotService::Ssh => "ssh",
            HoneypotService::Http => "http",
            HoneypotService::Ftp => "ftp",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            HoneypotService::Ssh => 22,
            HoneypotService::Http => 80,
            HoneypotService::Ftp => 21,
        }
    }
}

impl std::fmt::Display for HoneypotService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Geolocation attached to an attack, best-effort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub country: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
}

/// Stored honeypot attack log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoneypotAttack {
    pub id: u64,
    pub service: HoneypotService,
    pub source_ip: String,
    pub attack_type: String,
    pub severity: Severity,
    pub port: u16,
    pub payload: Option<String>,
    pub location: Option<GeoLocation>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for an attack log entry; id and timestamp are assigned
/// by the store.
#[derive(Debug, Clone)]
pub struct NewHoneypotAttack {
    pub service: HoneypotService,
    pub source_ip: String,
    pub attack_type: String,
    pub severity: Severity,
    pub port: u16,
    pub payload: Option<String>,
    pub location: Option<GeoLocation>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAttackRequest {
    pub service: HoneypotService,
    #[validate(length(min = 1, message = "source_ip must not be empty"))]
    pub source_ip: String,
    #[validate(length(min = 1, message = "attack_type must not be empty"))]
    pub attack_type: String,
    pub severity: Severity,
    pub port: Option<u16>,
    pub payload: Option<String>,
}

impl SubmitAttackRequest {
    /// Minimal request with defaulted port and no payload
    pub fn simple(
        service: HoneypotService,
        severity: Severity,
        source_ip: &str,
        attack_type: &str,
    ) -> Self {
        Self {
            service,
            source_ip: source_ip.to_string(),
            attack_type: attack_type.to_string(),
            severity,
            port: None,
            payload: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitAttackResponse {
    pub log: HoneypotAttack,
    pub alert_created: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct HoneypotLogFilter {
    pub limit: Option<usize>,
    pub service: Option<HoneypotService>,
}
