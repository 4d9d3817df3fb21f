//! Aggregate statistics models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Singleton dashboard counters.
///
/// Counters only move together with their paired event insertion and are
/// monotonically increasing; `active_threats` has no decrement path because
/// the resolution workflow is out of scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStats {
    pub active_threats: u64,
    pub phishing_blocked: u64,
    pub deepfakes_detected: u64,
    pub honeypot_hits: u64,
    pub updated_at: DateTime<Utc>,
}

impl SystemStats {
    pub fn new() -> Self {
        Self {
            active_threats: 0,
            phishing_blocked: 0,
            deepfakes_detected: 0,
            honeypot_hits: 0,
            updated_at: Utc::now(),
        }
    }
}

impl Default for SystemStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-service honeypot hit counts, derived from stored attack logs
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HoneypotStats {
    pub total: usize,
    pub ssh: usize,
    pub http: usize,
    pub ftp: usize,
}
