//! Email/notification collaborator
//!
//! Fired best-effort when a honeypot attack escalates. Failures are logged
//! by the caller and never reach the ingestion path.

use crate::models::{Alert, HoneypotAttack};

pub trait AlertMailer: Send + Sync {
    /// Deliver an attack alert; returns whether delivery succeeded.
    fn send_attack_alert(&self, attack: &HoneypotAttack, alert: &Alert) -> bool;
}

/// Demo mailer: writes the would-be email to the log and reports success.
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogMailer {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertMailer for LogMailer {
    fn send_attack_alert(&self, attack: &HoneypotAttack, alert: &Alert) -> bool {
        tracing::info!(
            service = %attack.service,
            source_ip = %attack.source_ip,
            severity = %attack.severity,
            "Email alert dispatched: {}",
            alert.title
        );
        true
    }
}
