//! Severity/threshold policy
//!
//! Pure decision functions mapping raw detection results to escalation
//! verdicts. No state, no side effects; the correlator acts on the output.

use crate::models::{HoneypotService, Severity};

/// Phishing escalation: score >= 90 is critical, 70..90 is high, anything
/// below 70 stays un-escalated (the analysis record is still stored).
pub fn phishing_escalation(score: u8) -> Option<Severity> {
    if score >= 90 {
        Some(Severity::Critical)
    } else if score >= 70 {
        Some(Severity::High)
    } else {
        None
    }
}

/// Deepfake escalation: only positive verdicts at confidence >= 0.80
/// escalate; >= 0.95 is critical.
pub fn deepfake_escalation(is_deepfake: bool, confidence: f64) -> Option<Severity> {
    if !is_deepfake || confidence < 0.80 {
        return None;
    }
    if confidence >= 0.95 {
        Some(Severity::Critical)
    } else {
        Some(Severity::High)
    }
}

/// Honeypot escalation: only high/critical SSH attacks are alert-worthy.
/// HTTP/FTP traffic and low/medium SSH attacks are logged, never escalated.
pub fn honeypot_should_alert(service: HoneypotService, severity: Severity) -> bool {
    service == HoneypotService::Ssh && severity >= Severity::High
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phishing_thresholds() {
        assert_eq!(phishing_escalation(100), Some(Severity::Critical));
        assert_eq!(phishing_escalation(90), Some(Severity::Critical));
        assert_eq!(phishing_escalation(89), Some(Severity::High));
        assert_eq!(phishing_escalation(70), Some(Severity::High));
        assert_eq!(phishing_escalation(69), None);
        assert_eq!(phishing_escalation(0), None);
    }

    #[test]
    fn test_deepfake_thresholds() {
        assert_eq!(deepfake_escalation(true, 0.95), Some(Severity::Critical));
        assert_eq!(deepfake_escalation(true, 0.99), Some(Severity::Critical));
        assert_eq!(deepfake_escalation(true, 0.94), Some(Severity::High));
        assert_eq!(deepfake_escalation(true, 0.80), Some(Severity::High));
        assert_eq!(deepfake_escalation(true, 0.79), None);
        // A confident verdict of "not a deepfake" never escalates
        assert_eq!(deepfake_escalation(false, 0.99), None);
    }

    #[test]
    fn test_honeypot_gate() {
        assert!(honeypot_should_alert(HoneypotService::Ssh, Severity::High));
        assert!(honeypot_should_alert(HoneypotService::Ssh, Severity::Critical));
        assert!(!honeypot_should_alert(HoneypotService::Ssh, Severity::Medium));
        assert!(!honeypot_should_alert(HoneypotService::Ssh, Severity::Low));
        assert!(!honeypot_should_alert(HoneypotService::Http, Severity::Critical));
        assert!(!honeypot_should_alert(HoneypotService::Ftp, Severity::Critical));
    }
}
