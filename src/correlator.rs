//! Event correlation pipeline
//!
//! Takes a raw detection/attack event and runs the fixed side-effect
//! sequence: store the event, apply the threshold policy, create derived
//! threat/alert records and bump the stats counters, fire external
//! notification, then broadcast. Stats always reflect the stored event
//! before any broadcast goes out, so a subscriber re-querying stats right
//! after a push sees consistent data.

use std::sync::Arc;

use validator::Validate;

use crate::collab::{AlertMailer, DeepfakeDetector, GeoLocator, PhishingClassifier};
use crate::error::{AppError, AppResult};
use crate::models::{
    Alert, AlertCategory, AnalyzeEmailResponse, AnalyzeMediaRequest, AnalyzeMediaResponse,
    HoneypotAttack, NewAlert, NewDeepfakeAnalysis, NewHoneypotAttack, NewPhishingAnalysis,
    NewThreat, SubmitAttackRequest, SubmitAttackResponse,
};
use crate::notifier::{Envelope, Notifier};
use crate::policy;
use crate::store::{EscalationKind, EventStore};

pub struct Correlator {
    store: Arc<EventStore>,
    notifier: Arc<Notifier>,
    phishing: Arc<dyn PhishingClassifier>,
    deepfake: Arc<dyn DeepfakeDetector>,
    geo: Arc<dyn GeoLocator>,
    mailer: Arc<dyn AlertMailer>,
}

impl Correlator {
    pub fn new(
        store: Arc<EventStore>,
        notifier: Arc<Notifier>,
        phishing: Arc<dyn PhishingClassifier>,
        deepfake: Arc<dyn DeepfakeDetector>,
        geo: Arc<dyn GeoLocator>,
        mailer: Arc<dyn AlertMailer>,
    ) -> Self {
        Self {
            store,
            notifier,
            phishing,
            deepfake,
            geo,
            mailer,
        }
    }

    /// Analyze and store a phishing email. A classifier failure aborts the
    /// submission before anything is written; low scores store the
    /// analysis without escalating.
    pub fn submit_phishing_analysis(&self, content: &str) -> AppResult<AnalyzeEmailResponse> {
        if content.trim().is_empty() {
            return Err(AppError::InvalidInput("content must not be empty".to_string()));
        }

        let verdict = self
            .phishing
            .analyze(content)
            .map_err(|e| AppError::ExternalService(e.to_string()))?;

        let analysis = self.store.insert_phishing(NewPhishingAnalysis {
            content: content.to_string(),
            score: verdict.score,
            confidence: verdict.confidence,
            suspicious_link_count: verdict.suspicious_link_count,
            indicators: verdict.indicators,
        });

        let escalated = match policy::phishing_escalation(analysis.score) {
            Some(severity) => {
                let metadata = serde_json::json!({
                    "analysis_id": analysis.id,
                    "score": analysis.score,
                    "suspicious_link_count": analysis.suspicious_link_count,
                });

                let (_threat, alert) = self.store.escalate(
                    NewThreat {
                        threat_type: "phishing".to_string(),
                        severity,
                        source: "email-analyzer".to_string(),
                        description: format!(
                            "Phishing email scored {}/100 with {} suspicious link(s)",
                            analysis.score, analysis.suspicious_link_count
                        ),
                        metadata: metadata.clone(),
                    },
                    NewAlert {
                        title: "Phishing email blocked".to_string(),
                        description: format!(
                            "Email content scored {}/100 ({}% confidence)",
                            analysis.score, analysis.confidence
                        ),
                        severity,
                        category: AlertCategory::Email,
                        metadata,
                    },
                    EscalationKind::Phishing,
                );

                tracing::info!(
                    analysis_id = analysis.id,
                    score = analysis.score,
                    severity = %severity,
                    "Phishing analysis escalated"
                );
                self.notifier.broadcast(&Envelope::NewAlert(alert));
                true
            }
            None => false,
        };

        Ok(AnalyzeEmailResponse { analysis, escalated })
    }

    /// Run the deepfake detector over file metadata and store the verdict.
    pub fn submit_deepfake_analysis(
        &self,
        req: AnalyzeMediaRequest,
    ) -> AppResult<AnalyzeMediaResponse> {
        req.validate()?;

        let verdict = self
            .deepfake
            .analyze(&req)
            .map_err(|e| AppError::ExternalService(e.to_string()))?;

        let analysis = self.store.insert_deepfake(NewDeepfakeAnalysis {
            file_name: req.file_name,
            file_type: req.file_type,
            file_size_bytes: req.file_size_bytes,
            is_deepfake: verdict.is_deepfake,
            confidence: verdict.confidence,
            processing_time_ms: verdict.processing_time_ms,
            anomalies: verdict.anomalies,
        });

        let escalation = policy::deepfake_escalation(analysis.is_deepfake, analysis.confidence);
        let escalated = match escalation {
            Some(severity) => {
                let metadata = serde_json::json!({
                    "analysis_id": analysis.id,
                    "file_name": analysis.file_name,
                    "confidence": analysis.confidence,
                });

                let (_threat, alert) = self.store.escalate(
                    NewThreat {
                        threat_type: "deepfake".to_string(),
                        severity,
                        source: "media-analyzer".to_string(),
                        description: format!(
                            "Deepfake detected in {} at {:.0}% confidence",
                            analysis.file_name,
                            analysis.confidence * 100.0
                        ),
                        metadata: metadata.clone(),
                    },
                    NewAlert {
                        title: "Deepfake media detected".to_string(),
                        description: format!(
                            "{} flagged with {} anomaly indicator(s)",
                            analysis.file_name,
                            analysis.anomalies.len()
                        ),
                        severity,
                        category: AlertCategory::Media,
                        metadata,
                    },
                    EscalationKind::Deepfake,
                );

                tracing::info!(
                    analysis_id = analysis.id,
                    confidence = analysis.confidence,
                    severity = %severity,
                    "Deepfake analysis escalated"
                );
                self.notifier.broadcast(&Envelope::NewAlert(alert));
                true
            }
            None => false,
        };

        Ok(AnalyzeMediaResponse { analysis, escalated })
    }

    /// Store a honeypot attack. The hit counter moves for every attack;
    /// only high/critical SSH attacks additionally raise an alert and an
    /// email attempt. The raw attack is pushed to viewers either way.
    pub fn submit_honeypot_attack(
        &self,
        req: SubmitAttackRequest,
    ) -> AppResult<SubmitAttackResponse> {
        req.validate()?;

        // Geolocation runs before the locked insert and degrades to None
        let location = self.geo.locate(&req.source_ip);

        let port = req.port.unwrap_or_else(|| req.service.default_port());
        let log = self.store.insert_attack(NewHoneypotAttack {
            service: req.service,
            source_ip: req.source_ip,
            attack_type: req.attack_type,
            severity: req.severity,
            port,
            payload: req.payload,
            location,
        });

        let alert = if policy::honeypot_should_alert(log.service, log.severity) {
            let alert = self.store.insert_alert(NewAlert {
                title: format!("{} honeypot under attack", log.service.as_str().to_uppercase()),
                description: format!(
                    "{} attack from {} on port {}",
                    log.attack_type, log.source_ip, log.port
                ),
                severity: log.severity,
                category: AlertCategory::Honeypot,
                metadata: serde_json::json!({
                    "attack_id": log.id,
                    "service": log.service,
                    "source_ip": log.source_ip,
                }),
            });

            tracing::warn!(
                attack_id = log.id,
                source_ip = %log.source_ip,
                severity = %log.severity,
                "Honeypot attack escalated to alert"
            );
            self.dispatch_email(log.clone(), alert.clone());
            Some(alert)
        } else {
            None
        };

        self.notifier.broadcast(&Envelope::HoneypotAttack(log.clone()));
        let alert_created = match alert {
            Some(alert) => {
                self.notifier.broadcast(&Envelope::NewAlert(alert));
                true
            }
            None => false,
        };

        Ok(SubmitAttackResponse { log, alert_created })
    }

    /// Fire the email collaborator without tying ingestion to its latency.
    /// Failure is logged and never propagated. Outside a runtime the
    /// bounded attempt runs inline.
    fn dispatch_email(&self, attack: HoneypotAttack, alert: Alert) {
        let mailer = Arc::clone(&self.mailer);
        let send = move || {
            if !mailer.send_attack_alert(&attack, &alert) {
                tracing::warn!(
                    attack_id = attack.id,
                    "Email alert delivery failed, continuing"
                );
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(send);
            }
            Err(_) => send(),
        }
    }
}
