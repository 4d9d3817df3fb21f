//! In-memory event store
//!
//! Append-only typed tables plus the stats singleton, all behind one lock.
//! Writers serialize through the write half; readers share the read half
//! and always receive cloned snapshots, so callers can never mutate stored
//! state through a returned record.

use chrono::Utc;
use parking_lot::RwLock;

use crate::models::{
    Alert, AlertCounts, DeepfakeAnalysis, HoneypotAttack, HoneypotService, HoneypotStats,
    NewAlert, NewDeepfakeAnalysis, NewHoneypotAttack, NewPhishingAnalysis, NewThreat,
    PhishingAnalysis, SystemStats, Threat, ThreatStatus,
};

/// Which escalation counter pair a derived threat/alert bumps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationKind {
    Phishing,
    Deepfake,
}

/// Append-only table with a per-type monotonic id counter.
///
/// Rows stay in insertion order. Ids and insertion timestamps are both
/// monotone, so the newest-first contract (created_at desc, id desc on
/// ties) is exactly the reverse walk.
struct Table<T> {
    rows: Vec<T>,
    next_id: u64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self { rows: Vec::new(), next_id: 1 }
    }

    fn assign_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn push(&mut self, row: T) {
        self.rows.push(row);
    }

    fn newest_first<F>(&self, filter: F, limit: usize, offset: usize) -> Vec<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows
            .iter()
            .rev()
            .filter(|row| filter(row))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect()
    }

    fn find<F>(&self, pred: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows.iter().find(|row| pred(row)).cloned()
    }
}

struct StoreState {
    phishing: Table<PhishingAnalysis>,
    deepfakes: Table<DeepfakeAnalysis>,
    attacks: Table<HoneypotAttack>,
    threats: Table<Threat>,
    alerts: Table<Alert>,
    stats: SystemStats,
}

impl StoreState {
    fn new() -> Self {
        Self {
            phishing: Table::new(),
            deepfakes: Table::new(),
            attacks: Table::new(),
            threats: Table::new(),
            alerts: Table::new(),
            stats: SystemStats::new(),
        }
    }
}

/// The in-memory event store. One instance per process, shared via `Arc`.
pub struct EventStore {
    state: RwLock<StoreState>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::new()),
        }
    }

    // ------------------------------------------------------------------
    // Inserts
    // ------------------------------------------------------------------

    /// Store a phishing analysis. Stored regardless of score; escalation
    /// is the correlator's call.
    pub fn insert_phishing(&self, new: NewPhishingAnalysis) -> PhishingAnalysis {
        let mut state = self.state.write();
        let record = PhishingAnalysis {
            id: state.phishing.assign_id(),
            content: new.content,
            score: new.score,
            confidence: new.confidence,
            suspicious_link_count: new.suspicious_link_count,
            indicators: new.indicators,
            created_at: Utc::now(),
        };
        state.phishing.push(record.clone());
        record
    }

    pub fn insert_deepfake(&self, new: NewDeepfakeAnalysis) -> DeepfakeAnalysis {
        let mut state = self.state.write();
        let record = DeepfakeAnalysis {
            id: state.deepfakes.assign_id(),
            file_name: new.file_name,
            file_type: new.file_type,
            file_size_bytes: new.file_size_bytes,
            is_deepfake: new.is_deepfake,
            confidence: new.confidence,
            processing_time_ms: new.processing_time_ms,
            anomalies: new.anomalies,
            created_at: Utc::now(),
        };
        state.deepfakes.push(record.clone());
        record
    }

    /// Store an attack log entry and bump `honeypot_hits` in the same
    /// critical section, so the counter always equals the row count.
    pub fn insert_attack(&self, new: NewHoneypotAttack) -> HoneypotAttack {
        let mut state = self.state.write();
        let record = HoneypotAttack {
            id: state.attacks.assign_id(),
            service: new.service,
            source_ip: new.source_ip,
            attack_type: new.attack_type,
            severity: new.severity,
            port: new.port,
            payload: new.payload,
            location: new.location,
            created_at: Utc::now(),
        };
        state.attacks.push(record.clone());
        state.stats.honeypot_hits += 1;
        state.stats.updated_at = record.created_at;
        record
    }

    /// Create the threat + alert pair for an escalated analysis and bump
    /// the matching counters, all under one write lock.
    pub fn escalate(
        &self,
        new_threat: NewThreat,
        new_alert: NewAlert,
        kind: EscalationKind,
    ) -> (Threat, Alert) {
        let mut state = self.state.write();
        let now = Utc::now();

        let threat = Threat {
            id: state.threats.assign_id(),
            threat_type: new_threat.threat_type,
            severity: new_threat.severity,
            source: new_threat.source,
            description: new_threat.description,
            metadata: new_threat.metadata,
            status: ThreatStatus::Active,
            detected_at: now,
        };
        state.threats.push(threat.clone());

        let alert = Alert {
            id: state.alerts.assign_id(),
            title: new_alert.title,
            description: new_alert.description,
            severity: new_alert.severity,
            category: new_alert.category,
            is_read: false,
            metadata: new_alert.metadata,
            created_at: now,
        };
        state.alerts.push(alert.clone());

        match kind {
            EscalationKind::Phishing => state.stats.phishing_blocked += 1,
            EscalationKind::Deepfake => state.stats.deepfakes_detected += 1,
        }
        state.stats.active_threats += 1;
        state.stats.updated_at = now;

        (threat, alert)
    }

    /// Store a standalone alert (honeypot escalations carry no threat record)
    pub fn insert_alert(&self, new: NewAlert) -> Alert {
        let mut state = self.state.write();
        let alert = Alert {
            id: state.alerts.assign_id(),
            title: new.title,
            description: new.description,
            severity: new.severity,
            category: new.category,
            is_read: false,
            metadata: new.metadata,
            created_at: Utc::now(),
        };
        state.alerts.push(alert.clone());
        alert
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn list_phishing(&self, limit: usize, offset: usize) -> Vec<PhishingAnalysis> {
        self.state.read().phishing.newest_first(|_| true, limit, offset)
    }

    pub fn list_deepfakes(&self, limit: usize, offset: usize) -> Vec<DeepfakeAnalysis> {
        self.state.read().deepfakes.newest_first(|_| true, limit, offset)
    }

    pub fn list_attacks(
        &self,
        service: Option<HoneypotService>,
        limit: usize,
        offset: usize,
    ) -> Vec<HoneypotAttack> {
        self.state.read().attacks.newest_first(
            |a| service.map_or(true, |s| a.service == s),
            limit,
            offset,
        )
    }

    pub fn list_threats(&self, limit: usize, offset: usize) -> Vec<Threat> {
        self.state.read().threats.newest_first(|_| true, limit, offset)
    }

    pub fn list_alerts(&self, unread_only: bool, limit: usize, offset: usize) -> Vec<Alert> {
        self.state.read().alerts.newest_first(
            |a| !unread_only || !a.is_read,
            limit,
            offset,
        )
    }

    pub fn get_phishing(&self, id: u64) -> Option<PhishingAnalysis> {
        self.state.read().phishing.find(|a| a.id == id)
    }

    pub fn get_deepfake(&self, id: u64) -> Option<DeepfakeAnalysis> {
        self.state.read().deepfakes.find(|a| a.id == id)
    }

    pub fn get_attack(&self, id: u64) -> Option<HoneypotAttack> {
        self.state.read().attacks.find(|a| a.id == id)
    }

    pub fn get_threat(&self, id: u64) -> Option<Threat> {
        self.state.read().threats.find(|t| t.id == id)
    }

    pub fn get_alert(&self, id: u64) -> Option<Alert> {
        self.state.read().alerts.find(|a| a.id == id)
    }

    pub fn alert_counts(&self) -> AlertCounts {
        let state = self.state.read();
        AlertCounts {
            total: state.alerts.rows.len(),
            unread: state.alerts.rows.iter().filter(|a| !a.is_read).count(),
        }
    }

    pub fn stats(&self) -> SystemStats {
        self.state.read().stats.clone()
    }

    pub fn honeypot_stats(&self) -> HoneypotStats {
        let state = self.state.read();
        let count = |svc: HoneypotService| {
            state.attacks.rows.iter().filter(|a| a.service == svc).count()
        };
        HoneypotStats {
            total: state.attacks.rows.len(),
            ssh: count(HoneypotService::Ssh),
            http: count(HoneypotService::Http),
            ftp: count(HoneypotService::Ftp),
        }
    }

    // ------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------

    /// Flip an alert's read flag to true. Idempotent; `None` when the id
    /// does not exist.
    pub fn mark_alert_read(&self, id: u64) -> Option<Alert> {
        let mut state = self.state.write();
        let alert = state.alerts.rows.iter_mut().find(|a| a.id == id)?;
        alert.is_read = true;
        Some(alert.clone())
    }

    /// Mark every alert read; returns how many flags actually flipped.
    pub fn mark_all_alerts_read(&self) -> usize {
        let mut state = self.state.write();
        let mut flipped = 0;
        for alert in state.alerts.rows.iter_mut() {
            if !alert.is_read {
                alert.is_read = true;
                flipped += 1;
            }
        }
        flipped
    }
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertCategory, Severity};

    fn attack(service: HoneypotService, severity: Severity) -> NewHoneypotAttack {
        NewHoneypotAttack {
            service,
            source_ip: "203.0.113.7".to_string(),
            attack_type: "brute_force".to_string(),
            severity,
            port: service.default_port(),
            payload: None,
            location: None,
        }
    }

    #[test]
    fn test_ids_are_monotonic_per_type() {
        let store = EventStore::new();
        let a = store.insert_attack(attack(HoneypotService::Ssh, Severity::Low));
        let b = store.insert_attack(attack(HoneypotService::Http, Severity::Low));
        let alert = store.insert_alert(NewAlert {
            title: "t".into(),
            description: "d".into(),
            severity: Severity::High,
            category: AlertCategory::System,
            metadata: serde_json::json!({}),
        });

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        // Alert counter is independent of the attack counter
        assert_eq!(alert.id, 1);
    }

    #[test]
    fn test_list_is_newest_first() {
        let store = EventStore::new();
        for _ in 0..5 {
            store.insert_attack(attack(HoneypotService::Ssh, Severity::Low));
        }
        let listed = store.list_attacks(None, 10, 0);
        let ids: Vec<u64> = listed.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_list_filter_limit_offset() {
        let store = EventStore::new();
        store.insert_attack(attack(HoneypotService::Ssh, Severity::Low));
        store.insert_attack(attack(HoneypotService::Http, Severity::Low));
        store.insert_attack(attack(HoneypotService::Ssh, Severity::Low));
        store.insert_attack(attack(HoneypotService::Ssh, Severity::Low));

        let ssh = store.list_attacks(Some(HoneypotService::Ssh), 2, 1);
        assert_eq!(ssh.len(), 2);
        assert!(ssh.iter().all(|a| a.service == HoneypotService::Ssh));
        // Offset skipped the newest ssh row (id 4)
        assert_eq!(ssh[0].id, 3);
    }

    #[test]
    fn test_empty_store_reads() {
        let store = EventStore::new();
        assert!(store.list_alerts(false, 10, 0).is_empty());
        assert!(store.get_alert(1).is_none());
        assert_eq!(store.honeypot_stats().total, 0);
    }

    #[test]
    fn test_attack_insert_bumps_honeypot_hits() {
        let store = EventStore::new();
        store.insert_attack(attack(HoneypotService::Ftp, Severity::Medium));
        store.insert_attack(attack(HoneypotService::Ssh, Severity::High));

        let stats = store.stats();
        assert_eq!(stats.honeypot_hits, 2);
        let hp = store.honeypot_stats();
        assert_eq!((hp.total, hp.ssh, hp.ftp, hp.http), (2, 1, 1, 0));
    }

    #[test]
    fn test_escalate_bumps_counters_and_links_records() {
        let store = EventStore::new();
        let analysis = store.insert_phishing(NewPhishingAnalysis {
            content: "click here".into(),
            score: 95,
            confidence: 88,
            suspicious_link_count: 2,
            indicators: vec!["urgency language".into()],
        });

        let (threat, alert) = store.escalate(
            NewThreat {
                threat_type: "phishing".into(),
                severity: Severity::Critical,
                source: "email-analyzer".into(),
                description: "High-confidence phishing email".into(),
                metadata: serde_json::json!({ "analysis_id": analysis.id }),
            },
            NewAlert {
                title: "Phishing email blocked".into(),
                description: "Score 95/100".into(),
                severity: Severity::Critical,
                category: AlertCategory::Email,
                metadata: serde_json::json!({ "analysis_id": analysis.id }),
            },
            EscalationKind::Phishing,
        );

        let stats = store.stats();
        assert_eq!(stats.phishing_blocked, 1);
        assert_eq!(stats.active_threats, 1);
        assert_eq!(stats.deepfakes_detected, 0);

        // Alert metadata references an id that already exists
        let referenced = alert.metadata["analysis_id"].as_u64().unwrap();
        assert!(store.get_phishing(referenced).is_some());
        assert_eq!(threat.status, ThreatStatus::Active);
    }

    #[test]
    fn test_mark_alert_read_is_idempotent() {
        let store = EventStore::new();
        let alert = store.insert_alert(NewAlert {
            title: "t".into(),
            description: "d".into(),
            severity: Severity::High,
            category: AlertCategory::Honeypot,
            metadata: serde_json::json!({}),
        });

        let first = store.mark_alert_read(alert.id).unwrap();
        assert!(first.is_read);
        let second = store.mark_alert_read(alert.id).unwrap();
        assert!(second.is_read);
        assert!(store.mark_alert_read(999).is_none());
    }

    #[test]
    fn test_mark_all_alerts_read_counts_flips() {
        let store = EventStore::new();
        for _ in 0..3 {
            store.insert_alert(NewAlert {
                title: "t".into(),
                description: "d".into(),
                severity: Severity::Low,
                category: AlertCategory::System,
                metadata: serde_json::json!({}),
            });
        }
        store.mark_alert_read(1);

        assert_eq!(store.mark_all_alerts_read(), 2);
        assert_eq!(store.alert_counts().unread, 0);
        // Second pass has nothing left to flip
        assert_eq!(store.mark_all_alerts_read(), 0);
    }

    #[test]
    fn test_reads_are_snapshots() {
        let store = EventStore::new();
        let inserted = store.insert_attack(attack(HoneypotService::Ssh, Severity::High));
        let mut listed = store.list_attacks(None, 1, 0);
        listed[0].source_ip = "tampered".to_string();

        let again = store.get_attack(inserted.id).unwrap();
        assert_eq!(again.source_ip, "203.0.113.7");
        assert_eq!(again.created_at, inserted.created_at);
    }
}
