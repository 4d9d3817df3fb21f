//! Synthetic honeypot generators
//!
//! Timer-driven producers that fabricate plausible attack traffic per
//! service and push it through the correlator's inbound surface exactly
//! like an API caller would. Purely for demo data; the correlation
//! pipeline cannot tell these from real submissions.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Config;
use crate::correlator::Correlator;
use crate::models::{HoneypotService, Severity, SubmitAttackRequest};
use crate::tasks::PeriodicTask;

const SSH_ATTACK_TYPES: &[&str] = &["brute_force", "credential_stuffing", "key_scan"];
const HTTP_ATTACK_TYPES: &[&str] = &["sql_injection", "xss_probe", "path_traversal", "scanner_sweep"];
const FTP_ATTACK_TYPES: &[&str] = &["anonymous_login", "brute_force", "directory_probe"];

const SSH_PAYLOADS: &[&str] = &[
    "root:123456",
    "admin:admin",
    "ubuntu:ubuntu",
    "root:toor",
];
const HTTP_PAYLOADS: &[&str] = &[
    "GET /admin.php?id=1' OR '1'='1",
    "GET /../../etc/passwd",
    "POST /login <script>alert(1)</script>",
    "GET /wp-login.php",
];
const FTP_PAYLOADS: &[&str] = &[
    "USER anonymous",
    "LIST /",
    "RETR passwd",
];

/// Source prefixes the static geolocator knows about
const SOURCE_PREFIXES: &[&str] = &["203.0.113.", "198.51.100.", "192.0.2.", "185.220.101."];

/// Weighted severity draw: mostly noise, occasionally alert-worthy
fn random_severity<R: Rng>(rng: &mut R) -> Severity {
    match rng.gen_range(0..100) {
        0..=39 => Severity::Low,
        40..=69 => Severity::Medium,
        70..=89 => Severity::High,
        _ => Severity::Critical,
    }
}

/// Fabricate one plausible attack against the given service
pub fn fabricate_attack(service: HoneypotService) -> SubmitAttackRequest {
    let mut rng = rand::thread_rng();

    let (types, payloads) = match service {
        HoneypotService::Ssh => (SSH_ATTACK_TYPES, SSH_PAYLOADS),
        HoneypotService::Http => (HTTP_ATTACK_TYPES, HTTP_PAYLOADS),
        HoneypotService::Ftp => (FTP_ATTACK_TYPES, FTP_PAYLOADS),
    };

    let prefix = SOURCE_PREFIXES.choose(&mut rng).unwrap();
    let source_ip = format!("{}{}", prefix, rng.gen_range(1..255));
    let payload = if rng.gen_bool(0.7) {
        payloads.choose(&mut rng).map(|p| p.to_string())
    } else {
        None
    };

    SubmitAttackRequest {
        service,
        source_ip,
        attack_type: types.choose(&mut rng).unwrap().to_string(),
        severity: random_severity(&mut rng),
        port: Some(service.default_port()),
        payload,
    }
}

/// The running generator set; dropping it cancels all pending timers.
pub struct SimulatorSet {
    tasks: Vec<PeriodicTask>,
}

impl SimulatorSet {
    /// Stop every generator. Idempotent.
    pub fn stop(&self) {
        for task in &self.tasks {
            task.stop();
        }
    }
}

/// Start one generator per honeypot service at its configured interval.
pub fn start(correlator: Arc<Correlator>, config: &Config) -> SimulatorSet {
    let services = [
        (HoneypotService::Ssh, "ssh-simulator", config.ssh_attack_interval),
        (HoneypotService::Http, "http-simulator", config.http_attack_interval),
        (HoneypotService::Ftp, "ftp-simulator", config.ftp_attack_interval),
    ];

    let tasks = services
        .into_iter()
        .map(|(service, name, period)| {
            let correlator = Arc::clone(&correlator);
            PeriodicTask::spawn(name, period, move || {
                let attack = fabricate_attack(service);
                if let Err(e) = correlator.submit_honeypot_attack(attack) {
                    tracing::warn!(service = %service, "Simulated attack rejected: {}", e);
                }
            })
        })
        .collect();

    tracing::info!("Honeypot simulators running (ssh/http/ftp)");
    SimulatorSet { tasks }
}
