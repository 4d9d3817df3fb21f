//! Configuration module

use std::env;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Interval between periodic stats broadcasts
    pub stats_interval: Duration,

    /// Run the synthetic honeypot generators
    pub simulators_enabled: bool,

    /// Seconds between fabricated SSH attacks
    pub ssh_attack_interval: Duration,

    /// Seconds between fabricated HTTP attacks
    pub http_attack_interval: Duration,

    /// Seconds between fabricated FTP attacks
    pub ftp_attack_interval: Duration,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            stats_interval: Duration::from_secs(
                env::var("STATS_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),

            simulators_enabled: env::var("SIMULATORS_ENABLED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),

            ssh_attack_interval: Duration::from_secs(
                env::var("SSH_ATTACK_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(45),
            ),

            http_attack_interval: Duration::from_secs(
                env::var("HTTP_ATTACK_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),

            ftp_attack_interval: Duration::from_secs(
                env::var("FTP_ATTACK_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(90),
            ),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
