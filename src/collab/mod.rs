//! External collaborators
//!
//! The correlation core talks to classification, geolocation, and mail
//! delivery through these traits. The bundled implementations are demo
//! stand-ins (keyword heuristics, randomized verdicts, a static IP table,
//! a logging mailer); swapping in real services is a matter of new impls.

pub mod phishing;
pub mod deepfake;
pub mod geoip;
pub mod mailer;

pub use phishing::{HeuristicClassifier, PhishingClassifier, PhishingVerdict};
pub use deepfake::{DeepfakeDetector, DeepfakeVerdict, RandomizedDetector};
pub use geoip::{GeoLocator, StaticGeoLocator};
pub use mailer::{AlertMailer, LogMailer};

/// Failure of an external collaborator. The correlator maps this to a
/// degraded result or a structured error, never a crash.
#[derive(Debug, thiserror::Error)]
pub enum CollabError {
    #[error("classifier failure: {0}")]
    Classifier(String),

    #[error("delivery failure: {0}")]
    Delivery(String),
}
