//! Deepfake detector collaborator
//!
//! There is no real media model behind this demo; the bundled detector
//! fabricates verdicts with `rand`. The correlation core only depends on
//! the trait, so tests substitute a fixed-verdict implementation.

use rand::seq::SliceRandom;
use rand::Rng;

use super::CollabError;
use crate::models::AnalyzeMediaRequest;

/// Raw detector output, before the store assigns identity
#[derive(Debug, Clone)]
pub struct DeepfakeVerdict {
    pub is_deepfake: bool,
    /// Detector confidence, 0.0-1.0
    pub confidence: f64,
    pub processing_time_ms: u64,
    pub anomalies: Vec<String>,
}

pub trait DeepfakeDetector: Send + Sync {
    fn analyze(&self, meta: &AnalyzeMediaRequest) -> Result<DeepfakeVerdict, CollabError>;
}

const ANOMALY_POOL: &[&str] = &[
    "Inconsistent eye blink cadence",
    "Temporal flicker around jawline",
    "Lighting mismatch between face and background",
    "Unnatural lip-sync offset",
    "Frequency artifacts in spectral analysis",
    "Irregular head pose transitions",
    "Blending seam at hairline",
];

/// Fraction of analyzed files flagged as deepfakes
const DETECTION_RATE: f64 = 0.35;

pub struct RandomizedDetector;

impl RandomizedDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomizedDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DeepfakeDetector for RandomizedDetector {
    fn analyze(&self, meta: &AnalyzeMediaRequest) -> Result<DeepfakeVerdict, CollabError> {
        let mut rng = rand::thread_rng();

        let is_deepfake = rng.gen_bool(DETECTION_RATE);
        let confidence = if is_deepfake {
            rng.gen_range(0.70..=0.99)
        } else {
            rng.gen_range(0.55..=0.92)
        };

        // Larger files take proportionally longer to "process"
        let base_ms = 600 + meta.file_size_bytes / 50_000;
        let processing_time_ms = base_ms + rng.gen_range(0..400);

        let anomalies = if is_deepfake {
            let count = rng.gen_range(2..=4);
            ANOMALY_POOL
                .choose_multiple(&mut rng, count)
                .map(|s| s.to_string())
                .collect()
        } else {
            Vec::new()
        };

        Ok(DeepfakeVerdict {
            is_deepfake,
            confidence,
            processing_time_ms,
            anomalies,
        })
    }
}
