//! Phishing classifier collaborator
//!
//! The demo implementation scores emails with keyword and URL heuristics.
//! Deterministic for a given input, which keeps the correlation pipeline
//! testable end to end.

use once_cell::sync::Lazy;
use regex::Regex;

use super::CollabError;

/// Raw classifier output, before the store assigns identity
#[derive(Debug, Clone)]
pub struct PhishingVerdict {
    /// Phishing likelihood, 0-100
    pub score: u8,
    /// Classifier confidence, 0-100
    pub confidence: u8,
    pub suspicious_link_count: u32,
    pub indicators: Vec<String>,
}

pub trait PhishingClassifier: Send + Sync {
    fn analyze(&self, content: &str) -> Result<PhishingVerdict, CollabError>;
}

// ============================================================================
// HEURISTIC TABLES
// ============================================================================

/// Weighted phrases commonly seen in credential-phishing lures
const SUSPICIOUS_PHRASES: &[(&str, u8)] = &[
    ("verify your account", 18),
    ("confirm your identity", 16),
    ("your account has been suspended", 20),
    ("unusual activity", 12),
    ("click here", 10),
    ("act now", 12),
    ("urgent", 10),
    ("password", 8),
    ("wire transfer", 15),
    ("gift card", 15),
    ("invoice attached", 10),
    ("you have won", 20),
    ("limited time", 8),
    ("security alert", 10),
];

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s<>'\x22]+").unwrap());

static IP_HOST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").unwrap());

/// Link shorteners that hide the real destination
const SHORTENER_HOSTS: &[&str] = &["bit.ly", "tinyurl.com", "t.co", "goo.gl", "is.gd"];

// ============================================================================
// HEURISTIC CLASSIFIER
// ============================================================================

pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HeuristicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PhishingClassifier for HeuristicClassifier {
    fn analyze(&self, content: &str) -> Result<PhishingVerdict, CollabError> {
        let lowered = content.to_lowercase();
        let mut score: u32 = 0;
        let mut indicators = Vec::new();

        for (phrase, weight) in SUSPICIOUS_PHRASES {
            if lowered.contains(phrase) {
                score += u32::from(*weight);
                indicators.push(format!("Suspicious phrase: \"{}\"", phrase));
            }
        }

        let mut suspicious_links: u32 = 0;
        for url in URL_RE.find_iter(content) {
            let url = url.as_str();
            if IP_HOST_RE.is_match(url) {
                suspicious_links += 1;
                indicators.push(format!("Link with raw IP host: {}", url));
            } else if SHORTENER_HOSTS.iter().any(|h| url.contains(h)) {
                suspicious_links += 1;
                indicators.push(format!("Shortened link: {}", url));
            } else if url.starts_with("http://") {
                suspicious_links += 1;
                indicators.push(format!("Unencrypted link: {}", url));
            }
        }
        score += suspicious_links * 15;

        let exclamations = content.matches('!').count();
        if exclamations >= 3 {
            score += 8;
            indicators.push(format!("Excessive urgency punctuation ({}x '!')", exclamations));
        }

        let score = score.min(100) as u8;

        // Confidence tracks signal density: many independent hits or a
        // clean sheet are both easy calls, sparse middles are not.
        let signals = indicators.len();
        let confidence = if score >= 70 || score < 20 {
            (70 + signals * 5).min(95) as u8
        } else {
            (50 + signals * 5).min(80) as u8
        };

        Ok(PhishingVerdict {
            score,
            confidence,
            suspicious_link_count: suspicious_links,
            indicators,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benign_content_scores_low() {
        let verdict = HeuristicClassifier::new()
            .analyze("Hi team, meeting notes from today are in the shared drive.")
            .unwrap();
        assert!(verdict.score < 20, "got {}", verdict.score);
        assert_eq!(verdict.suspicious_link_count, 0);
        assert!(verdict.indicators.is_empty());
    }

    #[test]
    fn test_lure_content_scores_high() {
        let verdict = HeuristicClassifier::new()
            .analyze(
                "URGENT!!! Your account has been suspended. Click here to \
                 verify your account: http://192.168.10.4/login",
            )
            .unwrap();
        assert!(verdict.score >= 70, "got {}", verdict.score);
        assert!(verdict.suspicious_link_count >= 1);
        assert!(verdict.indicators.iter().any(|i| i.contains("raw IP host")));
    }

    #[test]
    fn test_shortener_counts_as_suspicious_link() {
        let verdict = HeuristicClassifier::new()
            .analyze("see https://bit.ly/3xyzabc")
            .unwrap();
        assert_eq!(verdict.suspicious_link_count, 1);
    }

    #[test]
    fn test_deterministic() {
        let c = HeuristicClassifier::new();
        let input = "act now! click here: http://10.0.0.1/x";
        let a = c.analyze(input).unwrap();
        let b = c.analyze(input).unwrap();
        assert_eq!(a.score, b.score);
        assert_eq!(a.indicators, b.indicators);
    }
}
