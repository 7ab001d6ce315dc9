//! Safety configuration: keyword sets, canned responses, and PII patterns.
//!
//! The built-in defaults are the shipping configuration; a JSON file can
//! override any subset of fields. Loading never fails to the caller — a
//! missing or corrupt file logs a warning and falls back to the defaults;
//! the safety gate must exist even when its config file does not.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Canned message for empty or malformed input.
pub const INVALID_INPUT_RESPONSE: &str = "Invalid input received.";

/// Canned message when the safety scan itself fails. The classifier fails
/// closed: an internal error blocks the request rather than passing
/// unchecked content through.
pub const SAFETY_CHECK_ERROR_RESPONSE: &str =
    "An error occurred during the safety check. Please try again.";

/// Fallback when the generator produced nothing usable.
pub const EMPTY_RESPONSE_FALLBACK: &str = "Error generating response.";

const DEFAULT_EMERGENCY_PATTERNS: &[&str] = &[
    "heart attack",
    "stroke",
    "suicide",
    "emergency",
    "bleeding",
    "unconscious",
    "not breathing",
    "overdose",
];

const DEFAULT_RESTRICTED_PHRASES: &[&str] = &[
    "prescribe",
    "diagnosis",
    "treatment plan",
    "medical advice",
    "illegal drugs",
];

const DEFAULT_EMERGENCY_RESPONSE: &str =
    "EMERGENCY: This appears to be a medical emergency. Please call emergency \
     services (911 in the US) immediately or go to the nearest emergency room.";

const DEFAULT_DENIAL_RESPONSE: &str =
    "I cannot provide specific medical advice, diagnoses, or prescriptions. \
     Please consult a qualified healthcare professional for personalized \
     medical guidance.";

const DEFAULT_PRIVACY_RESPONSE: &str =
    "For privacy and security reasons, please don't share personal identifying \
     information such as phone numbers, emails, or ID numbers.";

/// PII regex sources: phone numbers, email addresses, SSN-shaped numbers.
const DEFAULT_PII_PATTERNS: &[&str] = &[
    r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",
    r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
    r"\b\d{3}-?\d{2}-?\d{4}\b",
];

/// Maximum accepted input length in characters.
const DEFAULT_MAX_INPUT_CHARS: usize = 2_000;

/// Keyword sets and canned responses driving the safety classifier.
///
/// Emergency patterns and restricted phrases are matched as case-insensitive
/// raw substrings, deliberately broad: in this domain a false positive costs
/// a retry, a false negative costs much more.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Substrings indicating a potential medical emergency.
    pub emergency_patterns: Vec<String>,
    /// Substrings indicating a request for diagnosis/prescription.
    pub restricted_phrases: Vec<String>,
    /// Message returned for any emergency match.
    pub emergency_response: String,
    /// Message returned for any restricted-request match.
    pub denial_response: String,
    /// Message returned when the input carries PII.
    pub privacy_response: String,
    /// Regex sources for PII detection (compiled by the classifier).
    pub pii_patterns: Vec<String>,
    /// Maximum accepted input length in characters.
    pub max_input_chars: usize,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            emergency_patterns: to_strings(DEFAULT_EMERGENCY_PATTERNS),
            restricted_phrases: to_strings(DEFAULT_RESTRICTED_PHRASES),
            emergency_response: DEFAULT_EMERGENCY_RESPONSE.to_string(),
            denial_response: DEFAULT_DENIAL_RESPONSE.to_string(),
            privacy_response: DEFAULT_PRIVACY_RESPONSE.to_string(),
            pii_patterns: to_strings(DEFAULT_PII_PATTERNS),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

impl SafetyConfig {
    /// Load configuration from a JSON file, falling back to defaults when
    /// the file is missing or unreadable.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Safety config not found, using built-in defaults"
                );
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Safety configuration loaded");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Safety config unparseable, using built-in defaults"
                );
                Self::default()
            }
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
