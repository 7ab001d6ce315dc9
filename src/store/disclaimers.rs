//! Medical disclaimers (`medical_disclaimers.json`).
//!
//! Keyed disclaimer texts selected by response content: symptom-flavored
//! responses get the symptoms disclaimer, medication-flavored ones the
//! medications disclaimer, everything else the default. The default text is
//! always present even when the file is missing.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// The disclaimer every response falls back to.
pub const DEFAULT_DISCLAIMER: &str =
    "Disclaimer: This information is for educational purposes only. \
     Please consult a healthcare professional for medical advice.";

static SYMPTOM_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(symptom|condition|disease)s?\b").expect("valid regex")
});

static MEDICATION_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(medication|drug|medicine)s?\b").expect("valid regex")
});

/// Keyed disclaimer texts with a guaranteed `default` entry.
pub struct DisclaimerStore {
    disclaimers: HashMap<String, String>,
}

impl Default for DisclaimerStore {
    fn default() -> Self {
        Self {
            disclaimers: HashMap::from([("default".to_string(), DEFAULT_DISCLAIMER.to_string())]),
        }
    }
}

impl DisclaimerStore {
    /// Load from a JSON object file (`{"default": "...", "symptoms": "..."}`).
    /// A missing or unparseable file keeps only the built-in default.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Disclaimer file not found, using built-in default"
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<HashMap<String, String>>(&json) {
            Ok(map) => Self::from_map(map),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Disclaimer file unparseable, using built-in default"
                );
                Self::default()
            }
        }
    }

    /// Build a store from an in-memory map; the built-in default text is
    /// inserted when the map carries no `default` key.
    pub fn from_map(map: HashMap<String, String>) -> Self {
        let mut disclaimers = map;
        disclaimers
            .entry("default".to_string())
            .or_insert_with(|| DEFAULT_DISCLAIMER.to_string());
        Self { disclaimers }
    }

    /// The fallback disclaimer text.
    pub fn default_text(&self) -> &str {
        self.disclaimers
            .get("default")
            .map(String::as_str)
            .unwrap_or(DEFAULT_DISCLAIMER)
    }

    /// Pick the disclaimer matching the response content.
    pub fn select(&self, text: &str) -> &str {
        let key = if SYMPTOM_CONTENT.is_match(text) {
            "symptoms"
        } else if MEDICATION_CONTENT.is_match(text) {
            "medications"
        } else {
            "default"
        };

        self.disclaimers
            .get(key)
            .map(String::as_str)
            .unwrap_or_else(|| self.default_text())
    }

    /// Iterate all disclaimer texts (the output check strips these before
    /// scanning, so a mandated disclaimer can never trip the scanner).
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.disclaimers.values().map(String::as_str)
    }
}
