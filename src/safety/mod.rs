//! Safety classification of user input and generated output.
//!
//! Two-tier substring scan: emergency indicators first (highest priority),
//! then restricted-request phrases, then PII patterns. Substring matching,
//! not NLP, is intentional: it is a conservative, auditable gate where
//! false positives cost a retry and false negatives cost far more. Any
//! internal failure blocks the request (fail closed).

pub mod types;

use std::sync::Arc;

use regex::Regex;

use crate::config::{SafetyConfig, SAFETY_CHECK_ERROR_RESPONSE};
use crate::store::DisclaimerStore;

pub use types::{SafetyError, SafetyVerdict};

/// Scans raw input and candidate output against the configured keyword
/// sets. Stateless per call; shared across requests without locking.
pub struct SafetyClassifier {
    config: Arc<SafetyConfig>,
    disclaimers: Arc<DisclaimerStore>,
    pii: Vec<Regex>,
}

impl SafetyClassifier {
    /// Build a classifier, compiling the configured PII patterns. Patterns
    /// that fail to compile are skipped with a warning rather than
    /// disabling the classifier.
    pub fn new(config: Arc<SafetyConfig>, disclaimers: Arc<DisclaimerStore>) -> Self {
        let pii = config
            .pii_patterns
            .iter()
            .filter_map(|source| match Regex::new(source) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    tracing::warn!(pattern = %source, error = %e, "Skipping PII pattern");
                    None
                }
            })
            .collect();

        Self {
            config,
            disclaimers,
            pii,
        }
    }

    /// Check a raw user question before it enters the pipeline. Empty and
    /// over-length inputs are rejected before any scanning.
    pub fn check_input(&self, text: &str) -> SafetyVerdict {
        if text.trim().is_empty() {
            return SafetyVerdict::blocked(crate::config::INVALID_INPUT_RESPONSE);
        }
        let length = text.chars().count();
        if length > self.config.max_input_chars {
            tracing::warn!(
                length,
                limit = self.config.max_input_chars,
                "Input exceeds length limit"
            );
            return SafetyVerdict::blocked(crate::config::INVALID_INPUT_RESPONSE);
        }
        self.fail_closed(self.scan(&text.to_lowercase()))
    }

    /// Check generated text before it reaches the user, the second line
    /// of defense against the generator producing disallowed content.
    ///
    /// Configured disclaimer texts are removed before scanning so the
    /// mandatory disclaimer (which itself mentions "medical advice") can
    /// never trip the restricted-phrase tier.
    pub fn check_output(&self, text: &str) -> SafetyVerdict {
        let mut scannable = text.to_lowercase();
        for disclaimer in self.disclaimers.texts() {
            let lower = disclaimer.to_lowercase();
            if !lower.is_empty() {
                scannable = scannable.replace(&lower, " ");
            }
        }
        self.fail_closed(self.scan(&scannable))
    }

    /// Two-tier substring scan plus PII regexes, over lowercased text.
    /// First configured pattern to match wins within each tier.
    fn scan(&self, lowercased: &str) -> Result<SafetyVerdict, SafetyError> {
        for pattern in &self.config.emergency_patterns {
            if lowercased.contains(&pattern.to_lowercase()) {
                tracing::warn!(pattern = %pattern, "Emergency content detected");
                return Ok(SafetyVerdict::blocked(&self.config.emergency_response));
            }
        }

        for phrase in &self.config.restricted_phrases {
            if lowercased.contains(&phrase.to_lowercase()) {
                tracing::warn!(phrase = %phrase, "Restricted content detected");
                return Ok(SafetyVerdict::blocked(&self.config.denial_response));
            }
        }

        for regex in &self.pii {
            if regex.is_match(lowercased) {
                tracing::warn!("PII detected in text");
                return Ok(SafetyVerdict::blocked(&self.config.privacy_response));
            }
        }

        Ok(SafetyVerdict::safe())
    }

    /// Convert an internal scan failure into a blocking verdict. Blocking
    /// on error is the contract: unchecked content must not pass.
    fn fail_closed(&self, result: Result<SafetyVerdict, SafetyError>) -> SafetyVerdict {
        match result {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::error!(error = %e, "Safety scan failed, blocking");
                SafetyVerdict::blocked(SAFETY_CHECK_ERROR_RESPONSE)
            }
        }
    }
}
