//! Response validation and sanitization.
//!
//! Everything the generator produces passes through here before the output
//! safety check: markup stripping, PII redaction, terminology softening,
//! and mandatory disclaimer injection.
//! The invariant: no path returns medical content without a disclaimer.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{SafetyConfig, EMPTY_RESPONSE_FALLBACK};
use crate::store::DisclaimerStore;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("valid regex"));

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

static DOCTOR_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdoctors?\b").expect("valid regex"));

static PRESCRIPTION_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bprescriptions?\b").expect("valid regex"));

/// Marker for redacted PII.
const PII_MARKER: &str = "[REDACTED]";

/// Case-insensitive markers whose presence means a disclaimer already exists.
const DISCLAIMER_MARKERS: &[&str] = &["disclaimer", "educational purposes"];

/// Sanitizes generated text and guarantees disclaimer presence.
///
/// Restricted-phrase handling deliberately does NOT happen here: the output
/// safety check runs after sanitization and replaces the whole response,
/// which is a stronger guarantee than in-place redaction.
pub struct ResponseValidator {
    disclaimers: Arc<DisclaimerStore>,
    pii: Vec<Regex>,
}

impl ResponseValidator {
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

        Self { disclaimers, pii }
    }

    /// Sanitize generated text. Total: every input yields a usable,
    /// disclaimer-bearing string; empty input yields the fixed fallback.
    pub fn sanitize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return EMPTY_RESPONSE_FALLBACK.to_string();
        }

        let text = self.strip_markup(text);
        let text = self.redact_pii(&text);
        let text = soften_terminology(&text);
        self.ensure_disclaimer(&text)
    }

    /// Remove `<script>` blocks entirely, then any remaining tags.
    fn strip_markup(&self, text: &str) -> String {
        let text = SCRIPT_BLOCK.replace_all(text, "");
        MARKUP_TAG.replace_all(&text, "").into_owned()
    }

    fn redact_pii(&self, text: &str) -> String {
        let mut redacted = text.to_string();
        for regex in &self.pii {
            redacted = regex.replace_all(&redacted, PII_MARKER).into_owned();
        }
        redacted
    }

    /// Append the content-appropriate disclaimer unless one is present.
    fn ensure_disclaimer(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        if DISCLAIMER_MARKERS.iter().any(|m| lower.contains(m)) {
            return text.to_string();
        }
        format!("{}\n\n{}", text, self.disclaimers.select(text))
    }

    /// The text returned when sanitization cannot produce anything better:
    /// the default disclaimer alone, never raw generator output.
    pub fn fallback_text(&self) -> String {
        self.disclaimers.default_text().to_string()
    }
}

/// Replace clinical role/artifact words with neutral phrasing.
fn soften_terminology(text: &str) -> String {
    let text = DOCTOR_WORD.replace_all(text, "healthcare professional");
    PRESCRIPTION_WORD
        .replace_all(&text, "medical recommendation")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> ResponseValidator {
        ResponseValidator::new(
            Arc::new(SafetyConfig::default()),
            Arc::new(DisclaimerStore::default()),
        )
    }

    // ── empty input ────────────────────────────────────────────

    #[test]
    fn empty_input_yields_fallback() {
        assert_eq!(validator().sanitize(""), EMPTY_RESPONSE_FALLBACK);
    }

    #[test]
    fn whitespace_input_yields_fallback() {
        assert_eq!(validator().sanitize("  \n "), EMPTY_RESPONSE_FALLBACK);
    }

    // ── markup stripping ───────────────────────────────────────

    #[test]
    fn strips_script_blocks_entirely() {
        let out = validator().sanitize("Rest well.<script>alert('x')</script> Drink fluids.");
        assert!(!out.contains("script"));
        assert!(!out.contains("alert"));
        assert!(out.contains("Rest well."));
        assert!(out.contains("Drink fluids."));
    }

    #[test]
    fn strips_remaining_tags() {
        let out = validator().sanitize("<b>Rest</b> and <i>fluids</i>.");
        assert!(out.starts_with("Rest and fluids."));
        assert!(!out.contains('<'));
    }

    #[test]
    fn strips_multiline_script() {
        let out = validator().sanitize("Before.<script type=\"text/javascript\">\nevil()\n</script>After.");
        assert!(!out.contains("evil"));
        assert!(out.contains("Before."));
        assert!(out.contains("After."));
    }

    // ── redaction ──────────────────────────────────────────────

    #[test]
    fn redacts_phone_numbers() {
        let out = validator().sanitize("Call 555-123-4567 for an appointment.");
        assert!(out.contains("[REDACTED]"));
        assert!(!out.contains("555-123-4567"));
    }

    #[test]
    fn restricted_phrases_pass_through_for_output_check() {
        // Restricted content is the output check's job; sanitize must not
        // mask it from that scan.
        let out = validator().sanitize("I can prescribe antibiotics for this.");
        assert!(out.contains("prescribe"));
    }

    // ── terminology softening ──────────────────────────────────

    #[test]
    fn softens_doctor_to_healthcare_professional() {
        let out = validator().sanitize("Ask your doctor about dosage.");
        assert!(out.contains("healthcare professional"));
        assert!(!out.to_lowercase().contains("doctor "));
    }

    #[test]
    fn softening_is_whole_word() {
        let out = validator().sanitize("She holds a doctorate in biology.");
        assert!(out.contains("doctorate"));
    }

    // ── disclaimer injection ───────────────────────────────────

    #[test]
    fn appends_disclaimer_when_absent() {
        let out = validator().sanitize("Rest and hydration help with colds.");
        assert!(out.to_lowercase().contains("disclaimer"));
        assert!(out.contains("educational purposes"));
    }

    #[test]
    fn does_not_duplicate_existing_disclaimer() {
        let input = "Rest helps.\n\nDisclaimer: educational content only.";
        let out = validator().sanitize(input);
        assert_eq!(out.matches("Disclaimer").count(), 1);
    }

    #[test]
    fn idempotent_with_respect_to_disclaimer() {
        let v = validator();
        let once = v.sanitize("Rest and hydration help with colds.");
        let twice = v.sanitize(&once);
        assert_eq!(
            once.to_lowercase().matches("disclaimer").count(),
            twice.to_lowercase().matches("disclaimer").count()
        );
    }

    #[test]
    fn educational_purposes_marker_suppresses_injection() {
        let input = "This summary is for educational purposes only.";
        let out = validator().sanitize(input);
        assert!(!out.to_lowercase().contains("disclaimer:"));
    }

    // ── fallback ───────────────────────────────────────────────

    #[test]
    fn fallback_text_is_default_disclaimer() {
        let v = validator();
        assert_eq!(
            v.fallback_text(),
            crate::store::disclaimers::DEFAULT_DISCLAIMER
        );
    }
}
