//! Text normalization: URL stripping, punctuation filtering, abbreviation
//! expansion, and medical-term-aware lemmatization.
//!
//! Normalization is best-effort and total: every string input yields a
//! string output, and no step panics or propagates an error into the
//! request pipeline.

pub mod lemma;

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;

use crate::store::{AbbreviationStore, TermStore};

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+|www\.\S+").expect("valid regex"));

/// Normalizes raw question text for the downstream pipeline.
///
/// Holds shared read-only dictionaries; cheap to clone-by-`Arc` across
/// concurrent requests.
pub struct TextNormalizer {
    abbreviations: Arc<AbbreviationStore>,
    terms: Arc<TermStore>,
}

impl TextNormalizer {
    pub fn new(abbreviations: Arc<AbbreviationStore>, terms: Arc<TermStore>) -> Self {
        Self {
            abbreviations,
            terms,
        }
    }

    /// Normalize text through the fixed step order:
    ///
    /// 1. URLs become a single space.
    /// 2. Characters outside letters/digits/whitespace/`- + ° % /` are
    ///    deleted, not spaced (adjacent words may merge; accepted lossy
    ///    behavior, medical punctuation like "98.6°F" and "120/80" survives
    ///    minus the dot).
    /// 3. Abbreviations expand case-insensitively on word boundaries.
    /// 4. Tokens lemmatize, except canonical medical terms (kept verbatim,
    ///    case-folded) and stop words (dropped).
    /// 5. The result is lowercased with whitespace runs collapsed.
    pub fn normalize(&self, text: &str) -> String {
        let text = URL_PATTERN.replace_all(text, " ");
        let text = strip_special_characters(&text);
        let text = self.abbreviations.expand(&text);
        let text = self.lemmatize_tokens(&text);
        text.to_lowercase()
    }

    fn lemmatize_tokens(&self, text: &str) -> String {
        let mut tokens = Vec::new();
        for token in text.split_whitespace() {
            let lower = token.to_lowercase();
            if self.terms.is_canonical(&lower) {
                tokens.push(lower);
            } else if lemma::is_stop_word(&lower) {
                continue;
            } else {
                tokens.push(lemma::lemmatize(&lower));
            }
        }
        tokens.join(" ")
    }
}

/// Delete every character that is not a letter, digit, whitespace, hyphen,
/// plus, degree sign, percent, or slash.
fn strip_special_characters(text: &str) -> String {
    text.chars()
        .filter(|c| {
            c.is_ascii_alphanumeric()
                || c.is_whitespace()
                || matches!(c, '-' | '+' | '°' | '%' | '/')
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::store::TermEntry;

    fn normalizer() -> TextNormalizer {
        let abbreviations = AbbreviationStore::from_map(HashMap::from([
            ("bp".to_string(), "blood pressure".to_string()),
            ("htn".to_string(), "hypertension".to_string()),
        ]));
        let terms = TermStore::from_map(HashMap::from([
            ("diabetes".to_string(), TermEntry::default()),
            ("hypertension".to_string(), TermEntry::default()),
        ]));
        TextNormalizer::new(Arc::new(abbreviations), Arc::new(terms))
    }

    // ── URL stripping ──────────────────────────────────────────

    #[test]
    fn strips_urls() {
        let out = normalizer().normalize("see https://example.com/info then rest");
        assert!(!out.contains("example"));
        assert!(out.contains("rest"));
    }

    #[test]
    fn strips_www_urls() {
        let out = normalizer().normalize("visit www.clinic.org today");
        assert!(!out.contains("clinic"));
    }

    // ── special characters ─────────────────────────────────────

    #[test]
    fn preserves_medical_symbols() {
        let out = normalizer().normalize("temp 98+ 50% 120/80 -5 37°");
        assert!(out.contains('+'));
        assert!(out.contains('%'));
        assert!(out.contains('/'));
        assert!(out.contains('-'));
        assert!(out.contains('°'));
    }

    #[test]
    fn deletes_punctuation_without_spacing() {
        // Deletion, not replacement: "fever,chills" merges.
        let out = normalizer().normalize("fever,chills");
        assert_eq!(out, "feverchill");
    }

    // ── abbreviation expansion ─────────────────────────────────

    #[test]
    fn expands_abbreviations_whole_word() {
        let out = normalizer().normalize("my bp is high");
        assert!(out.contains("blood pressure"));
    }

    #[test]
    fn embedded_abbreviation_not_expanded() {
        let out = normalizer().normalize("abps are fine");
        assert!(!out.contains("blood pressure"));
        assert!(out.contains("abp"));
    }

    #[test]
    fn expansion_feeds_term_preservation() {
        // "htn" expands to "hypertension", which is canonical and kept.
        let out = normalizer().normalize("patient with htn");
        assert!(out.contains("hypertension"));
    }

    // ── lemmatization ──────────────────────────────────────────

    #[test]
    fn canonical_terms_survive_lemmatization() {
        let out = normalizer().normalize("Diabetes symptoms");
        assert!(out.contains("diabetes"));
        assert!(out.contains("symptom"));
    }

    #[test]
    fn stop_words_dropped() {
        let out = normalizer().normalize("what are the symptoms of flu");
        assert_eq!(out, "symptom flu");
    }

    #[test]
    fn regular_words_lemmatized() {
        let out = normalizer().normalize("running headaches");
        assert_eq!(out, "run headache");
    }

    // ── output shape ───────────────────────────────────────────

    #[test]
    fn output_is_lowercased_and_collapsed() {
        let out = normalizer().normalize("  Fever   AND   Chills  ");
        assert_eq!(out, "fever chill");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalizer().normalize(""), "");
    }

    #[test]
    fn punctuation_only_input_yields_empty_output() {
        assert_eq!(normalizer().normalize("?!.,;:"), "");
    }

    #[test]
    fn never_panics_on_odd_input() {
        let n = normalizer();
        n.normalize("\u{0000}\u{FFFF}");
        n.normalize("émoji 🌡️ text");
        n.normalize(&"x".repeat(10_000));
    }
}
