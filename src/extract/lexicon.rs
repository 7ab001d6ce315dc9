//! Dictionary-based recognizer over the medical term store.
//!
//! Longest-match, case-insensitive phrase scan with word-boundary checks.
//! Orders of magnitude cheaper than a statistical model and deterministic,
//! which is what the tests and the default pipeline want; a real NER backend
//! can replace it behind the same trait.

use std::sync::Arc;

use crate::store::TermStore;

use super::recognizer::{EntityLabel, EntitySpan, Recognizer, RecognizerError};

/// One searchable phrase (canonical term or synonym), lowercase.
struct LexiconPhrase {
    phrase: String,
    label: EntityLabel,
}

/// Phrase-matching recognizer built from a [`TermStore`].
pub struct LexiconRecognizer {
    /// Sorted longest-first so multi-word phrases claim their span before
    /// any embedded single word does.
    phrases: Vec<LexiconPhrase>,
}

impl LexiconRecognizer {
    pub fn new(terms: Arc<TermStore>) -> Self {
        let mut phrases = Vec::new();
        for (canonical, entry) in terms.iter() {
            let label = entry.label_or_other();
            phrases.push(LexiconPhrase {
                phrase: canonical.to_lowercase(),
                label,
            });
            for synonym in &entry.synonyms {
                phrases.push(LexiconPhrase {
                    phrase: synonym.to_lowercase(),
                    label,
                });
            }
        }
        phrases.sort_by(|a, b| b.phrase.len().cmp(&a.phrase.len()));
        Self { phrases }
    }
}

impl Recognizer for LexiconRecognizer {
    fn find_spans(&self, text: &str) -> Result<Vec<EntitySpan>, RecognizerError> {
        // ASCII lowercasing keeps byte offsets aligned with the input.
        let haystack = text.to_ascii_lowercase();
        let mut claimed: Vec<(usize, usize)> = Vec::new();
        let mut spans = Vec::new();

        for entry in &self.phrases {
            if entry.phrase.is_empty() {
                continue;
            }
            let mut from = 0;
            while let Some(found) = haystack[from..].find(&entry.phrase) {
                let start = from + found;
                let end = start + entry.phrase.len();
                from = end;

                if !on_word_boundary(&haystack, start, end) {
                    continue;
                }
                if claimed.iter().any(|&(s, e)| start < e && s < end) {
                    continue;
                }
                claimed.push((start, end));
                spans.push(EntitySpan::new(start, end, entry.label));
            }
        }

        spans.sort_by_key(|s| s.start);
        Ok(spans)
    }
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before_ok = start == 0
        || text[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = end == text.len()
        || text[end..].chars().next().map_or(true, |c| !c.is_alphanumeric());
    before_ok && after_ok
}
