//! Canonical medical term dictionary (`medical_terms.json`).
//!
//! Canonical terms are exempt from lemmatization (so "diabetes" never
//! becomes "diabete") and carry synonyms used for text augmentation and for
//! the lexicon recognizer.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::extract::EntityLabel;

/// Metadata for one canonical medical term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TermEntry {
    /// Entity category for dictionary-based recognition.
    pub category: Option<EntityLabel>,
    /// Synonyms in curation order; used for augmentation and recognition.
    pub synonyms: Vec<String>,
    /// Lay definition, surfaced as knowledge context.
    pub definition: Option<String>,
}

impl TermEntry {
    /// The entry's label, defaulting to `Other` for uncategorized terms.
    pub fn label_or_other(&self) -> EntityLabel {
        self.category.unwrap_or(EntityLabel::Other)
    }
}

/// Canonical term → entry map, keyed lowercase.
#[derive(Default)]
pub struct TermStore {
    terms: HashMap<String, TermEntry>,
}

impl TermStore {
    /// Load from a JSON object file keyed by canonical term. A missing or
    /// unparseable file degrades to an empty store.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Medical term file not found, using empty ontology"
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<HashMap<String, TermEntry>>(&json) {
            Ok(map) => {
                let store = Self::from_map(map);
                tracing::info!(count = store.len(), "Loaded medical term ontology");
                store
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Medical term file unparseable, using empty ontology"
                );
                Self::default()
            }
        }
    }

    /// Build a store from an in-memory map, lowercasing keys.
    pub fn from_map(map: HashMap<String, TermEntry>) -> Self {
        let terms = map
            .into_iter()
            .map(|(term, entry)| (term.to_lowercase(), entry))
            .collect();
        Self { terms }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether a (lowercased) token is a canonical term, and therefore
    /// exempt from lemmatization.
    pub fn is_canonical(&self, token: &str) -> bool {
        self.terms.contains_key(&token.to_lowercase())
    }

    /// Case-insensitive entry lookup.
    pub fn entry(&self, term: &str) -> Option<&TermEntry> {
        self.terms.get(&term.to_lowercase())
    }

    /// Iterate over all (canonical term, entry) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermEntry)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Produce augmented variants of `text` by substituting each canonical
    /// term occurrence with its synonyms. The original text is always the
    /// first variant.
    pub fn augment(&self, text: &str) -> Vec<String> {
        let mut variants = vec![text.to_string()];
        // ASCII fold keeps byte offsets aligned with the input; a full
        // Unicode lowercase can change byte lengths.
        let lower = text.to_ascii_lowercase();

        for (term, entry) in &self.terms {
            if entry.synonyms.is_empty() {
                continue;
            }
            if let Some(pos) = lower.find(term.as_str()) {
                let Some(surface) = text.get(pos..pos + term.len()) else {
                    continue;
                };
                for synonym in &entry.synonyms {
                    variants.push(text.replacen(surface, synonym, 1));
                }
            }
        }

        variants
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> TermStore {
        TermStore::from_map(HashMap::from([
            (
                "diabetes".to_string(),
                TermEntry {
                    category: Some(EntityLabel::Disease),
                    synonyms: vec!["diabetes mellitus".to_string()],
                    definition: Some("A chronic condition affecting blood sugar.".to_string()),
                },
            ),
            (
                "Hypertension".to_string(),
                TermEntry {
                    category: Some(EntityLabel::Disease),
                    synonyms: vec!["high blood pressure".to_string()],
                    definition: None,
                },
            ),
            (
                "metformin".to_string(),
                TermEntry {
                    category: Some(EntityLabel::Medication),
                    synonyms: vec![],
                    definition: None,
                },
            ),
        ]))
    }

    #[test]
    fn canonical_lookup_is_case_insensitive() {
        let store = store();
        assert!(store.is_canonical("diabetes"));
        assert!(store.is_canonical("DIABETES"));
        assert!(store.is_canonical("hypertension"));
        assert!(!store.is_canonical("running"));
    }

    #[test]
    fn entry_carries_metadata() {
        let store = store();
        let entry = store.entry("diabetes").unwrap();
        assert_eq!(entry.category, Some(EntityLabel::Disease));
        assert!(entry.definition.is_some());
    }

    #[test]
    fn augment_substitutes_synonyms() {
        let variants = store().augment("managing diabetes with diet");
        assert_eq!(variants[0], "managing diabetes with diet");
        assert!(variants.contains(&"managing diabetes mellitus with diet".to_string()));
    }

    #[test]
    fn augment_handles_multibyte_case_folds() {
        // 'İ' lowercases to a longer byte sequence; offsets found in the
        // folded copy must stay valid against the original text.
        let variants = store().augment("İİİ diabetes");
        assert_eq!(variants[0], "İİİ diabetes");
        assert!(variants.contains(&"İİİ diabetes mellitus".to_string()));
    }

    #[test]
    fn augment_without_matches_returns_original_only() {
        let variants = store().augment("general wellness question");
        assert_eq!(variants, vec!["general wellness question".to_string()]);
    }

    #[test]
    fn missing_file_degrades_to_empty() {
        let store = TermStore::load(Path::new("/nonexistent/terms.json"));
        assert!(store.is_empty());
        assert!(!store.is_canonical("diabetes"));
    }
}
