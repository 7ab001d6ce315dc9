//! Entity extraction: bucket recognizer spans into the four medical
//! categories the rest of the pipeline consumes.
//!
//! Span detection itself is pluggable ([`Recognizer`]); this module only
//! buckets, and degrades to empty buckets when the backend fails.

pub mod lexicon;
pub mod recognizer;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use lexicon::LexiconRecognizer;
pub use recognizer::{EntityLabel, EntitySpan, NullRecognizer, Recognizer, RecognizerError};

/// Per-request extraction result. Surface forms in order of appearance,
/// duplicates preserved. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub diseases: Vec<String>,
    pub symptoms: Vec<String>,
    pub treatments: Vec<String>,
    pub medications: Vec<String>,
}

impl ExtractedEntities {
    pub fn is_empty(&self) -> bool {
        self.diseases.is_empty()
            && self.symptoms.is_empty()
            && self.treatments.is_empty()
            && self.medications.is_empty()
    }

    /// Total number of extracted surface forms.
    pub fn len(&self) -> usize {
        self.diseases.len() + self.symptoms.len() + self.treatments.len() + self.medications.len()
    }
}

/// Buckets recognizer spans into [`ExtractedEntities`].
pub struct EntityExtractor {
    recognizer: Arc<dyn Recognizer>,
}

impl EntityExtractor {
    pub fn new(recognizer: Arc<dyn Recognizer>) -> Self {
        Self { recognizer }
    }

    /// Extract entities from `text`. A recognizer failure logs a warning
    /// and yields four empty sequences; extraction never fails a request.
    pub fn extract(&self, text: &str) -> ExtractedEntities {
        let spans = match self.recognizer.find_spans(text) {
            Ok(spans) => spans,
            Err(e) => {
                tracing::warn!(error = %e, "Entity recognizer failed, returning no entities");
                return ExtractedEntities::default();
            }
        };

        let mut entities = ExtractedEntities::default();
        for span in spans {
            let Some(surface) = text.get(span.start..span.end) else {
                tracing::warn!(
                    start = span.start,
                    end = span.end,
                    "Recognizer span out of bounds, skipping"
                );
                continue;
            };
            let surface = surface.to_string();
            match span.label {
                EntityLabel::Disease => entities.diseases.push(surface),
                EntityLabel::Symptom => entities.symptoms.push(surface),
                EntityLabel::Treatment => entities.treatments.push(surface),
                EntityLabel::Medication => entities.medications.push(surface),
                EntityLabel::Other => {}
            }
        }
        entities
    }
}
