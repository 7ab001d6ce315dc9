//! The recognizer seam: any span-labeling backend can sit behind
//! [`Recognizer`], from a statistical NER model to a plain dictionary scan.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of entity labels the extractor understands.
///
/// Anything a backend cannot place in the first four buckets is `Other` and
/// is discarded during bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Disease,
    Symptom,
    Treatment,
    Medication,
    Other,
}

/// A labeled span over the input text, in byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub start: usize,
    pub end: usize,
    pub label: EntityLabel,
}

impl EntitySpan {
    pub fn new(start: usize, end: usize, label: EntityLabel) -> Self {
        Self { start, end, label }
    }
}

/// Recognizer backend failures. The extractor converts every error into
/// four empty sequences; callers never see these.
#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("Recognizer model unavailable: {0}")]
    Unavailable(String),

    #[error("Recognizer inference failed: {0}")]
    Inference(String),
}

/// Span detection and labeling capability.
pub trait Recognizer: Send + Sync {
    /// Find labeled spans in `text`. Spans must lie on character
    /// boundaries of `text` and be ordered by start offset.
    fn find_spans(&self, text: &str) -> Result<Vec<EntitySpan>, RecognizerError>;
}

/// Degraded/blank backend: recognizes nothing, fails never.
pub struct NullRecognizer;

impl Recognizer for NullRecognizer {
    fn find_spans(&self, _text: &str) -> Result<Vec<EntitySpan>, RecognizerError> {
        Ok(Vec::new())
    }
}
