use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of one safety check. Produced twice per request (input and
/// output side); transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyVerdict {
    /// Whether the text may proceed through the pipeline.
    pub is_safe: bool,
    /// The user-visible message when blocked; `None` when safe.
    pub message: Option<String>,
}

impl SafetyVerdict {
    pub fn safe() -> Self {
        Self {
            is_safe: true,
            message: None,
        }
    }

    pub fn blocked(message: impl Into<String>) -> Self {
        Self {
            is_safe: false,
            message: Some(message.into()),
        }
    }
}

/// Internal classifier failures. Never surfaced: the classifier fails
/// closed, converting any of these into a blocking verdict.
#[derive(Error, Debug)]
pub enum SafetyError {
    #[error("Safety scan failed: {0}")]
    Scan(String),
}
