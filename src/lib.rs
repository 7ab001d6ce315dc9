//! Safety-filtering and text-normalization core for a medical Q&A assistant.
//!
//! The crate owns the decision logic that sits between a raw user question
//! and a generated answer: emergency/restricted-request detection, medical
//! text normalization, entity extraction, and response sanitization with
//! mandatory disclaimer injection. Model inference and the chat surface are
//! external collaborators behind the [`pipeline::ResponseGenerator`] and
//! [`extract::Recognizer`] seams.
//!
//! All reference data is loaded once at startup and immutable afterwards, so
//! every component is safe to share across concurrent requests without
//! coordination.

pub mod config;
pub mod extract;
pub mod normalize;
pub mod pipeline;
pub mod safety;
pub mod store;
pub mod validate;

pub use config::SafetyConfig;
pub use extract::{EntityExtractor, EntityLabel, ExtractedEntities, Recognizer};
pub use normalize::TextNormalizer;
pub use pipeline::{ChatPipeline, PipelineReply, ResponseGenerator};
pub use safety::{SafetyClassifier, SafetyVerdict};
pub use store::KnowledgeBase;
pub use validate::ResponseValidator;
