//! Request orchestration: input check → normalize → extract → generate →
//! sanitize → output check.
//!
//! The pipeline owns the decision logic only; the response generator is an
//! external collaborator behind [`ResponseGenerator`]. Timeouts, retries,
//! and async dispatch for that collaborator belong to the caller; every
//! component here is a pure function over immutable shared dictionaries.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::config::SafetyConfig;
use crate::extract::{EntityExtractor, ExtractedEntities, Recognizer};
use crate::normalize::TextNormalizer;
use crate::safety::SafetyClassifier;
use crate::store::{DrugRecord, KnowledgeBase};
use crate::validate::ResponseValidator;

/// External response generator failures.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Generator unavailable: {0}")]
    Unavailable(String),

    #[error("Generation failed: {0}")]
    Failed(String),
}

/// External collaborator producing candidate answer text.
pub trait ResponseGenerator: Send + Sync {
    /// Produce candidate text for a normalized query and its extracted
    /// entities. Invoked synchronously; the caller owns any timeout policy.
    fn generate(
        &self,
        query: &str,
        entities: &ExtractedEntities,
    ) -> Result<String, GeneratorError>;
}

/// A term definition surfaced alongside the answer.
#[derive(Debug, Clone, Serialize)]
pub struct TermDefinition {
    pub term: String,
    pub definition: String,
}

/// Drug interaction knowledge attached to an extracted medication.
#[derive(Debug, Clone, Serialize)]
pub struct DrugContext {
    pub drug: String,
    pub record: DrugRecord,
}

/// Knowledge-base context gathered for one request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KnowledgeContext {
    pub definitions: Vec<TermDefinition>,
    pub drug_records: Vec<DrugContext>,
}

/// Where the pipeline stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineOutcome {
    /// Input check failed; the safety message replaced everything.
    BlockedAtInput,
    /// Full flow completed.
    Answered,
    /// Generated text failed the output check; the safety message shipped.
    BlockedAtOutput,
}

/// Final result of one request.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReply {
    /// The user-visible text (answer or safety message).
    pub text: String,
    /// Entities extracted from the normalized query.
    pub entities: ExtractedEntities,
    /// Knowledge context for the extracted entities.
    pub context: KnowledgeContext,
    pub outcome: PipelineOutcome,
}

/// Wires the four core components around an external generator.
pub struct ChatPipeline {
    classifier: SafetyClassifier,
    normalizer: TextNormalizer,
    extractor: EntityExtractor,
    validator: ResponseValidator,
    knowledge: KnowledgeBase,
    generator: Arc<dyn ResponseGenerator>,
}

impl ChatPipeline {
    pub fn new(
        config: Arc<SafetyConfig>,
        knowledge: KnowledgeBase,
        recognizer: Arc<dyn Recognizer>,
        generator: Arc<dyn ResponseGenerator>,
    ) -> Self {
        let classifier =
            SafetyClassifier::new(Arc::clone(&config), Arc::clone(&knowledge.disclaimers));
        let normalizer = TextNormalizer::new(
            Arc::clone(&knowledge.abbreviations),
            Arc::clone(&knowledge.terms),
        );
        let extractor = EntityExtractor::new(recognizer);
        let validator =
            ResponseValidator::new(Arc::clone(&config), Arc::clone(&knowledge.disclaimers));

        Self {
            classifier,
            normalizer,
            extractor,
            validator,
            knowledge,
            generator,
        }
    }

    /// Run one question through the full flow.
    pub fn answer(&self, raw_input: &str) -> PipelineReply {
        let verdict = self.classifier.check_input(raw_input);
        if !verdict.is_safe {
            tracing::info!("Request blocked at input check");
            return PipelineReply {
                text: verdict
                    .message
                    .unwrap_or_else(|| crate::config::INVALID_INPUT_RESPONSE.to_string()),
                entities: ExtractedEntities::default(),
                context: KnowledgeContext::default(),
                outcome: PipelineOutcome::BlockedAtInput,
            };
        }

        let normalized = self.normalizer.normalize(raw_input);
        let entities = self.extractor.extract(&normalized);
        let context = self.gather_context(&entities);

        let candidate = match self.generator.generate(&normalized, &entities) {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::warn!(error = %e, "Generator failed, using fallback response");
                String::new()
            }
        };

        let sanitized = self.validator.sanitize(&candidate);

        let out_verdict = self.classifier.check_output(&sanitized);
        if !out_verdict.is_safe {
            tracing::warn!("Generated response blocked at output check");
            return PipelineReply {
                text: out_verdict
                    .message
                    .unwrap_or_else(|| self.validator.fallback_text()),
                entities,
                context,
                outcome: PipelineOutcome::BlockedAtOutput,
            };
        }

        PipelineReply {
            text: sanitized,
            entities,
            context,
            outcome: PipelineOutcome::Answered,
        }
    }

    /// Pull term definitions and drug-interaction records for the
    /// extracted entities.
    fn gather_context(&self, entities: &ExtractedEntities) -> KnowledgeContext {
        let mut context = KnowledgeContext::default();

        let all_surfaces = entities
            .diseases
            .iter()
            .chain(&entities.symptoms)
            .chain(&entities.treatments)
            .chain(&entities.medications);

        for surface in all_surfaces {
            if let Some(entry) = self.knowledge.terms.entry(surface) {
                if let Some(definition) = &entry.definition {
                    context.definitions.push(TermDefinition {
                        term: surface.to_lowercase(),
                        definition: definition.clone(),
                    });
                }
            }
        }

        for medication in &entities.medications {
            if let Some(record) = self.knowledge.interactions.record(medication) {
                context.drug_records.push(DrugContext {
                    drug: medication.to_lowercase(),
                    record: record.clone(),
                });
            }
        }

        context
    }
}
