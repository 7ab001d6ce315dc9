//! End-to-end pipeline tests over the bundled resource files.

use std::path::PathBuf;
use std::sync::Arc;

use medguard::config::SafetyConfig;
use medguard::extract::{ExtractedEntities, LexiconRecognizer};
use medguard::pipeline::{GeneratorError, PipelineOutcome, ResponseGenerator};
use medguard::store::KnowledgeBase;
use medguard::{ChatPipeline, SafetyClassifier, ResponseValidator};

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn resources_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources")
}

struct CannedGenerator(String);

impl ResponseGenerator for CannedGenerator {
    fn generate(
        &self,
        _query: &str,
        _entities: &ExtractedEntities,
    ) -> Result<String, GeneratorError> {
        Ok(self.0.clone())
    }
}

fn pipeline_with(response: &str) -> ChatPipeline {
    init_logging();
    let config = Arc::new(SafetyConfig::load(&resources_dir().join("safety_config.json")));
    let knowledge = KnowledgeBase::load(&resources_dir());
    let recognizer = Arc::new(LexiconRecognizer::new(Arc::clone(&knowledge.terms)));
    let generator = Arc::new(CannedGenerator(response.to_string()));
    ChatPipeline::new(config, knowledge, recognizer, generator)
}

#[test]
fn emergency_question_is_blocked_before_generation() {
    let p = pipeline_with("never used");
    let reply = p.answer("My chest hurts, could this be a heart attack?");
    assert_eq!(reply.outcome, PipelineOutcome::BlockedAtInput);
    assert!(reply.text.contains("emergency services"));
}

#[test]
fn prescription_request_is_denied() {
    let p = pipeline_with("never used");
    let reply = p.answer("Please prescribe me antibiotics");
    assert_eq!(reply.outcome, PipelineOutcome::BlockedAtInput);
    assert!(reply.text.contains("healthcare professional"));
}

#[test]
fn benign_question_is_answered_with_disclaimer() {
    let p = pipeline_with("Regular exercise and a balanced diet support heart health.");
    let reply = p.answer("How can I keep my heart healthy?");
    assert_eq!(reply.outcome, PipelineOutcome::Answered);
    assert!(reply.text.contains("heart health"));
    assert!(reply.text.to_lowercase().contains("educational purposes"));
}

#[test]
fn abbreviations_feed_entity_extraction() {
    // "dm" expands to "diabetes mellitus", a synonym of the canonical
    // disease term, which the lexicon recognizer then picks up.
    let p = pipeline_with("General information about blood sugar management.");
    let reply = p.answer("what should I know about dm");
    assert_eq!(reply.outcome, PipelineOutcome::Answered);
    assert_eq!(reply.entities.diseases, vec!["diabetes mellitus"]);
}

#[test]
fn medication_question_attaches_interaction_context() {
    let p = pipeline_with("Warfarin requires regular monitoring.");
    let reply = p.answer("is it safe to take warfarin with ibuprofen");
    assert_eq!(reply.outcome, PipelineOutcome::Answered);
    assert_eq!(
        reply.entities.medications,
        vec!["warfarin", "ibuprofen"]
    );
    assert_eq!(reply.context.drug_records.len(), 2);
    let warfarin = &reply.context.drug_records[0];
    assert_eq!(warfarin.drug, "warfarin");
    assert!(warfarin
        .record
        .interactions
        .iter()
        .any(|i| i.interacting_drug == "ibuprofen"));
}

#[test]
fn unsafe_generated_output_is_replaced() {
    let p = pipeline_with("Based on this, here is your diagnosis and treatment plan.");
    let reply = p.answer("How can I keep my heart healthy?");
    assert_eq!(reply.outcome, PipelineOutcome::BlockedAtOutput);
}

#[test]
fn sanitize_then_output_check_round_trip_is_safe() {
    init_logging();
    let config = Arc::new(SafetyConfig::load(&resources_dir().join("safety_config.json")));
    let knowledge = KnowledgeBase::load(&resources_dir());
    let classifier =
        SafetyClassifier::new(Arc::clone(&config), Arc::clone(&knowledge.disclaimers));
    let validator =
        ResponseValidator::new(Arc::clone(&config), Arc::clone(&knowledge.disclaimers));

    let clean_outputs = [
        "Staying hydrated helps most mild colds resolve on their own.",
        "Common symptoms of seasonal allergies include sneezing and itchy eyes.",
        "This medication is usually taken with food.",
        "",
    ];
    for output in clean_outputs {
        let sanitized = validator.sanitize(output);
        let verdict = classifier.check_output(&sanitized);
        assert!(
            verdict.is_safe,
            "sanitized output failed the scan: {output:?} -> {sanitized:?}"
        );
    }
}

#[test]
fn every_answer_carries_a_disclaimer() {
    let responses = [
        "Fever and cough are common flu symptoms.",
        "Metformin is a widely used medication.",
        "Sleep hygiene matters.",
    ];
    for response in responses {
        let p = pipeline_with(response);
        let reply = p.answer("general wellness question");
        assert_eq!(reply.outcome, PipelineOutcome::Answered);
        let lower = reply.text.to_lowercase();
        assert!(
            lower.contains("disclaimer") || lower.contains("educational purposes"),
            "missing disclaimer in: {}",
            reply.text
        );
    }
}

#[test]
fn pipeline_is_shareable_across_threads() {
    let p = Arc::new(pipeline_with("General information."));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let p = Arc::clone(&p);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let reply = p.answer("what helps with a mild fever");
                    assert_eq!(reply.outcome, PipelineOutcome::Answered);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
}
