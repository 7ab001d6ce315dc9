//! Immutable reference data loaded once at process start.
//!
//! Every loader tolerates a missing or corrupt file by degrading to an empty
//! store with a logged warning: reference data enriches behavior, it never
//! gates startup. Stores are shared via `Arc` and never mutated after load,
//! so concurrent requests need no locking.

pub mod abbreviations;
pub mod disclaimers;
pub mod interactions;
pub mod terms;

pub use abbreviations::AbbreviationStore;
pub use disclaimers::DisclaimerStore;
pub use interactions::{DrugRecord, FoodInteraction, Interaction, InteractionStore, Severity};
pub use terms::{TermEntry, TermStore};

use std::path::Path;
use std::sync::Arc;

/// All reference data the pipeline consumes, loaded from one resources
/// directory. Each file is optional; absent files degrade to empty stores.
pub struct KnowledgeBase {
    pub abbreviations: Arc<AbbreviationStore>,
    pub terms: Arc<TermStore>,
    pub interactions: Arc<InteractionStore>,
    pub disclaimers: Arc<DisclaimerStore>,
}

impl KnowledgeBase {
    /// Load the standard resource files from `resources_dir`.
    pub fn load(resources_dir: &Path) -> Self {
        Self {
            abbreviations: Arc::new(AbbreviationStore::load(
                &resources_dir.join("medical_abbreviations.json"),
            )),
            terms: Arc::new(TermStore::load(&resources_dir.join("medical_terms.json"))),
            interactions: Arc::new(InteractionStore::load(
                &resources_dir.join("drug_interactions.json"),
            )),
            disclaimers: Arc::new(DisclaimerStore::load(
                &resources_dir.join("medical_disclaimers.json"),
            )),
        }
    }

    /// An empty knowledge base; every lookup degrades gracefully.
    pub fn empty() -> Self {
        Self {
            abbreviations: Arc::new(AbbreviationStore::empty()),
            terms: Arc::new(TermStore::default()),
            interactions: Arc::new(InteractionStore::default()),
            disclaimers: Arc::new(DisclaimerStore::default()),
        }
    }
}
