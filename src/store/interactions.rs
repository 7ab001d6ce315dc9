//! Drug interaction reference data (`drug_interactions.json`).
//!
//! Keyed by lowercase drug name. A fully curated dataset keeps every
//! `interacting_drug` resolvable as its own key, but the loader tolerates
//! dangling references; curation gaps must not break lookups that do work.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Clinical severity of a drug-drug interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// One drug-drug interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub interacting_drug: String,
    pub severity: Severity,
    pub effect: String,
    pub recommendation: String,
}

/// One drug-food interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodInteraction {
    pub item: String,
    pub effect: String,
    pub recommendation: String,
}

/// Everything known about one drug.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DrugRecord {
    pub drug_class: String,
    pub interactions: Vec<Interaction>,
    pub food_interactions: Vec<FoodInteraction>,
}

/// Drug name → record table, keyed lowercase.
#[derive(Default)]
pub struct InteractionStore {
    records: HashMap<String, DrugRecord>,
}

impl InteractionStore {
    /// Load from a JSON object file keyed by drug name. A missing or
    /// unparseable file degrades to an empty store.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Drug interaction file not found, interaction lookups disabled"
                );
                return Self::default();
            }
        };

        match serde_json::from_str::<HashMap<String, DrugRecord>>(&json) {
            Ok(map) => {
                let store = Self::from_map(map);
                tracing::info!(count = store.len(), "Loaded drug interaction table");
                store
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Drug interaction file unparseable, interaction lookups disabled"
                );
                Self::default()
            }
        }
    }

    /// Build a store from an in-memory map, lowercasing keys.
    pub fn from_map(map: HashMap<String, DrugRecord>) -> Self {
        let records = map
            .into_iter()
            .map(|(drug, record)| (drug.to_lowercase(), record))
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive lookup of a drug's record.
    pub fn record(&self, drug: &str) -> Option<&DrugRecord> {
        self.records.get(&drug.to_lowercase())
    }

    /// Look up the interaction between two drugs, checking both directions.
    pub fn between(&self, a: &str, b: &str) -> Option<&Interaction> {
        let find = |drug: &str, other: &str| {
            self.record(drug).and_then(|r| {
                r.interactions
                    .iter()
                    .find(|i| i.interacting_drug.eq_ignore_ascii_case(other))
            })
        };
        find(a, b).or_else(|| find(b, a))
    }
}
