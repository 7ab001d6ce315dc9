//! Medical abbreviation dictionary (`medical_abbreviations.json`).
//!
//! Maps abbreviations like "bp" or "htn" to their expansions. Expansion is
//! whole-word and case-insensitive: "bp" inside "abps" is never touched.

use std::collections::HashMap;
use std::path::Path;

use regex::Regex;

/// One abbreviation with its pre-compiled case-insensitive matcher.
struct CompiledAbbreviation {
    matcher: Regex,
    expansion: String,
}

impl CompiledAbbreviation {
    /// Replace every whole-word occurrence. Boundaries are checked
    /// explicitly rather than with `\b` anchors: keys like "b.i.d." start
    /// or end outside the `\w` class, where `\b` inverts its meaning and
    /// the key becomes unmatchable in running text.
    fn expand_in(&self, text: &str) -> String {
        let mut out = String::new();
        let mut last = 0;
        for m in self.matcher.find_iter(text) {
            if !on_word_boundary(text, m.start(), m.end()) {
                continue;
            }
            out.push_str(&text[last..m.start()]);
            out.push_str(&self.expansion);
            last = m.end();
        }
        if last == 0 {
            return text.to_string();
        }
        out.push_str(&text[last..]);
        out
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

/// Abbreviation → expansion dictionary, matchers compiled at load time.
pub struct AbbreviationStore {
    entries: Vec<CompiledAbbreviation>,
    by_key: HashMap<String, String>,
}

impl AbbreviationStore {
    /// Load from a JSON object file (`{"bp": "blood pressure", ...}`).
    /// A missing or unparseable file degrades to an empty store.
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Abbreviation file not found, expansion disabled"
                );
                return Self::empty();
            }
        };

        match serde_json::from_str::<HashMap<String, String>>(&json) {
            Ok(map) => {
                let store = Self::from_map(map);
                tracing::info!(count = store.len(), "Loaded medical abbreviations");
                store
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Abbreviation file unparseable, expansion disabled"
                );
                Self::empty()
            }
        }
    }

    /// Build a store from an in-memory map (used by tests and embedders).
    pub fn from_map(map: HashMap<String, String>) -> Self {
        let mut entries = Vec::with_capacity(map.len());
        let mut by_key = HashMap::with_capacity(map.len());

        for (abbr, expansion) in map {
            let source = format!(r"(?i){}", regex::escape(&abbr));
            match Regex::new(&source) {
                Ok(matcher) => {
                    by_key.insert(abbr.to_lowercase(), expansion.clone());
                    entries.push(CompiledAbbreviation { matcher, expansion });
                }
                Err(e) => {
                    // Escaped input should always compile; skip rather than fail the load.
                    tracing::warn!(abbreviation = %abbr, error = %e, "Skipping abbreviation");
                }
            }
        }

        Self { entries, by_key }
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive direct lookup of an abbreviation's expansion.
    pub fn expansion(&self, abbreviation: &str) -> Option<&str> {
        self.by_key
            .get(&abbreviation.to_lowercase())
            .map(String::as_str)
    }

    /// Expand every whole-word occurrence of every known abbreviation.
    pub fn expand(&self, text: &str) -> String {
        let mut expanded = text.to_string();
        for entry in &self.entries {
            if entry.matcher.is_match(&expanded) {
                expanded = entry.expand_in(&expanded);
            }
        }
        expanded
    }
}
