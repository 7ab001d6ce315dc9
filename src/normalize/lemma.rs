//! Stop-word set and rule-based English lemmatizer.
//!
//! Replaces the statistical lemmatizer the original pipeline leaned on with
//! an irregular-form table plus suffix heuristics. Good enough for query
//! normalization; canonical medical terms never reach this code because the
//! normalizer exempts them first.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        "a", "about", "after", "again", "all", "am", "an", "and", "any", "are", "as", "at",
        "be", "because", "been", "before", "being", "between", "both", "but", "by", "can",
        "could", "did", "do", "does", "doing", "down", "during", "each", "for", "from",
        "further", "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his",
        "how", "i", "if", "in", "into", "is", "it", "its", "just", "me", "more", "most",
        "my", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or", "other",
        "our", "ours", "out", "over", "own", "same", "she", "should", "so", "some", "such",
        "than", "that", "the", "their", "theirs", "them", "then", "there", "these", "they",
        "this", "those", "through", "to", "too", "under", "until", "up", "very", "was",
        "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
        "will", "with", "would", "you", "your", "yours",
    ])
});

/// Irregular forms the suffix rules cannot reach.
static IRREGULAR_FORMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // "-aches" nouns would be mangled by the "-ches" plural rule.
        ("aches", "ache"),
        ("headaches", "headache"),
        ("backaches", "backache"),
        ("toothaches", "toothache"),
        ("stomachaches", "stomachache"),
        ("children", "child"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("men", "man"),
        ("women", "woman"),
        ("mice", "mouse"),
        ("people", "person"),
        ("ate", "eat"),
        ("eaten", "eat"),
        ("ran", "run"),
        ("running", "run"),
        ("took", "take"),
        ("taken", "take"),
        ("taking", "take"),
        ("went", "go"),
        ("gone", "go"),
        ("felt", "feel"),
        ("feeling", "feel"),
        ("worse", "bad"),
        ("worst", "bad"),
        ("better", "good"),
        ("best", "good"),
    ])
});

/// Whether a lowercased token is a stop word and should be dropped.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Reduce a lowercased token to its dictionary base form.
///
/// Irregular table first, then plural suffix rules, then participle
/// suffixes with doubled-consonant undoing. Unknown shapes pass through
/// unchanged.
pub fn lemmatize(token: &str) -> String {
    if let Some(lemma) = IRREGULAR_FORMS.get(token) {
        return (*lemma).to_string();
    }

    if let Some(lemma) = strip_plural(token) {
        return lemma;
    }

    if let Some(lemma) = strip_participle(token) {
        return lemma;
    }

    token.to_string()
}

fn strip_plural(token: &str) -> Option<String> {
    if let Some(stem) = token.strip_suffix("ies") {
        if stem.len() >= 2 {
            return Some(format!("{stem}y"));
        }
    }
    if token.ends_with("sses") {
        return Some(token[..token.len() - 2].to_string());
    }
    for suffix in ["ches", "shes", "xes", "zes"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            return Some(format!("{}{}", stem, &suffix[..suffix.len() - 2]));
        }
    }
    if token.len() > 3
        && token.ends_with('s')
        && !token.ends_with("ss")
        && !token.ends_with("us")
        && !token.ends_with("is")
    {
        return Some(token[..token.len() - 1].to_string());
    }
    None
}

fn strip_participle(token: &str) -> Option<String> {
    for suffix in ["ing", "ed"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if stem.len() < 3 {
                continue;
            }
            return Some(undo_doubling(stem));
        }
    }
    None
}

/// "runn" → "run", but "tell" and "press" keep their natural doubles.
fn undo_doubling(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1] == bytes[n - 2] {
        let last = bytes[n - 1] as char;
        if !matches!(last, 'l' | 's' | 'e' | 'z') {
            return stem[..n - 1].to_string();
        }
    }
    stem.to_string()
}
