//! Lexical helpers for comparing provider output.

use std::collections::HashSet;

/// Minimum length (exclusive) for a word to count as significant.
const SIGNIFICANT_WORD_MIN_LEN: usize = 3;

/// Lowercase words split on anything that is not alphanumeric.
pub fn words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// Lowercase words longer than three characters.
pub fn significant_words(text: &str) -> HashSet<String> {
    words(text)
        .into_iter()
        .filter(|w| w.chars().count() > SIGNIFICANT_WORD_MIN_LEN)
        .collect()
}

/// `|A ∩ B| / max(|A|, |B|)`, or 0 when both are empty.
pub fn overlap_ratio(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let larger = a.len().max(b.len());
    if larger == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / larger as f64
}

/// Word-level Jaccard similarity `|A ∩ B| / |A ∪ B|`, 0 when both are empty.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a = words(a);
    let b = words(b);
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}
