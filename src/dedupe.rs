// src/dedupe.rs
//! # Similarity Deduplicator
//! Collapses near-duplicate texts by comparing normalized "key phrases"
//! (first 8 words) with normalized edit-distance similarity. Stable: a
//! retained item always keeps its first occurrence, which also makes the
//! pass idempotent. O(n²) over survivors; n is bounded upstream (≤100 per
//! source), so quadratic is fine.

use strsim::levenshtein;

/// Similarity threshold above which a candidate is considered a duplicate.
pub const SIMILARITY_THRESHOLD: f64 = 0.75;

const KEY_PHRASE_WORDS: usize = 8;

/// Lowercase, strip punctuation (including apostrophes, so "don't" and
/// "dont" collide), collapse whitespace, truncate to the first 8 words.
pub fn key_phrase(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '\''))
        .collect();
    cleaned
        .split_whitespace()
        .take(KEY_PHRASE_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `(longer.len - edit_distance) / longer.len`, in chars. Empty vs empty is
/// fully similar.
pub fn similarity(a: &str, b: &str) -> f64 {
    let (longer, shorter) = if a.chars().count() >= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let longer_len = longer.chars().count();
    if longer_len == 0 {
        return 1.0;
    }
    let dist = levenshtein(longer, shorter);
    (longer_len.saturating_sub(dist)) as f64 / longer_len as f64
}

/// Retain the first occurrence of each similarity group. `text_of` selects
/// the field the key phrase is derived from.
pub fn dedupe_by_similarity<T, F>(items: Vec<T>, text_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen_phrases: Vec<String> = Vec::new();
    let mut kept = Vec::with_capacity(items.len());

    for item in items {
        let phrase = key_phrase(text_of(&item));
        let is_duplicate = seen_phrases
            .iter()
            .any(|seen| similarity(&phrase, seen) > SIMILARITY_THRESHOLD);
        if !is_duplicate {
            seen_phrases.push(phrase);
            kept.push(item);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_phrase_truncates_and_normalizes() {
        let p = key_phrase("Don't   eat, while WALKING! on crowded Tokyo streets during rush hour");
        assert_eq!(p, "dont eat while walking on crowded tokyo streets");
    }

    #[test]
    fn identical_strings_are_fully_similar() {
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn punctuation_and_case_variants_collapse() {
        let items = vec![
            "Avoid the trains during rush hour in central Tokyo".to_string(),
            "avoid the trains during rush hour in central tokyo!!".to_string(),
            "Book ryokan stays well in advance for autumn trips".to_string(),
        ];
        let out = dedupe_by_similarity(items, |s| s.as_str());
        assert_eq!(out.len(), 2);
        assert!(out[0].starts_with("Avoid"), "first occurrence is retained");
    }

    #[test]
    fn dedupe_is_idempotent() {
        let items = vec![
            "Try the standing sushi bars near the fish market".to_string(),
            "try the standing sushi bars near the market".to_string(),
            "Use an IC card for every train and bus ride".to_string(),
        ];
        let once = dedupe_by_similarity(items, |s| s.as_str());
        let twice = dedupe_by_similarity(once.clone(), |s| s.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn dissimilar_items_all_survive() {
        let items = vec![
            "Carry cash since small shops rarely take cards".to_string(),
            "Reserve museum tickets online before you arrive".to_string(),
            "Walk the old town early to beat the crowds".to_string(),
        ];
        let out = dedupe_by_similarity(items.clone(), |s| s.as_str());
        assert_eq!(out, items);
    }
}
