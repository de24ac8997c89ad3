// src/heuristics/transform.rs
//! Actionable-tip transform: rewrite a raw post title into imperative
//! advice.
//!
//! Ordered rewrite rules, first match wins, stop. Any rejection yields
//! `None` — the caller drops the candidate, nothing is raised.

use once_cell::sync::Lazy;
use regex::Regex;

/// Final tips are truncated to this many characters.
const MAX_TIP_CHARS: usize = 220;
const MIN_SENTENCE_CHARS: usize = 15;
const MAX_SENTENCE_CHARS: usize = 250;

// Words the validated sentence must contain at least one of.
const ACTION_WORDS: &[&str] = &[
    "avoid", "try", "use", "visit", "book", "stay", "eat", "consider", "prefer", "do", "go",
    "take", "explore", "skip", "bring", "must", "should", "don't", "not",
];

static RE_SOURCE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(LPT|PSA|TIL|TRAVEL TIP|GUIDE|ADVICE|QUESTION|DAILY THREAD):\s*")
        .expect("prefix regex")
});
static RE_BRACKET_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*?\]\s*").expect("bracket regex"));
static RE_COUNTRY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^JP\s+").expect("country regex"));

// Openers that cannot be rewritten into a statement.
static RE_UNANSWERABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(for those|if you|anyone who|does anyone know|has anyone|can someone)")
        .expect("unanswerable regex")
});

// Ordered (pattern, template) rewrite rules; first match wins.
static REWRITE_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    let rules: &[(&str, &str)] = &[
        // "Don't X" → "Avoid X"
        (r"(?i)^don't\s+(.+)$", "Avoid $1"),
        (r"(?i)^do not\s+(.+)$", "Do not $1"),
        // "X is not Y" → explicit warning
        (
            r"(?i)^(.+?)\s+is\s+not\s+(.+)$",
            "Do not treat $1 as $2; plan accordingly",
        ),
        // "X is a trap"
        (
            r"(?i)^(.+?)\s+is\s+(?:a|the).*trap",
            "$1 is a common tourist trap; consider alternatives instead",
        ),
        // "X is overrated"
        (
            r"(?i)^(.+?)\s+is\s+overrated$",
            "$1 may not be worth the hype; consider your preferences",
        ),
        // "Best X [in Y]"
        (
            r"(?i)^best\s+(.+?)(?:\s+in\s+.+)?$",
            "For the best $1, explore less touristy neighborhoods",
        ),
        // "(Must) try X"
        (
            r"(?i)^(?:must\s+)?try\s+(.+)$",
            "Try $1 if you have the opportunity; it is worth experiencing",
        ),
        // "X is worth Y"
        (
            r"(?i)^(.+?)\s+is\s+worth\s+(.+)$",
            "$1 is worth $2; budget accordingly",
        ),
        // "Cheap/Budget X"
        (
            r"(?i)^(?:cheap|budget)\s+(.+)$",
            "For budget options on $1, research local alternatives first",
        ),
        // "If X, Y" → "Y, especially if X"
        (r"(?i)^if\s+(.+?),\s+(.+)$", "$2, especially if $1"),
        // "X is better than Y"
        (
            r"(?i)^(.+?)\s+is\s+better\s+than\s+(.+)$",
            "Prefer $1 over $2 for a better experience and value",
        ),
    ];
    rules
        .iter()
        .map(|(pat, tpl)| (Regex::new(pat).expect("rewrite rule regex"), *tpl))
        .collect()
});

/// Rewrite a raw title into an actionable tip, or `None` when the candidate
/// cannot become one.
pub fn actionable_tip(title: &str) -> Option<String> {
    let mut tip = RE_SOURCE_PREFIX.replace(title, "").to_string();
    tip = RE_BRACKET_TAG.replace_all(&tip, "").to_string();
    tip = RE_COUNTRY_TAG.replace(&tip, "").trim().to_string();

    if RE_UNANSWERABLE.is_match(&tip) {
        return None;
    }

    for (pattern, template) in REWRITE_RULES.iter() {
        if pattern.is_match(&tip) {
            tip = pattern.replace(&tip, *template).to_string();
            break;
        }
    }

    // Capitalize and terminate, whether or not a rule fired.
    let mut chars = tip.chars();
    tip = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => return None,
    };
    if !tip.ends_with('.') && !tip.ends_with('!') {
        tip.push('.');
    }

    // Validate the leading sentence.
    let main_sentence = tip
        .split(['.', '!', '?'])
        .next()
        .unwrap_or_default()
        .trim();
    let len = main_sentence.chars().count();
    if !(MIN_SENTENCE_CHARS..=MAX_SENTENCE_CHARS).contains(&len) {
        return None;
    }
    let lower = main_sentence.to_lowercase();
    if !ACTION_WORDS.iter().any(|w| lower.contains(w)) {
        return None;
    }

    Some(tip.chars().take(MAX_TIP_CHARS).collect())
}
