// src/heuristics/mod.rs
//! Text heuristics shared by the aggregation pipelines: normalization,
//! relevance gates, category assignment, and the actionable-tip transform.

pub mod category;
pub mod relevance;
pub mod transform;

use once_cell::sync::OnceCell;
use regex::Regex;
use tracing::debug;

use crate::config::ENV_DEV_LOG;

/// Normalize raw upstream text: decode HTML entities, strip tags, collapse
/// whitespace, trim.
pub fn normalize_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").expect("whitespace regex"));
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Lowercase exact-match fingerprint used by the orchestrator's coarse
/// title dedup pass.
pub fn title_key(title: &str) -> String {
    title.to_lowercase()
}

// Dev logging gate: TRAVELPULSE_DEV_LOG=1 AND a debug build.
pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_DEV_LOG).ok().as_deref() == Some("1");
    on && cfg!(debug_assertions)
}

// Short anonymized fingerprint for dev diagnostics; raw titles are never
// logged.
pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Minimal, anonymized dev logger for relevance verdicts.
pub(crate) fn dev_log_verdict(event: &str, text: &str, reason: &str) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(text);
    debug!(target: "heuristics", %id, event, reason);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_decodes_and_strips() {
        let out = normalize_text("<b>Hello&nbsp;&nbsp;world</b>  &amp; more ");
        assert_eq!(out, "Hello world & more");
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        assert_eq!(anon_hash("x"), anon_hash("x"));
        assert_eq!(anon_hash("x").len(), 12);
    }
}
