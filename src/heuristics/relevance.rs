// src/heuristics/relevance.rs
//! Relevance gates for Reddit-derived content.
//!
//! Three independent filters share the same shape (hard rejects first, then
//! keyword inclusion/exclusion):
//! - tip candidates (strict: structure checks + inclusion keyword),
//! - story candidates (country/travel keyword logic per channel kind),
//! - trending posts (loose: any travel keyword in the title).

use crate::geo::{country_keywords, GENERIC_SUBREDDITS};

use super::dev_log_verdict;

/// Inclusion keywords a tip candidate must hit at least once.
pub const TIP_INCLUDE_KEYWORDS: &[&str] = &[
    "tip",
    "advice",
    "recommend",
    "avoid",
    "mistake",
    "don't",
    "itinerary",
    "budget",
    "food",
    "transport",
    "hotel",
    "accommodation",
    "first time",
    "guide",
    "experience",
    "visit",
    "best",
    "better",
    "trick",
    "secret",
    "hidden",
    "worth",
    "must",
    "essential",
];

/// Hard exclusions for both tips and stories.
pub const TIP_EXCLUDE_KEYWORDS: &[&str] = &[
    "photo",
    "picture",
    "image",
    "meme",
    "joke",
    "politics",
    "news",
    "caught",
    "affair",
    "scandal",
    "relationship",
    "dating",
    "reddit meetup",
];

pub const STORY_INCLUDE_KEYWORDS: &[&str] = &[
    "trip",
    "itinerary",
    "experience",
    "recommend",
    "first time",
    "travel",
];

pub const STORY_EXCLUDE_KEYWORDS: &[&str] =
    &["moving to japan", "job", "visa question", "anime"];

/// Loose keyword list for trending post selection.
pub const TRENDING_POST_KEYWORDS: &[&str] = &[
    "recommend",
    "best",
    "must try",
    "hidden gem",
    "avoid",
    "experience",
    "worth it",
    "amazing",
];

// Whole-word verb check; a title without any of these reads as a label or a
// fragment, not advice.
const COMMON_VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "have", "has", "had", "do", "does", "did", "avoid", "try",
    "visit", "go", "take", "use", "get", "book", "stay", "eat", "explore", "skip", "miss",
    "recommend", "suggest", "don't", "shouldn't", "must", "should", "consider", "check", "bring",
];

// Phrases that mark a post as something other than a tip.
const NON_TIP_PATTERNS: &[&str] = &[
    "rate my",
    "photo",
    "picture",
    "image",
    "meme",
    "story of",
    "experience of",
];

const MIN_TIP_TITLE_WORDS: usize = 8;

/// Strict gate deciding whether a post can yield an actionable tip.
pub fn is_tip_candidate(title: &str, selftext: Option<&str>) -> bool {
    let full_text = format!("{} {}", title, selftext.unwrap_or_default()).to_lowercase();

    // Questions are requests for tips, not tips.
    if title.trim().ends_with('?') {
        dev_log_verdict("tip_rejected", title, "question");
        return false;
    }

    if title.split_whitespace().count() < MIN_TIP_TITLE_WORDS {
        dev_log_verdict("tip_rejected", title, "too_short");
        return false;
    }

    let has_verb = COMMON_VERBS
        .iter()
        .any(|v| full_text.split_whitespace().any(|w| w == *v));
    if !has_verb {
        dev_log_verdict("tip_rejected", title, "no_verb");
        return false;
    }

    if NON_TIP_PATTERNS.iter().any(|p| full_text.contains(p)) {
        dev_log_verdict("tip_rejected", title, "non_tip_pattern");
        return false;
    }

    let has_inclusion = TIP_INCLUDE_KEYWORDS.iter().any(|kw| full_text.contains(kw));
    let has_exclusion = TIP_EXCLUDE_KEYWORDS.iter().any(|kw| full_text.contains(kw));

    let keep = has_inclusion && !has_exclusion;
    if keep {
        dev_log_verdict("tip_accepted", title, "keywords_ok");
    } else {
        dev_log_verdict("tip_rejected", title, "keywords");
    }
    keep
}

/// Gate for travel-story posts. Generic channels ("travel", "solotravel",
/// ...) need BOTH a country/city keyword and a travel keyword; a
/// country-specific channel is already scoped, so the country keyword alone
/// is enough. Without a target country only the travel keyword is required.
pub fn is_story_candidate(
    title: &str,
    over_18: bool,
    subreddit: &str,
    country: Option<&str>,
) -> bool {
    let lower_title = title.to_lowercase();

    if over_18 {
        return false;
    }
    if title.trim().ends_with('?') {
        return false;
    }
    if STORY_EXCLUDE_KEYWORDS.iter().any(|kw| lower_title.contains(kw)) {
        return false;
    }
    if TIP_EXCLUDE_KEYWORDS.iter().any(|kw| lower_title.contains(kw)) {
        return false;
    }

    let has_travel_keyword = STORY_INCLUDE_KEYWORDS
        .iter()
        .any(|kw| lower_title.contains(kw));

    let Some(country) = country else {
        return has_travel_keyword;
    };

    let has_country_keyword = country_keywords(country)
        .iter()
        .any(|kw| lower_title.contains(kw));

    let is_generic = GENERIC_SUBREDDITS
        .iter()
        .any(|s| s.eq_ignore_ascii_case(subreddit));

    if is_generic {
        has_country_keyword && has_travel_keyword
    } else {
        has_country_keyword
    }
}

/// Loose gate for trending feed posts: any travel keyword in the title.
pub fn is_trending_candidate(title: &str) -> bool {
    let lower = title.to_lowercase();
    TRENDING_POST_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_are_rejected() {
        assert!(!is_tip_candidate("Is Tokyo worth visiting?", None));
    }

    #[test]
    fn short_titles_are_rejected() {
        assert!(!is_tip_candidate("Best ramen tips", None));
    }

    #[test]
    fn imperative_tip_with_keyword_is_accepted() {
        assert!(is_tip_candidate(
            "Avoid eating while walking on crowded Tokyo streets during rush hour",
            None
        ));
    }

    #[test]
    fn verbless_titles_are_rejected() {
        assert!(!is_tip_candidate(
            "Ramen shops alleyways neon lights Shinjuku nightlife district guide map",
            None
        ));
    }

    #[test]
    fn exclusion_keyword_overrides_inclusion() {
        assert!(!is_tip_candidate(
            "You should avoid this famous photo spot because of the crowds",
            None
        ));
    }

    #[test]
    fn non_tip_patterns_are_rejected() {
        assert!(!is_tip_candidate(
            "Rate my itinerary for two weeks going through Tokyo and Kyoto",
            None
        ));
    }

    #[test]
    fn selftext_can_supply_the_inclusion_keyword() {
        assert!(is_tip_candidate(
            "What I learned after spending three weeks riding trains around Kansai",
            Some("My main advice is to get the regional pass early.")
        ));
    }

    #[test]
    fn adult_and_question_stories_are_rejected() {
        assert!(!is_story_candidate("My Japan trip report", true, "JapanTravel", Some("Japan")));
        assert!(!is_story_candidate(
            "Has anyone done a Japan trip in winter?",
            false,
            "JapanTravel",
            Some("Japan")
        ));
    }

    #[test]
    fn generic_channel_needs_country_and_travel_keyword() {
        // country keyword only → not enough on a generic channel
        assert!(!is_story_candidate(
            "Weather in Tokyo this weekend was wild",
            false,
            "travel",
            Some("Japan")
        ));
        assert!(is_story_candidate(
            "My two week Japan trip exceeded all expectations",
            false,
            "travel",
            Some("Japan")
        ));
    }

    #[test]
    fn country_channel_needs_only_country_keyword() {
        assert!(is_story_candidate(
            "Cherry blossoms in Kyoto were unreal this year",
            false,
            "JapanTravel",
            Some("Japan")
        ));
    }

    #[test]
    fn no_country_falls_back_to_travel_keyword() {
        assert!(is_story_candidate(
            "First time solo trip lessons learned",
            false,
            "solotravel",
            None
        ));
        assert!(!is_story_candidate(
            "Look at this sunset from my balcony",
            false,
            "solotravel",
            None
        ));
    }

    #[test]
    fn trending_gate_is_loose() {
        assert!(is_trending_candidate("Hidden gem izakaya behind the station"));
        assert!(!is_trending_candidate("Random megathread"));
    }
}
