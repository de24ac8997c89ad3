// src/tips.rs
//! Tip extraction: sweep advice-heavy subreddits, keep titles the
//! relevance gate accepts, and rewrite them into imperative one-liners.

use metrics::counter;
use serde::Serialize;

use crate::dedupe::dedupe_by_similarity;
use crate::heuristics::category::{categorize_tip, TipCategory};
use crate::heuristics::relevance::is_tip_candidate;
use crate::heuristics::transform::actionable_tip;
use crate::sources::{PostsSource, TimeWindow};

pub const TIP_SUBREDDITS: &[&str] = &["JapanTravel", "JapanTravelTips", "Tokyo", "travel"];

const SEARCH_LIMIT: u32 = 100;
const MIN_UPVOTES: u64 = 5;
const SHORTLIST_LEN: usize = 50;
const MAX_TIPS: usize = 20;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TravelTip {
    pub text: String,
    pub category: TipCategory,
    pub source: &'static str,
    pub upvotes: u64,
}

/// Collect up to twenty actionable tips for `city`. Subreddits that fail
/// are skipped; an empty sweep yields an empty list.
pub async fn extract_tips(posts: &dyn PostsSource, city: &str) -> Vec<TravelTip> {
    let mut tips: Vec<TravelTip> = Vec::new();

    for subreddit in TIP_SUBREDDITS {
        let found = match posts
            .search(subreddit, city, TimeWindow::Month, SEARCH_LIMIT)
            .await
        {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(source = posts.name(), %subreddit, error = %err, "tip sweep failed");
                counter!("aggregate_branch_failures_total", "branch" => "tips").increment(1);
                continue;
            }
        };

        for post in found {
            if post.score <= MIN_UPVOTES {
                counter!("posts_filtered_total", "pipeline" => "tips", "reason" => "upvotes")
                    .increment(1);
                continue;
            }
            if !is_tip_candidate(&post.title, post.selftext.as_deref()) {
                counter!("posts_filtered_total", "pipeline" => "tips", "reason" => "relevance")
                    .increment(1);
                continue;
            }
            // Categorize the raw title; the rewrite templates inject words
            // ("budget accordingly", ...) that would skew the category.
            let category = categorize_tip(&post.title);
            let Some(text) = actionable_tip(&post.title) else {
                counter!("posts_filtered_total", "pipeline" => "tips", "reason" => "transform")
                    .increment(1);
                continue;
            };
            tips.push(TravelTip {
                text,
                category,
                source: "reddit",
                upvotes: post.score,
            });
        }
    }

    // Shortlist the strongest candidates before the quadratic dedupe pass.
    tips.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));
    tips.truncate(SHORTLIST_LEN);
    let before = tips.len();
    let mut tips = dedupe_by_similarity(tips, |t| t.text.as_str());
    counter!("posts_deduped_total", "pipeline" => "tips")
        .increment((before - tips.len()) as u64);
    tips.truncate(MAX_TIPS);
    tips
}
