// src/stories.rs
//! Story extraction: recent well-received trip reports from country-mapped
//! subreddits, or from one caller-chosen subreddit.

use metrics::counter;
use serde::Serialize;

use crate::geo;
use crate::heuristics::relevance::is_story_candidate;
use crate::sources::{PostRecord, PostsSource, TimeWindow};

const LISTING_LIMIT: u32 = 5;
const MIN_STORY_SCORE: u64 = 10;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TravelStory {
    pub id: String,
    pub title: String,
    pub subreddit: String,
    pub upvotes: u64,
    pub comments: u64,
    pub created: u64,
    pub url: String,
}

fn to_story(post: PostRecord) -> TravelStory {
    TravelStory {
        id: post.id,
        title: post.title,
        subreddit: post.subreddit,
        upvotes: post.score,
        comments: post.num_comments,
        created: post.created_utc,
        url: format!("https://reddit.com{}", post.permalink),
    }
}

/// Collect recent stories for `country` from its mapped subreddits.
pub async fn extract_stories(
    posts: &dyn PostsSource,
    country: &str,
    _city: &str,
) -> Vec<TravelStory> {
    let mut stories = Vec::new();

    for subreddit in geo::story_subreddits(country) {
        let found = match posts.top(subreddit, TimeWindow::Week, LISTING_LIMIT).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(source = posts.name(), %subreddit, error = %err, "story sweep failed");
                counter!("aggregate_branch_failures_total", "branch" => "stories").increment(1);
                continue;
            }
        };

        stories.extend(
            found
                .into_iter()
                .filter(|p| {
                    p.score >= MIN_STORY_SCORE
                        && is_story_candidate(&p.title, p.over_18, &p.subreddit, Some(country))
                })
                .map(to_story),
        );
    }

    stories
}

/// Collect stories from a single subreddit, scoped to the city's search
/// keywords.
pub async fn stories_from_subreddit(
    posts: &dyn PostsSource,
    subreddit: &str,
    country: &str,
    city: &str,
) -> Vec<TravelStory> {
    let query = geo::city_search_keywords(country, city).join(" OR ");

    let found = match posts
        .search(subreddit, &query, TimeWindow::Week, LISTING_LIMIT)
        .await
    {
        Ok(found) => found,
        Err(err) => {
            tracing::warn!(source = posts.name(), %subreddit, error = %err, "story search failed");
            counter!("aggregate_branch_failures_total", "branch" => "stories").increment(1);
            return Vec::new();
        }
    };

    found
        .into_iter()
        .filter(|p| {
            p.score >= MIN_STORY_SCORE
                && is_story_candidate(&p.title, p.over_18, &p.subreddit, Some(country))
        })
        .map(to_story)
        .collect()
}
