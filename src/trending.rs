// src/trending.rs
//! Trending aggregation: fan out over keyword searches and subreddit hot
//! lists, score everything on one scale, then rank per category.

use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::geo::{self, GeoPoint};
use crate::heuristics::category::{categorize_place, PlaceCategory};
use crate::heuristics::relevance::is_trending_candidate;
use crate::heuristics::{normalize_text, title_key};
use crate::scoring::{place_score, post_score};
use crate::sources::{PlaceRecord, PlacesSource, PostsSource, Review};

/// Search probes fanned out per city. Ordering matters only for request
/// scheduling, not for ranking.
pub const TRENDING_KEYWORDS: &[&str] = &[
    "things to do",
    "nightlife",
    "arcade",
    "karaoke",
    "shopping street",
    "theme park",
    "popular tourist destinations",
    "top sights",
    "famous landmarks",
    "iconic places",
    "attractions",
    "landmarks",
    "temples",
    "shrines",
    "museums",
    "gardens",
    "parks",
    "viewpoints",
    "scenic spots",
    "historical sites",
    "cafes",
    "hot springs",
    "observation decks",
];

pub const MIN_LIMIT_PER_CATEGORY: usize = 1;
pub const MAX_LIMIT_PER_CATEGORY: usize = 30;

const HOT_LISTING_LIMIT: u32 = 25;
const MAX_REDDIT_ITEMS: usize = 10;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("fetch_items_total", "Records fetched from upstream sources.");
        describe_counter!("fetch_errors_total", "Failed upstream calls, by source and kind.");
        describe_counter!(
            "aggregate_branch_failures_total",
            "Aggregation branches that returned no items."
        );
        describe_counter!("aggregate_items_total", "Ranked items produced per aggregation.");
        describe_counter!(
            "posts_filtered_total",
            "Posts dropped by relevance or transform gates."
        );
        describe_counter!("posts_deduped_total", "Posts dropped as near-duplicates.");
        describe_histogram!("fetch_latency_ms", "Upstream call latency in milliseconds.");
    });
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Place,
    Reddit,
}

/// One ranked entry in the trending feed. Field names follow the response
/// contract, so renames here are wire-visible.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upvotes: Option<u64>,
    pub category: PlaceCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_maps_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub trending_score: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

pub struct Aggregator {
    places: Arc<dyn PlacesSource>,
    posts: Arc<dyn PostsSource>,
}

impl Aggregator {
    pub fn new(places: Arc<dyn PlacesSource>, posts: Arc<dyn PostsSource>) -> Self {
        Self { places, posts }
    }

    /// Build the ranked trending feed for one city. Branch failures are
    /// logged and skipped; a feed with every branch down is just empty.
    pub async fn aggregate(
        &self,
        city: &str,
        country: &str,
        limit_per_category: usize,
        user: Option<GeoPoint>,
    ) -> Vec<RankedItem> {
        ensure_metrics_described();

        let limit = limit_per_category.clamp(MIN_LIMIT_PER_CATEGORY, MAX_LIMIT_PER_CATEGORY);
        // Small feeds sample fewer per probe so no keyword dominates.
        let max_per_keyword = if limit <= 10 { 5 } else { 8 };
        let bias = user.or_else(|| geo::city_center(city));

        let mut items: Vec<RankedItem> = Vec::new();

        for keyword in TRENDING_KEYWORDS {
            let query = format!("{keyword} in {city}, {country}");
            let page = match self.places.search_page(&query, bias, None).await {
                Ok(page) => page,
                Err(err) => {
                    tracing::warn!(source = self.places.name(), %keyword, error = %err, "search branch failed");
                    counter!("aggregate_branch_failures_total", "branch" => "places").increment(1);
                    continue;
                }
            };

            for place in page.items.into_iter().take(max_per_keyword) {
                let item = self.place_item(place, city, country).await;
                items.push(item);
            }
        }

        for subreddit in geo::trending_subreddits(city) {
            let posts = match self.posts.hot(&subreddit, HOT_LISTING_LIMIT).await {
                Ok(posts) => posts,
                Err(err) => {
                    tracing::warn!(source = self.posts.name(), %subreddit, error = %err, "hot branch failed");
                    counter!("aggregate_branch_failures_total", "branch" => "posts").increment(1);
                    continue;
                }
            };

            for post in posts
                .into_iter()
                .filter(|p| is_trending_candidate(&p.title))
                .take(MAX_REDDIT_ITEMS)
            {
                items.push(RankedItem {
                    id: format!("reddit-{}", post.id),
                    title: post.title,
                    kind: ItemKind::Reddit,
                    rating: None,
                    reviews_count: None,
                    upvotes: Some(post.score),
                    category: PlaceCategory::Trending,
                    description: post.selftext.map(|s| normalize_text(&s)),
                    url: Some(format!("https://reddit.com{}", post.permalink)),
                    address: None,
                    google_maps_url: None,
                    source: Some(format!("r/{}", post.subreddit)),
                    trending_score: post_score(post.score),
                    reviews: Vec::new(),
                });
            }
        }

        let ranked = rank(items, limit);
        counter!("aggregate_items_total").increment(ranked.len() as u64);
        ranked
    }

    async fn place_item(&self, place: PlaceRecord, city: &str, country: &str) -> RankedItem {
        // Details enrich the search hit; a failed lookup degrades to the
        // search payload rather than dropping the place.
        let detailed = match self.places.details(&place.place_id).await {
            Ok(d) => d,
            Err(err) => {
                tracing::debug!(place = %place.name, error = %err, "details lookup failed");
                None
            }
        };

        let location = detailed
            .as_ref()
            .and_then(|d| d.location)
            .or(place.location);
        let maps_url = maps_url(location, &place.name, city);
        let detailed = detailed.unwrap_or_default();

        let category = categorize_place(&place.types, &place.name, city, country);
        RankedItem {
            id: format!("place-{}", place.place_id),
            title: place.name,
            kind: ItemKind::Place,
            rating: place.rating,
            reviews_count: place.user_ratings_total,
            upvotes: None,
            category,
            description: detailed.editorial_summary.or(place.editorial_summary),
            url: detailed.formatted_url.or(place.formatted_url),
            address: detailed.formatted_address.or(place.formatted_address),
            google_maps_url: maps_url,
            source: None,
            trending_score: place_score(place.rating, place.user_ratings_total),
            reviews: detailed.reviews,
        }
    }
}

/// Drop exact duplicate titles, then rank within each category and cut to
/// `limit` entries per category. Category blocks keep first-appearance
/// order so place categories stay ahead of the reddit block.
fn rank(items: Vec<RankedItem>, limit: usize) -> Vec<RankedItem> {
    let mut seen = std::collections::HashSet::new();
    let mut order: Vec<PlaceCategory> = Vec::new();
    let mut grouped: HashMap<PlaceCategory, Vec<RankedItem>> = HashMap::new();

    for item in items {
        if !seen.insert(title_key(&item.title)) {
            continue;
        }
        if !grouped.contains_key(&item.category) {
            order.push(item.category);
        }
        grouped.entry(item.category).or_default().push(item);
    }

    let mut ranked = Vec::new();
    for category in order {
        let mut bucket = grouped.remove(&category).unwrap_or_default();
        bucket.sort_by(|a, b| b.trending_score.total_cmp(&a.trending_score));
        bucket.truncate(limit);
        ranked.extend(bucket);
    }
    ranked
}

fn maps_url(location: Option<GeoPoint>, name: &str, city: &str) -> Option<String> {
    if let Some(p) = location {
        return Some(format!(
            "https://www.google.com/maps/search/?api=1&query={},{}",
            p.lat, p.lng
        ));
    }
    let query = format!("{name} {city}");
    reqwest::Url::parse_with_params(
        "https://www.google.com/maps/search/",
        &[("api", "1"), ("query", query.as_str())],
    )
    .map(|u| u.to_string())
    .ok()
}
