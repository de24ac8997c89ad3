// src/api.rs
//! HTTP surface. Every content route is cache-aside over `TtlCache` and
//! reports the outcome in an `X-Cache` header.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Deserializer};
use tower_http::cors::CorsLayer;

use crate::cache::{response_key, Clock, TtlCache};
use crate::config::CacheConfig;
use crate::geo::GeoPoint;
use crate::sources::PostsSource;
use crate::stories::{self, TravelStory};
use crate::tips::{self, TravelTip};
use crate::trending::{Aggregator, RankedItem, MAX_LIMIT_PER_CATEGORY, MIN_LIMIT_PER_CATEGORY};

const DEFAULT_CITY: &str = "Tokyo";
const DEFAULT_COUNTRY: &str = "Japan";
const DEFAULT_LIMIT_PER_CATEGORY: usize = 10;

const CACHE_HEADER: &str = "x-cache";

#[derive(Clone)]
pub struct AppState {
    aggregator: Arc<Aggregator>,
    posts: Arc<dyn PostsSource>,
    cache_cfg: CacheConfig,
    trending_cache: Arc<TtlCache<Vec<RankedItem>>>,
    tips_cache: Arc<TtlCache<Vec<TravelTip>>>,
    stories_cache: Arc<TtlCache<Vec<TravelStory>>>,
}

impl AppState {
    pub fn new(
        aggregator: Aggregator,
        posts: Arc<dyn PostsSource>,
        cache_cfg: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            posts,
            cache_cfg,
            trending_cache: Arc::new(TtlCache::new("trending", clock.clone())),
            tips_cache: Arc::new(TtlCache::new("tips", clock.clone())),
            stories_cache: Arc::new(TtlCache::new("stories", clock)),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/trending", get(trending))
        .route("/tips", get(tips))
        .route("/stories", get(stories))
        .route("/stories/subreddit", get(stories_subreddit))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Deserialize)]
struct TrendingQuery {
    city: Option<String>,
    country: Option<String>,
    #[serde(rename = "limitPerCategory", default, deserialize_with = "lenient_usize")]
    limit_per_category: Option<usize>,
    lat: Option<f64>,
    lng: Option<f64>,
}

// Malformed limits fall back to the default instead of failing the request.
fn lenient_usize<'de, D>(de: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.and_then(|s| s.trim().parse().ok()))
}

async fn trending(
    State(state): State<AppState>,
    Query(q): Query<TrendingQuery>,
) -> impl IntoResponse {
    let city = q.city.unwrap_or_else(|| DEFAULT_CITY.to_string());
    let country = q.country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
    let limit = q
        .limit_per_category
        .unwrap_or(DEFAULT_LIMIT_PER_CATEGORY)
        .clamp(MIN_LIMIT_PER_CATEGORY, MAX_LIMIT_PER_CATEGORY);
    let gps = match (q.lat, q.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };

    // The per-category limit changes the payload, so it is part of the key.
    let key = format!(
        "{}_lim{limit}",
        response_key("trending", &country, &city, gps)
    );
    if let Some(items) = state.trending_cache.get(&key) {
        return ([(CACHE_HEADER, "HIT")], Json(items));
    }

    let items = state.aggregator.aggregate(&city, &country, limit, gps).await;
    state
        .trending_cache
        .set(key, items.clone(), state.cache_cfg.response_ttl);
    ([(CACHE_HEADER, "MISS")], Json(items))
}

#[derive(Deserialize)]
struct TipsQuery {
    city: Option<String>,
}

async fn tips(State(state): State<AppState>, Query(q): Query<TipsQuery>) -> impl IntoResponse {
    let city = q.city.unwrap_or_else(|| DEFAULT_CITY.to_string());

    let key = format!("tips_v1_{city}");
    if let Some(found) = state.tips_cache.get(&key) {
        return ([(CACHE_HEADER, "HIT")], Json(found));
    }

    let found = tips::extract_tips(state.posts.as_ref(), &city).await;
    state
        .tips_cache
        .set(key, found.clone(), state.cache_cfg.response_ttl);
    ([(CACHE_HEADER, "MISS")], Json(found))
}

#[derive(Deserialize)]
struct StoriesQuery {
    country: Option<String>,
    city: Option<String>,
}

async fn stories(
    State(state): State<AppState>,
    Query(q): Query<StoriesQuery>,
) -> impl IntoResponse {
    let country = q.country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
    let city = q.city.unwrap_or_else(|| DEFAULT_CITY.to_string());

    let key = response_key("stories", &country, &city, None);
    if let Some(found) = state.stories_cache.get(&key) {
        return ([(CACHE_HEADER, "HIT")], Json(found));
    }

    let found = stories::extract_stories(state.posts.as_ref(), &country, &city).await;
    state
        .stories_cache
        .set(key, found.clone(), state.cache_cfg.response_ttl);
    ([(CACHE_HEADER, "MISS")], Json(found))
}

#[derive(Deserialize)]
struct SubredditQuery {
    subreddit: Option<String>,
    country: Option<String>,
    city: Option<String>,
}

async fn stories_subreddit(
    State(state): State<AppState>,
    Query(q): Query<SubredditQuery>,
) -> Response {
    let Some(subreddit) = q.subreddit.filter(|s| !s.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "missing 'subreddit' parameter" })),
        )
            .into_response();
    };
    let country = q.country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string());
    let city = q.city.unwrap_or_else(|| DEFAULT_CITY.to_string());

    let key = format!("stories_sub_v1_{subreddit}_{country}_{city}");
    if let Some(found) = state.stories_cache.get(&key) {
        return ([(CACHE_HEADER, "HIT")], Json(found)).into_response();
    }

    let found =
        stories::stories_from_subreddit(state.posts.as_ref(), &subreddit, &country, &city).await;
    state
        .stories_cache
        .set(key, found.clone(), state.cache_cfg.response_ttl);
    ([(CACHE_HEADER, "MISS")], Json(found)).into_response()
}
