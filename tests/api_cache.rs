// tests/api_cache.rs
//
// Response-cache behavior through the HTTP surface:
// - MISS → HIT for an identical request (via the `X-Cache` header)
// - expiry after the configured TTL turns the next read into a MISS

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt as _;

use travelpulse::cache::Clock;
use travelpulse::config::CacheConfig;
use travelpulse::geo::GeoPoint;
use travelpulse::sources::{
    PlaceRecord, PlacesSource, PostRecord, PostsSource, SourceError, SourcePage, TimeWindow,
};
use travelpulse::{create_router, Aggregator, AppState};

struct ManualClock(AtomicU64);

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

impl ManualClock {
    fn advance(&self, ms: u64) {
        self.0.fetch_add(ms, Ordering::SeqCst);
    }
}

struct EmptyPlaces;

struct FivePlaces;

#[async_trait]
impl PlacesSource for FivePlaces {
    async fn search_page(
        &self,
        _: &str,
        _: Option<GeoPoint>,
        _: Option<&str>,
    ) -> Result<SourcePage<PlaceRecord>, SourceError> {
        let names = [
            "Ichiran Shibuya",
            "Afuri Harajuku",
            "Uobei Sushi",
            "Gyukatsu Motomura",
            "Tsuta Sugamo",
        ];
        Ok(SourcePage {
            items: names
                .iter()
                .enumerate()
                .map(|(i, name)| PlaceRecord {
                    place_id: format!("p{i}"),
                    name: (*name).to_string(),
                    rating: Some(4.0 + i as f64 * 0.1),
                    user_ratings_total: Some(100),
                    types: vec!["restaurant".to_string()],
                    ..Default::default()
                })
                .collect(),
            next_page_token: None,
        })
    }

    async fn details(&self, _: &str) -> Result<Option<PlaceRecord>, SourceError> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "five-places"
    }
}

#[async_trait]
impl PlacesSource for EmptyPlaces {
    async fn search_page(
        &self,
        _: &str,
        _: Option<GeoPoint>,
        _: Option<&str>,
    ) -> Result<SourcePage<PlaceRecord>, SourceError> {
        Ok(SourcePage::default())
    }

    async fn details(&self, _: &str) -> Result<Option<PlaceRecord>, SourceError> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "empty-places"
    }
}

struct EmptyPosts;

#[async_trait]
impl PostsSource for EmptyPosts {
    async fn hot(&self, _: &str, _: u32) -> Result<Vec<PostRecord>, SourceError> {
        Ok(Vec::new())
    }

    async fn top(&self, _: &str, _: TimeWindow, _: u32) -> Result<Vec<PostRecord>, SourceError> {
        Ok(Vec::new())
    }

    async fn search(
        &self,
        _: &str,
        _: &str,
        _: TimeWindow,
        _: u32,
    ) -> Result<Vec<PostRecord>, SourceError> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "empty-posts"
    }
}

fn test_router(clock: Arc<ManualClock>, ttl: Duration) -> Router {
    let posts: Arc<dyn PostsSource> = Arc::new(EmptyPosts);
    let aggregator = Aggregator::new(Arc::new(EmptyPlaces), posts.clone());
    let cache_cfg = CacheConfig {
        response_ttl: ttl,
        ..CacheConfig::default()
    };
    create_router(AppState::new(aggregator, posts, cache_cfg, clock))
}

async fn cache_header(app: &Router, uri: &str) -> String {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("oneshot");
    resp.headers()
        .get("x-cache")
        .expect("X-Cache header must be present")
        .to_str()
        .expect("X-Cache header must be valid ASCII")
        .to_string()
}

async fn item_count(app: &Router, uri: &str) -> usize {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("oneshot");
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
    payload.as_array().expect("array payload").len()
}

#[tokio::test]
async fn per_category_limit_is_part_of_the_cache_key() {
    let clock = Arc::new(ManualClock(AtomicU64::new(0)));
    let posts: Arc<dyn PostsSource> = Arc::new(EmptyPosts);
    let aggregator = Aggregator::new(Arc::new(FivePlaces), posts.clone());
    let app = create_router(AppState::new(
        aggregator,
        posts,
        CacheConfig::default(),
        clock,
    ));

    let narrow = "/trending?city=Tokyo&country=Japan&limitPerCategory=1";
    assert_eq!(item_count(&app, narrow).await, 1);

    // A wider limit must not be served the narrow cached payload.
    let wide = "/trending?city=Tokyo&country=Japan&limitPerCategory=30";
    assert_eq!(item_count(&app, wide).await, 5);
    assert_eq!(cache_header(&app, wide).await, "HIT");
}

#[tokio::test]
async fn identical_trending_request_hits_until_the_ttl_expires() {
    let clock = Arc::new(ManualClock(AtomicU64::new(1_000)));
    let app = test_router(clock.clone(), Duration::from_secs(600));

    let uri = "/trending?city=Tokyo&country=Japan";
    assert_eq!(cache_header(&app, uri).await, "MISS");
    assert_eq!(cache_header(&app, uri).await, "HIT");

    // still inside the window
    clock.advance(599_999);
    assert_eq!(cache_header(&app, uri).await, "HIT");

    // now == expiry is already a miss
    clock.advance(1);
    assert_eq!(cache_header(&app, uri).await, "MISS");
}

#[tokio::test]
async fn stories_and_tips_caches_are_independent() {
    let clock = Arc::new(ManualClock(AtomicU64::new(0)));
    let app = test_router(clock, Duration::from_secs(600));

    assert_eq!(cache_header(&app, "/tips?city=Tokyo").await, "MISS");
    assert_eq!(
        cache_header(&app, "/stories?country=Japan&city=Tokyo").await,
        "MISS"
    );
    assert_eq!(cache_header(&app, "/tips?city=Tokyo").await, "HIT");
    assert_eq!(
        cache_header(&app, "/stories?country=Japan&city=Tokyo").await,
        "HIT"
    );
}
