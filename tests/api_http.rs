// tests/api_http.rs
//
// HTTP-level tests for the public Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /trending  (payload shape + X-Cache MISS → HIT)
// - GET /tips
// - GET /stories/subreddit (parameter validation)

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as Json;
use std::sync::Arc;
use tower::ServiceExt as _; // for `oneshot`

use travelpulse::cache::SystemClock;
use travelpulse::config::CacheConfig;
use travelpulse::geo::GeoPoint;
use travelpulse::sources::{
    PlaceRecord, PlacesSource, PostRecord, PostsSource, SourceError, SourcePage, TimeWindow,
};
use travelpulse::{create_router, Aggregator, AppState};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

struct StubPlaces;

#[async_trait]
impl PlacesSource for StubPlaces {
    async fn search_page(
        &self,
        _: &str,
        _: Option<GeoPoint>,
        _: Option<&str>,
    ) -> Result<SourcePage<PlaceRecord>, SourceError> {
        Ok(SourcePage {
            items: vec![PlaceRecord {
                place_id: "p1".to_string(),
                name: "Ichiran Shibuya".to_string(),
                rating: Some(4.5),
                user_ratings_total: Some(200),
                types: vec!["restaurant".to_string()],
                ..Default::default()
            }],
            next_page_token: None,
        })
    }

    async fn details(&self, _: &str) -> Result<Option<PlaceRecord>, SourceError> {
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "stub-places"
    }
}

struct StubPosts;

#[async_trait]
impl PostsSource for StubPosts {
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
        Ok(vec![PostRecord {
            id: "t1".to_string(),
            title: "Make sure you buy the JR pass before your first time visit to Japan"
                .to_string(),
            score: 42,
            subreddit: "JapanTravel".to_string(),
            ..Default::default()
        }])
    }

    fn name(&self) -> &'static str {
        "stub-posts"
    }
}

/// Build the same Router the binary uses, backed by stub sources.
fn test_router() -> Router {
    let posts: Arc<dyn PostsSource> = Arc::new(StubPosts);
    let aggregator = Aggregator::new(Arc::new(StubPlaces), posts.clone());
    let state = AppState::new(
        aggregator,
        posts,
        CacheConfig::default(),
        Arc::new(SystemClock),
    );
    create_router(state)
}

async fn body_json(resp: axum::response::Response) -> Json {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_returns_200_and_ok_body() {
    let app = test_router();

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    assert_eq!(String::from_utf8(bytes).expect("utf8").trim(), "OK");
}

#[tokio::test]
async fn trending_misses_then_hits_the_cache() {
    let app = test_router();

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/trending?city=Tokyo&country=Japan")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("oneshot /trending");
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(
        first.headers().get("x-cache").map(|v| v.to_str().unwrap()),
        Some("MISS")
    );

    let payload = body_json(first).await;
    let items = payload.as_array().expect("array payload");
    assert!(!items.is_empty());
    assert_eq!(items[0]["title"], "Ichiran Shibuya");
    assert_eq!(items[0]["type"], "place");
    assert_eq!(items[0]["category"], "Food");

    let second = app
        .oneshot(
            Request::builder()
                .uri("/trending?city=Tokyo&country=Japan")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("oneshot /trending again");
    assert_eq!(
        second.headers().get("x-cache").map(|v| v.to_str().unwrap()),
        Some("HIT")
    );
}

#[tokio::test]
async fn non_numeric_limit_falls_back_to_the_default() {
    let app = test_router();

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/trending?city=Tokyo&country=Japan&limitPerCategory=abc")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("oneshot /trending");
    assert_eq!(resp.status(), StatusCode::OK);

    let payload = body_json(resp).await;
    assert!(!payload.as_array().expect("array payload").is_empty());
}

#[tokio::test]
async fn different_coordinates_are_distinct_cache_entries() {
    let app = test_router();

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/trending?lat=35.6762&lng=139.6503")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("oneshot");
    assert_eq!(
        first.headers().get("x-cache").map(|v| v.to_str().unwrap()),
        Some("MISS")
    );

    let other = app
        .oneshot(
            Request::builder()
                .uri("/trending?lat=34.6937&lng=135.5023")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("oneshot");
    assert_eq!(
        other.headers().get("x-cache").map(|v| v.to_str().unwrap()),
        Some("MISS"),
        "a different coordinate bucket must not share a cache entry"
    );
}

#[tokio::test]
async fn tips_returns_actionable_items() {
    let app = test_router();

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/tips?city=Tokyo")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("oneshot /tips");
    assert_eq!(resp.status(), StatusCode::OK);

    let payload = body_json(resp).await;
    let items = payload.as_array().expect("array payload");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["source"], "reddit");
    assert_eq!(items[0]["upvotes"], 42);
    assert!(items[0]["text"].as_str().unwrap().ends_with('.'));
}

#[tokio::test]
async fn stories_subreddit_requires_the_subreddit_parameter() {
    let app = test_router();

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/stories/subreddit?country=Japan&city=Tokyo")
                .body(Body::empty())
                .expect("build request"),
        )
        .await
        .expect("oneshot /stories/subreddit");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let payload = body_json(resp).await;
    assert!(payload["error"].as_str().unwrap().contains("subreddit"));
}
