// src/sources/mod.rs
//! Typed fetch boundary. Upstream payloads are decoded into tagged record
//! types here; nothing downstream sees raw JSON.

pub mod places;
pub mod reddit;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// A single end-user review attached to a place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub author: String,
    pub rating: f64,
    pub text: String,
    pub time: i64,
}

/// One record from the places directory. Optional fields stay optional —
/// the scorer treats absent numerics as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceRecord {
    pub place_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub types: Vec<String>,
    pub formatted_address: Option<String>,
    pub editorial_summary: Option<String>,
    pub formatted_url: Option<String>,
    pub location: Option<GeoPoint>,
    pub reviews: Vec<Review>,
}

/// One post from the social discussion source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub selftext: Option<String>,
    pub score: u64,
    pub num_comments: u64,
    pub created_utc: u64,
    pub permalink: String,
    pub subreddit: String,
    pub over_18: bool,
}

/// One page of a paged search, with the continuation token when the
/// upstream has more.
#[derive(Debug, Clone, Default)]
pub struct SourcePage<T> {
    pub items: Vec<T>,
    pub next_page_token: Option<String>,
}

/// Failure of a single upstream call. Never fatal to an aggregation — the
/// caller treats it as "zero items from this source" and moves on.
#[derive(Debug)]
pub enum SourceError {
    /// Transport error, non-success status, or undecodable payload.
    Unavailable(String),
    /// Upstream explicitly signaled throttling. Handled like `Unavailable`,
    /// but callers keep their backoff delay elevated.
    RateLimited,
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Unavailable(msg) => write!(f, "source unavailable: {msg}"),
            SourceError::RateLimited => write!(f, "source rate limited"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Time window for "top" listings and searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Week,
    Month,
}

impl TimeWindow {
    pub fn as_param(&self) -> &'static str {
        match self {
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
        }
    }
}

/// Places directory: text search with pagination tokens, plus a per-place
/// details lookup.
#[async_trait]
pub trait PlacesSource: Send + Sync {
    /// Fetch one page of results for `query`, optionally biased toward a
    /// location. Pass the previous page's token to continue.
    async fn search_page(
        &self,
        query: &str,
        bias: Option<GeoPoint>,
        page_token: Option<&str>,
    ) -> Result<SourcePage<PlaceRecord>, SourceError>;

    /// Detailed record (address, reviews, editorial summary) for one place.
    async fn details(&self, place_id: &str) -> Result<Option<PlaceRecord>, SourceError>;

    fn name(&self) -> &'static str;
}

/// Social discussion source: subreddit listings and scoped search.
#[async_trait]
pub trait PostsSource: Send + Sync {
    async fn hot(&self, subreddit: &str, limit: u32) -> Result<Vec<PostRecord>, SourceError>;

    async fn top(
        &self,
        subreddit: &str,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<PostRecord>, SourceError>;

    async fn search(
        &self,
        subreddit: &str,
        query: &str,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<PostRecord>, SourceError>;

    fn name(&self) -> &'static str;
}
