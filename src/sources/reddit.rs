// src/sources/reddit.rs
//! Reddit listing client. Public JSON endpoints only, no auth; every call
//! goes through the shared pacer so bursts across subreddits stay polite.

use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;
use std::time::Instant;

use crate::config::{self, PacerConfig};
use crate::pacing::RequestPacer;

use super::{PostRecord, PostsSource, SourceError, TimeWindow};

const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

pub struct RedditClient {
    http: reqwest::Client,
    base_url: String,
    pacer: RequestPacer,
}

impl RedditClient {
    pub fn new(pacer_cfg: PacerConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config::LISTING_TIMEOUT)
            .user_agent(config::USER_AGENT)
            .build()
            .expect("http client");
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            pacer: RequestPacer::new(pacer_cfg),
        }
    }

    /// Point the client at a different host (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_listing(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<PostRecord>, SourceError> {
        self.pacer.pace().await;

        let t0 = Instant::now();
        let resp = self
            .http
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            counter!("fetch_errors_total", "source" => "reddit", "kind" => "rate_limited")
                .increment(1);
            return Err(SourceError::RateLimited);
        }
        if !status.is_success() {
            counter!("fetch_errors_total", "source" => "reddit", "kind" => "status").increment(1);
            return Err(SourceError::Unavailable(format!("status {status}")));
        }

        let body = resp
            .json::<Listing>()
            .await
            .map_err(|e| SourceError::Unavailable(format!("decode: {e}")))?;
        histogram!("fetch_latency_ms", "source" => "reddit")
            .record(t0.elapsed().as_secs_f64() * 1_000.0);

        let posts: Vec<PostRecord> = body
            .data
            .children
            .into_iter()
            .map(|c| PostRecord::from(c.data))
            .collect();
        counter!("fetch_items_total", "source" => "reddit").increment(posts.len() as u64);
        Ok(posts)
    }
}

#[async_trait]
impl PostsSource for RedditClient {
    async fn hot(&self, subreddit: &str, limit: u32) -> Result<Vec<PostRecord>, SourceError> {
        let url = format!("{}/r/{}/hot.json", self.base_url, subreddit);
        let limit = limit.to_string();
        self.get_listing(&url, &[("limit", limit.as_str())]).await
    }

    async fn top(
        &self,
        subreddit: &str,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<PostRecord>, SourceError> {
        let url = format!("{}/r/{}/top.json", self.base_url, subreddit);
        let limit = limit.to_string();
        self.get_listing(&url, &[("t", window.as_param()), ("limit", limit.as_str())])
            .await
    }

    async fn search(
        &self,
        subreddit: &str,
        query: &str,
        window: TimeWindow,
        limit: u32,
    ) -> Result<Vec<PostRecord>, SourceError> {
        let url = format!("{}/r/{}/search.json", self.base_url, subreddit);
        let limit = limit.to_string();
        self.get_listing(
            &url,
            &[
                ("q", query),
                ("restrict_sr", "1"),
                ("sort", "top"),
                ("t", window.as_param()),
                ("limit", limit.as_str()),
            ],
        )
        .await
    }

    fn name(&self) -> &'static str {
        "Reddit"
    }
}

/* ----------------------------
Wire types
---------------------------- */

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
struct Child {
    data: WirePost,
}

#[derive(Debug, Default, Deserialize)]
struct WirePost {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    selftext: Option<String>,
    // Scores can go negative on heavily downvoted posts.
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u64,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    subreddit: String,
    #[serde(default)]
    over_18: bool,
}

impl From<WirePost> for PostRecord {
    fn from(w: WirePost) -> Self {
        PostRecord {
            id: w.id,
            title: w.title,
            selftext: w.selftext.filter(|s| !s.is_empty()),
            score: w.score.max(0) as u64,
            num_comments: w.num_comments,
            created_utc: w.created_utc.max(0.0) as u64,
            permalink: w.permalink,
            subreddit: w.subreddit,
            over_18: w.over_18,
        }
    }
}
