// src/sources/places.rs
//! Google Places client: text search with continuation tokens and a
//! details endpoint, decoded into `PlaceRecord` at the boundary.

use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

use crate::cache::{Clock, TtlCache};
use crate::config::{self, CacheConfig, PacerConfig};
use crate::geo::{self, GeoPoint};
use crate::pacing::RequestPacer;

use super::{PlaceRecord, PlacesSource, Review, SourceError, SourcePage};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const DETAILS_FIELDS: &str =
    "name,rating,reviews,user_ratings_total,types,formatted_url,formatted_address,geometry,editorial_summary";

pub struct GooglePlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    region: Option<String>,
    pacer: RequestPacer,
    details_cache: TtlCache<PlaceRecord>,
    details_ttl: std::time::Duration,
}

impl GooglePlacesClient {
    pub fn new(
        api_key: Option<String>,
        country: &str,
        pacer_cfg: PacerConfig,
        cache_cfg: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config::SEARCH_TIMEOUT)
            .build()
            .expect("http client");
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            region: geo::region_code(country).map(str::to_string),
            pacer: RequestPacer::new(pacer_cfg),
            details_cache: TtlCache::new("place_details", clock),
            details_ttl: cache_cfg.details_ttl,
        }
    }

    /// Point the client at a different host (tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn key(&self) -> Result<&str, SourceError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| SourceError::Unavailable("missing places API key".into()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SourceError> {
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
            counter!("fetch_errors_total", "source" => "places", "kind" => "rate_limited")
                .increment(1);
            return Err(SourceError::RateLimited);
        }
        if !status.is_success() {
            counter!("fetch_errors_total", "source" => "places", "kind" => "status").increment(1);
            return Err(SourceError::Unavailable(format!("status {status}")));
        }

        let decoded = resp
            .json::<T>()
            .await
            .map_err(|e| SourceError::Unavailable(format!("decode: {e}")))?;
        histogram!("fetch_latency_ms", "source" => "places")
            .record(t0.elapsed().as_secs_f64() * 1_000.0);
        Ok(decoded)
    }
}

#[async_trait]
impl PlacesSource for GooglePlacesClient {
    async fn search_page(
        &self,
        query: &str,
        bias: Option<GeoPoint>,
        page_token: Option<&str>,
    ) -> Result<SourcePage<PlaceRecord>, SourceError> {
        let key = self.key()?.to_string();

        // A just-issued continuation token is not valid immediately.
        if page_token.is_some() {
            self.pacer.pace_page_token().await;
        } else {
            self.pacer.pace().await;
        }

        let url = format!("{}/textsearch/json", self.base_url);
        let location;
        let mut params: Vec<(&str, &str)> =
            vec![("query", query), ("key", key.as_str()), ("language", "en")];
        if let Some(region) = &self.region {
            params.push(("region", region));
        }
        if let Some(p) = bias {
            location = format!("{},{}", p.lat, p.lng);
            params.push(("location", location.as_str()));
            params.push(("radius", "25000"));
        }
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }

        let body: SearchResponse = self.get_json(&url, &params).await?;
        if matches!(body.status.as_deref(), Some("OVER_QUERY_LIMIT")) {
            return Err(SourceError::RateLimited);
        }

        let items: Vec<PlaceRecord> = body.results.into_iter().map(PlaceRecord::from).collect();
        counter!("fetch_items_total", "source" => "places").increment(items.len() as u64);
        Ok(SourcePage {
            items,
            next_page_token: body.next_page_token,
        })
    }

    async fn details(&self, place_id: &str) -> Result<Option<PlaceRecord>, SourceError> {
        if let Some(hit) = self.details_cache.get(place_id) {
            return Ok(Some(hit));
        }

        let key = self.key()?.to_string();
        self.pacer.pace().await;

        let url = format!("{}/details/json", self.base_url);
        let params = [
            ("place_id", place_id),
            ("fields", DETAILS_FIELDS),
            ("key", key.as_str()),
        ];
        let body: DetailsResponse = self.get_json(&url, &params).await?;

        let Some(wire) = body.result else {
            return Ok(None);
        };
        let mut record = PlaceRecord::from(wire);
        if record.place_id.is_empty() {
            record.place_id = place_id.to_string();
        }
        self.details_cache
            .set(place_id, record.clone(), self.details_ttl);
        Ok(Some(record))
    }

    fn name(&self) -> &'static str {
        "Google Places"
    }
}

/* ----------------------------
Wire types
---------------------------- */

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<WirePlace>,
    next_page_token: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<WirePlace>,
}

#[derive(Debug, Default, Deserialize)]
struct WirePlace {
    #[serde(default)]
    place_id: String,
    #[serde(default)]
    name: String,
    rating: Option<f64>,
    user_ratings_total: Option<u64>,
    #[serde(default)]
    types: Vec<String>,
    formatted_address: Option<String>,
    formatted_url: Option<String>,
    editorial_summary: Option<WireSummary>,
    geometry: Option<WireGeometry>,
    #[serde(default)]
    reviews: Vec<WireReview>,
}

#[derive(Debug, Deserialize)]
struct WireSummary {
    overview: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireGeometry {
    location: Option<WireLocation>,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct WireReview {
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    text: String,
    #[serde(default)]
    time: i64,
}

impl From<WirePlace> for PlaceRecord {
    fn from(w: WirePlace) -> Self {
        PlaceRecord {
            place_id: w.place_id,
            name: w.name,
            rating: w.rating,
            user_ratings_total: w.user_ratings_total,
            types: w.types,
            formatted_address: w.formatted_address,
            editorial_summary: w.editorial_summary.and_then(|s| s.overview),
            formatted_url: w.formatted_url,
            location: w
                .geometry
                .and_then(|g| g.location)
                .map(|l| GeoPoint::new(l.lat, l.lng)),
            reviews: w
                .reviews
                .into_iter()
                .map(|r| Review {
                    author: r.author_name,
                    rating: r.rating,
                    text: r.text,
                    time: r.time,
                })
                .collect(),
        }
    }
}
