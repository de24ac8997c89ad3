// src/main.rs
use anyhow::Context;
use axum::routing::get;
use metrics::gauge;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::sync::Arc;

use travelpulse::cache::SystemClock;
use travelpulse::config::{self, CacheConfig, PacerConfig};
use travelpulse::sources::places::GooglePlacesClient;
use travelpulse::sources::reddit::RedditClient;
use travelpulse::{create_router, Aggregator, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let pacer_cfg = PacerConfig::from_env();
    let cache_cfg = CacheConfig::from_env();
    let clock = Arc::new(SystemClock);

    // A missing key degrades place searches to empty branches instead of
    // refusing to start.
    let api_key = std::env::var(config::ENV_PLACES_API_KEY).ok();
    if api_key.is_none() {
        tracing::warn!("no places API key configured; place searches will be skipped");
    }

    let places = Arc::new(GooglePlacesClient::new(
        api_key,
        "Japan",
        pacer_cfg.clone(),
        cache_cfg.clone(),
        clock.clone(),
    ));
    let posts = Arc::new(RedditClient::new(pacer_cfg));

    let aggregator = Aggregator::new(places, posts.clone());
    let state = AppState::new(aggregator, posts, cache_cfg.clone(), clock);

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .expect("prometheus: install recorder");
    // Static gauge with the configured TTL (absolute, no sliding refresh)
    gauge!("response_cache_ttl_secs").set(cache_cfg.response_ttl.as_secs() as f64);

    let app = create_router(state).route(
        "/metrics",
        get(move || {
            let h = prometheus.clone();
            async move { h.render() }
        }),
    );

    let port = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}
