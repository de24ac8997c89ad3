// src/config.rs
//! Env-overridable tunables with compiled defaults.
//!
//! The pacing delays were tuned empirically against the upstream providers'
//! throttling behavior; treat them as configuration, not contract.

use std::time::Duration;

pub const ENV_PLACES_API_KEY: &str = "TRAVELPULSE_PLACES_API_KEY";
pub const ENV_PACE_BASE_MS: &str = "TRAVELPULSE_PACE_BASE_MS";
pub const ENV_PACE_STEP_MS: &str = "TRAVELPULSE_PACE_STEP_MS";
pub const ENV_PACE_CAP_MS: &str = "TRAVELPULSE_PACE_CAP_MS";
pub const ENV_PACE_PAGE_TOKEN_MS: &str = "TRAVELPULSE_PACE_PAGE_TOKEN_MS";
pub const ENV_CACHE_TTL_SECS: &str = "TRAVELPULSE_CACHE_TTL_SECS";
pub const ENV_DEV_LOG: &str = "TRAVELPULSE_DEV_LOG";

pub const DEFAULT_PACE_BASE_MS: u64 = 1000;
pub const DEFAULT_PACE_STEP_MS: u64 = 500;
pub const DEFAULT_PACE_CAP_MS: u64 = 3000;
pub const DEFAULT_PACE_PAGE_TOKEN_MS: u64 = 2000;

/// Default TTL for aggregated responses (10 minutes).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;
/// TTL for the per-place details cache (10 minutes).
pub const DEFAULT_DETAILS_TTL_SECS: u64 = 600;

/// Per-call ceilings for upstream requests.
pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(5);
pub const LISTING_TIMEOUT: Duration = Duration::from_secs(15);

pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Inter-request delay schedule for one upstream host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacerConfig {
    pub base_ms: u64,
    pub step_ms: u64,
    pub cap_ms: u64,
    pub page_token_ms: u64,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            base_ms: DEFAULT_PACE_BASE_MS,
            step_ms: DEFAULT_PACE_STEP_MS,
            cap_ms: DEFAULT_PACE_CAP_MS,
            page_token_ms: DEFAULT_PACE_PAGE_TOKEN_MS,
        }
    }
}

impl PacerConfig {
    /// Read overrides from the environment, keeping defaults for anything
    /// missing or unparsable. Values are clamped to a sane range so a typo
    /// cannot stall the pipeline for minutes.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            base_ms: parse_ms_env(ENV_PACE_BASE_MS).unwrap_or(d.base_ms),
            step_ms: parse_ms_env(ENV_PACE_STEP_MS).unwrap_or(d.step_ms),
            cap_ms: parse_ms_env(ENV_PACE_CAP_MS).unwrap_or(d.cap_ms),
            page_token_ms: parse_ms_env(ENV_PACE_PAGE_TOKEN_MS).unwrap_or(d.page_token_ms),
        }
    }
}

/// TTLs for the response caches.
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub response_ttl: Duration,
    pub details_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            response_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            details_ttl: Duration::from_secs(DEFAULT_DETAILS_TTL_SECS),
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(secs) = parse_secs_env(ENV_CACHE_TTL_SECS) {
            cfg.response_ttl = Duration::from_secs(secs);
        }
        cfg
    }
}

// parse optional ms env and clamp to <10..=60_000>
fn parse_ms_env(name: &str) -> Option<u64> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(|v| v.clamp(10, 60_000))
}

// parse optional seconds env and clamp to <1..=86_400>
fn parse_secs_env(name: &str) -> Option<u64> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(|v| v.clamp(1, 86_400))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_constants() {
        let cfg = PacerConfig::default();
        assert_eq!(cfg.base_ms, 1000);
        assert_eq!(cfg.step_ms, 500);
        assert_eq!(cfg.cap_ms, 3000);
        assert_eq!(cfg.page_token_ms, 2000);
    }

    #[test]
    fn cache_defaults_are_ten_minutes() {
        let cfg = CacheConfig::default();
        assert_eq!(cfg.response_ttl.as_secs(), 600);
        assert_eq!(cfg.details_ttl.as_secs(), 600);
    }
}
