// src/cache.rs
//! # Response Cache
//! Mutex-guarded key→value store with per-entry absolute TTL.
//!
//! An entry is visible only while `now < expires_at`; a read after expiry is
//! a miss and evicts the entry in place (no background sweep — key
//! cardinality is bounded by city × country × coordinate bucket). The clock
//! is injected so tests can advance time without sleeping.

use metrics::counter;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::geo::GeoPoint;

/// Millisecond clock, injectable for tests.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall clock used by the application root.
#[derive(Debug, Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at_ms: u64,
}

/// Thread-safe TTL cache. Values are immutable once written until the key is
/// overwritten, so a plain mutex is enough.
pub struct TtlCache<V> {
    name: &'static str,
    clock: Arc<dyn Clock>,
    inner: Mutex<HashMap<String, Entry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(name: &'static str, clock: Arc<dyn Clock>) -> Self {
        Self {
            name,
            clock,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Look up `key`. An expired entry behaves as absent and is evicted.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        let mut map = self.inner.lock().expect("cache mutex poisoned");
        match map.get(key) {
            Some(entry) if now < entry.expires_at_ms => {
                counter!("cache_hits_total", "cache" => self.name).increment(1);
                Some(entry.value.clone())
            }
            Some(_) => {
                map.remove(key);
                counter!("cache_misses_total", "cache" => self.name).increment(1);
                None
            }
            None => {
                counter!("cache_misses_total", "cache" => self.name).increment(1);
                None
            }
        }
    }

    /// Insert or overwrite `key` with an absolute expiry of `now + ttl`.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let expires_at_ms = self.clock.now_ms().saturating_add(ttl.as_millis() as u64);
        let mut map = self.inner.lock().expect("cache mutex poisoned");
        map.insert(
            key.into(),
            Entry {
                value,
                expires_at_ms,
            },
        );
    }

    /// Drop one key, or every entry when `key` is `None`.
    pub fn clear(&self, key: Option<&str>) {
        let mut map = self.inner.lock().expect("cache mutex poisoned");
        match key {
            Some(k) => {
                map.remove(k);
            }
            None => map.clear(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Deterministic cache key: version tag, logical kind, country, city, and —
/// when GPS matters — the coordinate rounded to 4 decimal places (~11 m) so
/// cardinality stays bounded while distinct origins stay distinct.
pub fn response_key(kind: &str, country: &str, city: &str, gps: Option<GeoPoint>) -> String {
    match gps {
        Some(p) => format!("{kind}_v1_{country}_{city}_{:.4}_{:.4}", p.lat, p.lng),
        None => format!("{kind}_v1_{country}_{city}_no_gps"),
    }
}
