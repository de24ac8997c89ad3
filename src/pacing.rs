// src/pacing.rs
//! Fixed-delay scheduler for one upstream host.
//!
//! Upstream providers throttle bursts, so consecutive requests to the same
//! host are serialized with a growing delay: `base` on the first request,
//! `+step` per consecutive request, saturating at `cap`. Search-style
//! sources additionally need a fixed pause before a just-issued continuation
//! token becomes valid.

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

use crate::config::PacerConfig;

/// Per-upstream request pacer. Callers going through the same pacer are
/// serialized (the delay is slept while holding the lock); independent
/// upstreams use independent pacers and proceed in parallel.
pub struct RequestPacer {
    cfg: PacerConfig,
    delay_ms: Mutex<u64>,
}

impl RequestPacer {
    pub fn new(cfg: PacerConfig) -> Self {
        Self {
            delay_ms: Mutex::new(cfg.base_ms),
            cfg,
        }
    }

    /// Wait the current inter-request delay, then bump it for the next call.
    pub async fn pace(&self) {
        let mut delay = self.delay_ms.lock().await;
        sleep(Duration::from_millis(*delay)).await;
        *delay = (*delay + self.cfg.step_ms).min(self.cfg.cap_ms);
    }

    /// Fixed pause before reusing a continuation token. Does not touch the
    /// consecutive-request counter.
    pub async fn pace_page_token(&self) {
        // Hold the lock so token waits also serialize against regular calls.
        let _delay = self.delay_ms.lock().await;
        sleep(Duration::from_millis(self.cfg.page_token_ms)).await;
    }

    /// Reset the delay to its base value (e.g. at the start of a session).
    pub async fn reset(&self) {
        *self.delay_ms.lock().await = self.cfg.base_ms;
    }

    /// Current delay in milliseconds (diagnostics and tests).
    pub async fn current_delay_ms(&self) -> u64 {
        *self.delay_ms.lock().await
    }
}
