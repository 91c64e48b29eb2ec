//! Sliding-window rate limiter
//!
//! Admits at most `limit` requests per conversation key within the trailing
//! window. Each key owns a timestamp queue behind its own mutex, so pruning
//! and appending are atomic per key while different keys never contend.
//! Keys live in a bounded `moka` cache: idle windows expire and the map has
//! a capacity cap. The idle TTL is never shorter than the window, so a key
//! only expires once every timestamp it held has aged out.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use moka::sync::Cache;
use sgw_domain::constants::RATE_LIMIT_WINDOW_SECS;
use sgw_domain::ports::infrastructure::{RateLimiter, RateLimiterSnapshot};
use tokio::time::Instant;
use tracing::debug;

use crate::config::RateLimiterConfig;

type Window = Arc<Mutex<VecDeque<Instant>>>;

/// Rate limiter settings for one provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterSettings {
    /// Provider name, used in logs
    pub name: String,
    /// Requests admitted per key per window
    pub limit: u32,
    /// Window length
    pub window: Duration,
    /// Idle time before a key's window is dropped; raised to `window` if shorter
    pub key_ttl: Duration,
    /// Maximum keys tracked
    pub max_keys: u64,
}

impl RateLimiterSettings {
    /// Settings for a provider admitting `limit` requests per minute
    pub fn per_minute(name: impl Into<String>, limit: u32, bounds: &RateLimiterConfig) -> Self {
        Self {
            name: name.into(),
            limit,
            window: Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
            key_ttl: bounds.key_ttl(),
            max_keys: bounds.max_keys,
        }
    }
}

/// In-memory sliding-window rate limiter
pub struct InMemoryRateLimiter {
    settings: RateLimiterSettings,
    windows: Cache<String, Window>,
}

impl InMemoryRateLimiter {
    /// Create a limiter
    pub fn new(mut settings: RateLimiterSettings) -> Self {
        settings.key_ttl = settings.key_ttl.max(settings.window);
        let windows = Cache::builder()
            .max_capacity(settings.max_keys)
            .time_to_idle(settings.key_ttl)
            .build();
        Self { settings, windows }
    }

    /// Limiter settings
    pub fn settings(&self) -> &RateLimiterSettings {
        &self.settings
    }

    fn window(&self, key: &str) -> Window {
        self.windows
            .get_with_by_ref(key, || Arc::new(Mutex::new(VecDeque::new())))
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn can_make_request(&self, key: &str) -> bool {
        let window = self.window(key);
        let mut timestamps = window.lock().unwrap_or_else(PoisonError::into_inner);

        let now = Instant::now();
        while timestamps
            .front()
            .is_some_and(|oldest| now.duration_since(*oldest) >= self.settings.window)
        {
            timestamps.pop_front();
        }

        if timestamps.len() < self.settings.limit as usize {
            timestamps.push_back(now);
            true
        } else {
            debug!(
                limiter = %self.settings.name,
                key,
                in_window = timestamps.len(),
                "Rate limit window full"
            );
            false
        }
    }

    fn snapshot(&self) -> RateLimiterSnapshot {
        // Apply pending expirations so the key count is accurate
        self.windows.run_pending_tasks();
        RateLimiterSnapshot {
            limit: self.settings.limit,
            window_secs: self.settings.window.as_secs(),
            tracked_keys: self.windows.entry_count(),
        }
    }
}

impl std::fmt::Debug for InMemoryRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRateLimiter")
            .field("settings", &self.settings)
            .field("tracked_keys", &self.windows.entry_count())
            .finish()
    }
}
