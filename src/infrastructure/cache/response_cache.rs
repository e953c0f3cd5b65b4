//! Short-lived key/value cache over serialized backend responses.
//!
//! Reads after writes stay consistent because every mutating operation
//! clears the affected key synchronously before the caller re-fetches.
//! Expired entries are evicted lazily on read, plus a best-effort periodic
//! sweep independent of the read/write paths.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;

struct CachedEntry {
    data: serde_json::Value,
    expires_at: Instant,
}

pub struct ResponseCache {
    entries: Mutex<HashMap<String, CachedEntry>>,
    default_ttl: Duration,
}

impl ResponseCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
    pub const SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

    pub fn new() -> Self {
        Self::with_default_ttl(Self::DEFAULT_TTL)
    }

    pub fn with_default_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
        }
    }

    /// Store `value` under `key` for `ttl` (the default TTL when `None`).
    /// Unserializable values are skipped, not cached as garbage.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        let data = match serde_json::to_value(value) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(key, error = %e, "Skipping uncacheable value");
                return;
            }
        };
        let entry = CachedEntry {
            data,
            expires_at: Instant::now() + ttl.unwrap_or(self.default_ttl),
        };
        self.lock().insert(key.to_string(), entry);
    }

    /// Read `key`, treating expired entries as absent and evicting them.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut entries = self.lock();
        let entry = entries.get(key)?;
        if Instant::now() > entry.expires_at {
            entries.remove(key);
            return None;
        }
        serde_json::from_value(entry.data.clone()).ok()
    }

    /// Drop one key, or everything when `key` is `None`.
    pub fn clear(&self, key: Option<&str>) {
        let mut entries = self.lock();
        match key {
            Some(key) => {
                entries.remove(key);
            }
            None => entries.clear(),
        }
    }

    /// Evict every expired entry.
    pub fn cleanup(&self) {
        let now = Instant::now();
        self.lock().retain(|_, entry| now <= entry.expires_at);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Background sweep every `SWEEP_INTERVAL`; the task stops on its own
    /// once the cache has been dropped.
    pub fn spawn_sweeper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let cache: Weak<Self> = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Self::SWEEP_INTERVAL);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match cache.upgrade() {
                    Some(cache) => cache.cleanup(),
                    None => break,
                }
            }
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CachedEntry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
