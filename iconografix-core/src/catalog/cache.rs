//! Content cache with lazy TTL expiry
//!
//! Entries are keyed by `(provider_id, item_name)` and never evicted
//! proactively; an entry older than the TTL is simply ignored on read and
//! overwritten by the next fetch.

use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default content TTL (1 hour)
pub const DEFAULT_CONTENT_TTL: Duration = Duration::from_secs(60 * 60);

/// A cached piece of markup
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub content: String,
    pub fetched_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// Per-provider content cache
#[derive(Debug)]
pub struct ContentCache {
    ttl: Duration,
    entries: Mutex<HashMap<(String, String), CacheEntry>>,
}

impl ContentCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached content if it is younger than the TTL
    pub async fn get_fresh(&self, provider_id: &str, item_name: &str) -> Option<String> {
        let entries = self.entries.lock().await;
        let key = (provider_id.to_string(), item_name.to_string());
        let entry = entries.get(&key)?;

        let now = Instant::now();
        if entry.is_fresh(now, self.ttl) {
            tracing::debug!(
                "Content cache hit for {}/{} (age: {:?})",
                provider_id,
                item_name,
                now.saturating_duration_since(entry.fetched_at)
            );
            Some(entry.content.clone())
        } else {
            tracing::debug!("Content cache expired for {}/{}", provider_id, item_name);
            None
        }
    }

    /// Store content, stamped with `fetched_at`
    pub async fn insert(
        &self,
        provider_id: &str,
        item_name: &str,
        content: String,
        fetched_at: Instant,
    ) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            (provider_id.to_string(), item_name.to_string()),
            CacheEntry {
                content,
                fetched_at,
            },
        );
    }

    /// Number of entries, fresh or stale
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_TTL)
    }
}
