//! TTL cache for fetched metadata documents.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::ArchiveMetadata;

/// Longest TTL honoured; larger values are clamped so expiry never overflows.
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// A cached document and the instant it stops being fresh.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub payload: ArchiveMetadata,
    pub expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Key-value store with per-entry TTL.
///
/// Writers race last-writer-wins; documents are immutable so refetching
/// is harmless.
#[async_trait]
pub trait MetadataCache: Send + Sync {
    /// Fresh entry for `key`, if any. Expired entries read as misses.
    async fn get(&self, key: &str) -> Option<ArchiveMetadata>;

    /// Store `payload` under `key` for `ttl`.
    async fn set(&self, key: &str, payload: ArchiveMetadata, ttl: Duration);
}

/// Bounded in-memory cache.
///
/// At capacity, expired entries are purged first; if none are, the entry
/// closest to expiry is evicted.
pub struct InMemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    capacity: usize,
}

impl InMemoryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Number of stored entries, fresh or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new(512)
    }
}

#[async_trait]
impl MetadataCache for InMemoryCache {
    async fn get(&self, key: &str) -> Option<ArchiveMetadata> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(Instant::now()))
            .map(|entry| entry.payload.clone())
    }

    async fn set(&self, key: &str, payload: ArchiveMetadata, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if !entries.contains_key(key) && entries.len() >= self.capacity {
            entries.retain(|_, entry| !entry.is_expired(now));

            if entries.len() >= self.capacity {
                let oldest = entries
                    .values()
                    .min_by_key(|entry| entry.expires_at)
                    .map(|entry| entry.key.clone());
                if let Some(oldest) = oldest {
                    debug!("Evicting cache entry {}", oldest);
                    entries.remove(&oldest);
                }
            }
        }

        entries.insert(
            key.to_string(),
            CacheEntry {
                key: key.to_string(),
                payload,
                expires_at: now.checked_add(ttl.min(MAX_TTL)).unwrap_or(now),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::ArchiveFile;

    fn doc(name: &str) -> ArchiveMetadata {
        ArchiveMetadata {
            files: vec![ArchiveFile {
                name: name.to_string(),
                format: "VBR MP3".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn fresh_entry_is_returned() {
        let cache = InMemoryCache::new(4);
        cache.set("a", doc("a.mp3"), Duration::from_secs(60)).await;
        assert_eq!(cache.get("a").await, Some(doc("a.mp3")));
        assert_eq!(cache.get("b").await, None);
    }

    #[tokio::test]
    async fn zero_ttl_reads_as_miss() {
        let cache = InMemoryCache::new(4);
        cache.set("a", doc("a.mp3"), Duration::ZERO).await;
        assert_eq!(cache.get("a").await, None);
    }

    #[tokio::test]
    async fn huge_ttl_is_clamped_instead_of_overflowing() {
        let cache = InMemoryCache::new(4);
        cache
            .set("a", doc("a.mp3"), Duration::from_secs(u64::MAX))
            .await;
        assert_eq!(cache.get("a").await, Some(doc("a.mp3")));
    }

    #[tokio::test]
    async fn configured_max_ttl_does_not_panic() {
        let settings =
            crate::config::parse_settings("[metadata]\nttl_secs = 9223372036854775807\n").unwrap();
        let cache = InMemoryCache::new(4);
        cache.set("a", doc("a.mp3"), settings.metadata.ttl()).await;
        assert!(cache.get("a").await.is_some());
    }

    #[tokio::test]
    async fn overwrite_replaces_payload() {
        let cache = InMemoryCache::new(4);
        cache.set("a", doc("old.mp3"), Duration::from_secs(60)).await;
        cache.set("a", doc("new.mp3"), Duration::from_secs(60)).await;
        assert_eq!(cache.get("a").await, Some(doc("new.mp3")));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn expired_entries_are_purged_before_evicting() {
        let cache = InMemoryCache::new(2);
        cache.set("stale", doc("s.mp3"), Duration::ZERO).await;
        cache.set("keep", doc("k.mp3"), Duration::from_secs(60)).await;
        cache.set("new", doc("n.mp3"), Duration::from_secs(60)).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get("keep").await.is_some());
        assert!(cache.get("new").await.is_some());
    }

    #[tokio::test]
    async fn full_cache_evicts_nearest_expiry() {
        let cache = InMemoryCache::new(2);
        cache.set("short", doc("s.mp3"), Duration::from_secs(10)).await;
        cache.set("long", doc("l.mp3"), Duration::from_secs(600)).await;
        cache.set("new", doc("n.mp3"), Duration::from_secs(300)).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get("short").await.is_none());
        assert!(cache.get("long").await.is_some());
        assert!(cache.get("new").await.is_some());
    }
}
