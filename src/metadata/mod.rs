//! Archive.org metadata lookups fronted by a TTL cache.
//!
//! # Architecture
//!
//! - [`MetadataCache`]: injected key-value store with TTL ([`InMemoryCache`] by default)
//! - [`MetadataFetcher`]: remote lookup ([`ArchiveFetcher`] over HTTP)
//! - [`MetadataStore`]: `get_or_fetch` gluing the two together
//!
//! Fetch failures never escape the store: they are logged and read as a
//! miss, and nothing is cached for them.

pub mod cache;
pub mod fetcher;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use cache::{CacheEntry, InMemoryCache, MetadataCache};
pub use fetcher::{ArchiveFetcher, MetadataFetcher};

/// The subset of an Archive.org metadata document the renderers use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveMetadata {
    pub files: Vec<ArchiveFile>,
}

/// One file inside an Archive.org item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveFile {
    pub name: String,
    #[serde(default)]
    pub format: String,
}

impl ArchiveFile {
    /// Audio preference tier: 0 for MP3 variants, 1 for Ogg Vorbis,
    /// 2 for FLAC, `None` for anything else.
    fn audio_rank(&self) -> Option<u8> {
        let format = self.format.to_lowercase();
        if format.contains("mp3") {
            Some(0)
        } else if format == "ogg vorbis" {
            Some(1)
        } else if format.contains("flac") {
            Some(2)
        } else {
            None
        }
    }
}

impl ArchiveMetadata {
    /// Best audio file, preferring renditions of `filename` when given.
    ///
    /// Renditions are matched by base name, so `track.flac` in the URL finds
    /// `track.mp3` in the listing. When nothing matches, every file is
    /// considered.
    pub fn best_audio(&self, filename: Option<&str>) -> Option<&ArchiveFile> {
        if let Some(wanted) = filename.map(base_name) {
            let matched = Self::best_of(self.files.iter().filter(|f| base_name(&f.name) == wanted));
            if matched.is_some() {
                return matched;
            }
        }
        Self::best_of(self.files.iter())
    }

    fn best_of<'a>(files: impl Iterator<Item = &'a ArchiveFile>) -> Option<&'a ArchiveFile> {
        files
            .filter_map(|file| file.audio_rank().map(|rank| (rank, file)))
            .min_by_key(|(rank, _)| *rank)
            .map(|(_, file)| file)
    }
}

/// File name without directories or extension.
fn base_name(name: &str) -> &str {
    Path::new(name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(name)
}

/// Cache key for an identifier: stable across processes and releases.
pub fn cache_key(identifier: &str) -> String {
    format!("archive_meta_{:x}", md5::compute(identifier.as_bytes()))
}

/// Read-through cache in front of a [`MetadataFetcher`].
#[derive(Clone)]
pub struct MetadataStore {
    cache: Arc<dyn MetadataCache>,
    fetcher: Arc<dyn MetadataFetcher>,
    ttl: Duration,
}

impl MetadataStore {
    pub fn new(
        cache: Arc<dyn MetadataCache>,
        fetcher: Arc<dyn MetadataFetcher>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            fetcher,
            ttl,
        }
    }

    /// Cached document for `identifier`, fetching it on a miss.
    ///
    /// Returns `None` when the fetch fails; the failure is not cached.
    pub async fn get_or_fetch(&self, identifier: &str) -> Option<ArchiveMetadata> {
        let key = cache_key(identifier);

        if let Some(hit) = self.cache.get(&key).await {
            debug!("Metadata cache hit for {}", identifier);
            return Some(hit);
        }

        match self.fetcher.fetch(identifier).await {
            Ok(metadata) => {
                debug!(
                    "Fetched metadata for {} ({} files)",
                    identifier,
                    metadata.files.len()
                );
                self.cache.set(&key, metadata.clone(), self.ttl).await;
                Some(metadata)
            }
            Err(e) => {
                warn!("Metadata fetch for {} failed: {}", identifier, e);
                None
            }
        }
    }
}
