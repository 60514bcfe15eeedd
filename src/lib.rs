//! `mediaembed` - Media URL resolution and embed rendering
//!
//! # Features
//!
//! - **Classification**: YouTube, Vimeo, SoundCloud, Archive.org, and direct
//!   video/audio files, first match wins
//! - **Identifier extraction**: YouTube tokens, Vimeo ids with private-link hashes
//! - **Metadata lookups**: Archive.org file listings behind a bounded TTL cache
//! - **Rendering**: one renderer per source, degrading to a link-out fallback
//!   that always succeeds
//! - **Filters**: post-processing hooks over the final markup
//!
//! # Example
//!
//! ```rust
//! use mediaembed::{classify, extract, SourceType};
//!
//! let url = "https://vimeo.com/76979871/abc123";
//! assert_eq!(classify(url), SourceType::Vimeo);
//! assert_eq!(extract(url, SourceType::Vimeo).as_deref(), Some("76979871?h=abc123"));
//! ```

pub mod classify;
pub mod config;
pub mod embed;
pub mod error;
pub mod extract;
pub mod filter;
pub mod html;
pub mod http_client;
pub mod metadata;
pub mod options;
pub mod pipeline;
pub mod render;
pub mod source;

pub use classify::classify;
pub use config::{load_settings, MetadataSettings, Settings};
pub use embed::{build_descriptor, EmbedDescriptor};
pub use error::{EmbedError, Result};
pub use extract::{extract, extract_archive, vimeo_id, youtube_id, ArchiveTarget};
pub use filter::{EmbedFilter, FilterContext};
pub use http_client::HttpClient;
pub use metadata::{
    ArchiveFetcher, ArchiveFile, ArchiveMetadata, CacheEntry, InMemoryCache, MetadataCache,
    MetadataFetcher, MetadataStore,
};
pub use options::RenderOptions;
pub use pipeline::EmbedPipeline;
pub use render::{RenderOutcome, Renderer, RendererRegistry};
pub use source::{MediaReference, SourceType};

/// Version of mediaembed
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
