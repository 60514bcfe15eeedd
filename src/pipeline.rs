//! URL → embed descriptor.
//!
//! ```rust,no_run
//! use mediaembed::{EmbedPipeline, RenderOptions, Settings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let pipeline = EmbedPipeline::new(&Settings::default())?;
//! let embed = pipeline
//!     .render("https://youtu.be/dQw4w9WgXcQ", &RenderOptions::default())
//!     .await;
//! println!("{} {}", embed.source, embed.markup);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Settings;
use crate::embed::{build_descriptor, EmbedDescriptor};
use crate::error::Result;
use crate::filter::{EmbedFilter, FilterContext};
use crate::http_client::HttpClient;
use crate::metadata::{ArchiveFetcher, InMemoryCache, MetadataStore};
use crate::options::RenderOptions;
use crate::render::custom::render_custom;
use crate::render::fallback::render_link;
use crate::render::{RenderOutcome, RendererRegistry};
use crate::source::{MediaReference, SourceType};

/// Upper bound on renderer hand-offs within one request.
const MAX_DELEGATIONS: usize = 3;

/// Classifies URLs, dispatches to renderers, and applies filters.
pub struct EmbedPipeline {
    registry: RendererRegistry,
    filters: Vec<Box<dyn EmbedFilter>>,
}

impl EmbedPipeline {
    /// Pipeline with the HTTP fetcher and bounded in-memory cache
    /// described by `settings`.
    pub fn new(settings: &Settings) -> Result<Self> {
        let metadata = &settings.metadata;
        let client = HttpClient::for_metadata(metadata)?;
        let store = MetadataStore::new(
            Arc::new(InMemoryCache::new(metadata.capacity)),
            Arc::new(ArchiveFetcher::new(client, metadata)),
            metadata.ttl(),
        );
        Ok(Self::with_store(store))
    }

    /// Pipeline over an injected metadata store.
    pub fn with_store(store: MetadataStore) -> Self {
        Self::with_registry(RendererRegistry::new(store))
    }

    pub fn with_registry(registry: RendererRegistry) -> Self {
        Self {
            registry,
            filters: Vec::new(),
        }
    }

    /// Append a post-processing filter.
    #[must_use]
    pub fn with_filter(mut self, filter: impl EmbedFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Render `url` into an embed descriptor. Never fails: every failure
    /// degrades to the link-out fallback.
    pub async fn render(&self, url: &str, options: &RenderOptions) -> EmbedDescriptor {
        if let Some(code) = options.custom_embed() {
            let source = options
                .source_override
                .filter(|source| *source != SourceType::None)
                .unwrap_or(SourceType::Unknown);
            debug!("Rendering custom embed code for {}", url);
            let descriptor = build_descriptor(&render_custom(code), source, None, options);
            return self.apply_filters(descriptor, url, options);
        }

        let reference = MediaReference::resolve(url, options.source_override);
        debug!(
            "Resolved {} as {}",
            reference.url, reference.resolved_source
        );

        let descriptor = self.dispatch(&reference, options).await;
        self.apply_filters(descriptor, url, options)
    }

    /// Walk the renderer chain, ending at the link-out fallback.
    async fn dispatch(&self, reference: &MediaReference, options: &RenderOptions) -> EmbedDescriptor {
        let mut source = reference.resolved_source;
        let mut target = reference.url.clone();

        for _ in 0..=MAX_DELEGATIONS {
            let Some(renderer) = self.registry.get(source) else {
                debug!("No renderer for {}, using fallback", source);
                break;
            };

            match renderer.render(&target, options).await {
                RenderOutcome::Rendered { markup, identifier } => {
                    return build_descriptor(&markup, source, identifier, options);
                }
                RenderOutcome::Delegate {
                    source: next,
                    url: next_url,
                } => {
                    debug!("{} renderer handed {} to {}", source, target, next);
                    source = next;
                    target = next_url;
                }
                RenderOutcome::Decline { reason } => {
                    warn!("{} renderer declined {}: {}", source, target, reason);
                    break;
                }
            }
        }

        Self::fallback(reference, options)
    }

    fn fallback(reference: &MediaReference, options: &RenderOptions) -> EmbedDescriptor {
        let source = match reference.resolved_source {
            SourceType::None => SourceType::None,
            _ => SourceType::Unknown,
        };
        build_descriptor(&render_link(&reference.url, options), source, None, options)
    }

    fn apply_filters(
        &self,
        mut descriptor: EmbedDescriptor,
        url: &str,
        options: &RenderOptions,
    ) -> EmbedDescriptor {
        let ctx = FilterContext {
            url,
            source: descriptor.source,
            options,
        };
        descriptor.markup = self
            .filters
            .iter()
            .fold(descriptor.markup, |markup, filter| filter.filter(markup, &ctx));
        descriptor
    }
}
