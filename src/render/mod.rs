//! Per-source renderers.
//!
//! # Architecture
//!
//! - [`Renderer`]: async trait, one implementation per [`SourceType`]
//! - [`RendererRegistry`]: lookup table keyed by source type
//! - [`RenderOutcome`]: rendered markup, a hand-off to another source, or a decline
//!
//! Sources without a registered renderer (`unknown`, `none`) and every
//! declined render end at [`fallback::render_link`], which cannot fail.

pub mod archive;
pub mod controls;
pub mod custom;
pub mod fallback;
pub mod native;
pub mod soundcloud;
pub mod vimeo;
pub mod youtube;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::metadata::MetadataStore;
use crate::options::RenderOptions;
use crate::source::SourceType;

/// What a renderer made of a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Player markup, plus the identifier it was built from.
    Rendered {
        markup: String,
        identifier: Option<String>,
    },
    /// Render `url` as `source` instead (e.g. an Archive.org item that
    /// resolved to a direct audio file).
    Delegate { source: SourceType, url: String },
    /// This renderer can't handle the URL; use the link-out fallback.
    Decline { reason: String },
}

impl RenderOutcome {
    pub fn rendered(markup: String, identifier: Option<String>) -> Self {
        Self::Rendered { markup, identifier }
    }

    pub fn decline(reason: impl Into<String>) -> Self {
        Self::Decline {
            reason: reason.into(),
        }
    }
}

/// Renderer for one source type.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Source type this renderer handles.
    fn source(&self) -> SourceType;

    /// Build player markup for `url`. Must not panic on malformed input;
    /// return [`RenderOutcome::Decline`] instead.
    async fn render(&self, url: &str, options: &RenderOptions) -> RenderOutcome;
}

/// Renderers keyed by the source type they handle.
pub struct RendererRegistry {
    renderers: HashMap<SourceType, Box<dyn Renderer>>,
}

impl RendererRegistry {
    /// Registry with every built-in renderer. Archive.org lookups go
    /// through `store`.
    pub fn new(store: MetadataStore) -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(youtube::YouTubeRenderer));
        registry.register(Box::new(vimeo::VimeoRenderer));
        registry.register(Box::new(soundcloud::SoundCloudRenderer));
        registry.register(Box::new(archive::ArchiveRenderer::new(store)));
        registry.register(Box::new(native::NativeRenderer::video()));
        registry.register(Box::new(native::NativeRenderer::audio()));
        registry
    }

    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Add or replace the renderer for its source type.
    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.insert(renderer.source(), renderer);
    }

    pub fn get(&self, source: SourceType) -> Option<&dyn Renderer> {
        self.renderers.get(&source).map(|renderer| renderer.as_ref())
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}
