//! Archive.org renderer.
//!
//! Prefers a direct audio file from the item's metadata (handed to the
//! native audio renderer); otherwise embeds Archive.org's own player.

use async_trait::async_trait;
use tracing::debug;

use super::{RenderOutcome, Renderer};
use crate::extract::{extract_archive, ArchiveTarget};
use crate::html::escape;
use crate::metadata::MetadataStore;
use crate::options::RenderOptions;
use crate::source::SourceType;

pub struct ArchiveRenderer {
    store: MetadataStore,
}

impl ArchiveRenderer {
    pub fn new(store: MetadataStore) -> Self {
        Self { store }
    }

    /// Direct download URL for the best audio rendition, if metadata has one.
    async fn resolve_audio(&self, target: &ArchiveTarget) -> Option<String> {
        let metadata = self.store.get_or_fetch(&target.identifier).await?;
        let file = metadata.best_audio(target.filename.as_deref())?;
        Some(download_url(&target.identifier, &file.name))
    }
}

/// `https://archive.org/download/{id}/{name}` with each path segment encoded.
pub fn download_url(identifier: &str, name: &str) -> String {
    let path = name
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!(
        "https://archive.org/download/{}/{path}",
        urlencoding::encode(identifier)
    )
}

/// Archive.org's own player for the item (or one file in it).
pub fn embed_url(target: &ArchiveTarget) -> String {
    let mut url = format!(
        "https://archive.org/embed/{}",
        urlencoding::encode(&target.identifier)
    );
    if let Some(filename) = &target.filename {
        for segment in filename.split('/') {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }
    }
    url
}

fn iframe_markup(target: &ArchiveTarget, options: &RenderOptions) -> String {
    let title = options.title.as_deref().unwrap_or("Internet Archive player");
    format!(
        concat!(
            r#"<div class="me-player me-player--archive">"#,
            r#"<div class="me-loading-overlay" aria-hidden="true"><span class="me-spinner"></span></div>"#,
            r#"<iframe src="{src}" title="{title}" width="100%" height="100%" frameborder="0" "#,
            r#"allowfullscreen onload="this.previousElementSibling.style.display='none'"></iframe>"#,
            "</div>"
        ),
        src = escape(&embed_url(target)),
        title = escape(title),
    )
}

#[async_trait]
impl Renderer for ArchiveRenderer {
    fn source(&self) -> SourceType {
        SourceType::Archive
    }

    async fn render(&self, url: &str, options: &RenderOptions) -> RenderOutcome {
        let Some(target) = extract_archive(url) else {
            return RenderOutcome::decline("no Archive.org identifier in URL");
        };

        if let Some(audio_url) = self.resolve_audio(&target).await {
            debug!("Archive.org item {} resolved to {}", target.identifier, audio_url);
            return RenderOutcome::Delegate {
                source: SourceType::Audio,
                url: audio_url,
            };
        }

        debug!(
            "No audio file for Archive.org item {}, embedding player",
            target.identifier
        );
        let markup = iframe_markup(&target, options);
        RenderOutcome::rendered(markup, Some(target.identifier))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::error::{EmbedError, Result};
    use crate::metadata::{ArchiveFile, ArchiveMetadata, InMemoryCache, MetadataFetcher};

    struct FixedFetcher {
        response: Option<Vec<(&'static str, &'static str)>>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MetadataFetcher for FixedFetcher {
        async fn fetch(&self, identifier: &str) -> Result<ArchiveMetadata> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Some(files) => Ok(ArchiveMetadata {
                    files: files
                        .iter()
                        .map(|(name, format)| ArchiveFile {
                            name: (*name).to_string(),
                            format: (*format).to_string(),
                        })
                        .collect(),
                }),
                None => Err(EmbedError::Timeout {
                    url: identifier.to_string(),
                }),
            }
        }
    }

    fn renderer(response: Option<Vec<(&'static str, &'static str)>>) -> (ArchiveRenderer, Arc<FixedFetcher>) {
        let fetcher = Arc::new(FixedFetcher {
            response,
            calls: AtomicUsize::new(0),
        });
        let store = MetadataStore::new(
            Arc::new(InMemoryCache::default()),
            fetcher.clone(),
            Duration::from_secs(3600),
        );
        (ArchiveRenderer::new(store), fetcher)
    }

    #[test]
    fn download_url_encodes_segments() {
        assert_eq!(
            download_url("gd1977", "disc 1/track #1.mp3"),
            "https://archive.org/download/gd1977/disc%201/track%20%231.mp3"
        );
    }

    #[test]
    fn embed_url_keeps_filename() {
        let target = ArchiveTarget {
            identifier: "gd1977".to_string(),
            filename: Some("t01 intro.mp3".to_string()),
        };
        assert_eq!(embed_url(&target), "https://archive.org/embed/gd1977/t01%20intro.mp3");
    }

    #[tokio::test]
    async fn matching_mp3_delegates_to_audio() {
        let (renderer, _) = renderer(Some(vec![
            ("t01.mp3", "VBR MP3"),
            ("t02.flac", "Flac"),
            ("t02.mp3", "VBR MP3"),
        ]));
        let outcome = renderer
            .render("https://archive.org/details/gd1977/t02.flac", &RenderOptions::default())
            .await;
        assert_eq!(
            outcome,
            RenderOutcome::Delegate {
                source: SourceType::Audio,
                url: "https://archive.org/download/gd1977/t02.mp3".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn non_audio_item_embeds_player() {
        let (renderer, _) = renderer(Some(vec![("movie.mp4", "MPEG4"), ("thumb.jpg", "JPEG")]));
        let outcome = renderer
            .render("https://archive.org/details/some_film", &RenderOptions::default())
            .await;
        let RenderOutcome::Rendered { markup, identifier } = outcome else {
            panic!("expected iframe fallback");
        };
        assert_eq!(identifier.as_deref(), Some("some_film"));
        assert!(markup.contains("https://archive.org/embed/some_film"));
        assert!(markup.contains("me-loading-overlay"));
    }

    #[tokio::test]
    async fn fetch_failure_embeds_player() {
        let (renderer, fetcher) = renderer(None);
        let outcome = renderer
            .render("https://archive.org/details/offline_item", &RenderOptions::default())
            .await;
        assert!(matches!(outcome, RenderOutcome::Rendered { .. }));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn url_without_identifier_declines() {
        let (renderer, fetcher) = renderer(None);
        let outcome = renderer
            .render("https://archive.org/search?query=jazz", &RenderOptions::default())
            .await;
        assert!(matches!(outcome, RenderOutcome::Decline { .. }));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }
}
