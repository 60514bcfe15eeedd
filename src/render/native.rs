//! Native `<video>` / `<audio>` renderer for direct file URLs.

use async_trait::async_trait;

use super::controls::controls;
use super::{RenderOutcome, Renderer};
use crate::classify::path_extension;
use crate::html::{css_url, escape, is_script_url};
use crate::options::RenderOptions;
use crate::source::SourceType;

/// Which media element to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    /// MIME type for a file extension, with a per-kind default.
    pub fn mime_type(self, extension: Option<&str>) -> &'static str {
        match (self, extension) {
            (MediaKind::Video, Some("webm")) => "video/webm",
            (MediaKind::Video, Some("ogg" | "ogv")) => "video/ogg",
            (MediaKind::Video, _) => "video/mp4",
            (MediaKind::Audio, Some("wav")) => "audio/wav",
            (MediaKind::Audio, Some("ogg" | "oga")) => "audio/ogg",
            (MediaKind::Audio, Some("m4a")) => "audio/mp4",
            (MediaKind::Audio, Some("flac")) => "audio/flac",
            (MediaKind::Audio, _) => "audio/mpeg",
        }
    }
}

pub struct NativeRenderer {
    kind: MediaKind,
}

impl NativeRenderer {
    pub fn video() -> Self {
        Self {
            kind: MediaKind::Video,
        }
    }

    pub fn audio() -> Self {
        Self {
            kind: MediaKind::Audio,
        }
    }

    fn render_video(url: &str, mime: &str, options: &RenderOptions) -> String {
        let mut attrs = String::from(r#" preload="metadata" playsinline"#);
        if options.autoplay {
            attrs.push_str(" autoplay muted");
        }
        if let Some(poster) = options.featured_image() {
            attrs.push_str(&format!(r#" poster="{}""#, escape(poster)));
        }

        format!(
            concat!(
                r#"<div class="me-player me-player--video" data-controller="native">"#,
                r#"<video class="me-media"{attrs}><source src="{src}" type="{mime}"></video>"#,
                "{controls}",
                "</div>"
            ),
            attrs = attrs,
            src = escape(url),
            mime = mime,
            controls = controls(options.show_controls),
        )
    }

    fn render_audio(url: &str, mime: &str, options: &RenderOptions) -> String {
        let mut attrs = String::from(r#" preload="metadata""#);
        if options.autoplay {
            attrs.push_str(" autoplay");
        }

        let visual = options.featured_image().map_or_else(String::new, |image| {
            format!(
                r#"<div class="me-visual" style="background-image:url('{}')" role="img" aria-label="{}"></div>"#,
                css_url(image),
                escape(options.title.as_deref().unwrap_or("Audio artwork")),
            )
        });
        let class = if visual.is_empty() {
            "me-player me-player--audio"
        } else {
            "me-player me-player--audio me-player--visual"
        };

        format!(
            concat!(
                r#"<div class="{class}" data-controller="native">"#,
                "{visual}",
                r#"<audio class="me-media"{attrs}><source src="{src}" type="{mime}"></audio>"#,
                "{controls}",
                "</div>"
            ),
            class = class,
            visual = visual,
            attrs = attrs,
            src = escape(url),
            mime = mime,
            controls = controls(options.show_controls),
        )
    }
}

#[async_trait]
impl Renderer for NativeRenderer {
    fn source(&self) -> SourceType {
        match self.kind {
            MediaKind::Video => SourceType::Video,
            MediaKind::Audio => SourceType::Audio,
        }
    }

    async fn render(&self, url: &str, options: &RenderOptions) -> RenderOutcome {
        if url.is_empty() || is_script_url(url) {
            return RenderOutcome::decline("not a playable media URL");
        }

        let extension = path_extension(url);
        let mime = self.kind.mime_type(extension.as_deref());
        let markup = match self.kind {
            MediaKind::Video => Self::render_video(url, mime, options),
            MediaKind::Audio => Self::render_audio(url, mime, options),
        };

        RenderOutcome::rendered(markup, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_mime_types() {
        let kind = MediaKind::Video;
        assert_eq!(kind.mime_type(Some("mp4")), "video/mp4");
        assert_eq!(kind.mime_type(Some("webm")), "video/webm");
        assert_eq!(kind.mime_type(Some("ogg")), "video/ogg");
        assert_eq!(kind.mime_type(Some("ogv")), "video/ogg");
        assert_eq!(kind.mime_type(Some("mkv")), "video/mp4");
        assert_eq!(kind.mime_type(None), "video/mp4");
    }

    #[test]
    fn audio_mime_types() {
        let kind = MediaKind::Audio;
        assert_eq!(kind.mime_type(Some("mp3")), "audio/mpeg");
        assert_eq!(kind.mime_type(Some("wav")), "audio/wav");
        assert_eq!(kind.mime_type(Some("oga")), "audio/ogg");
        assert_eq!(kind.mime_type(Some("m4a")), "audio/mp4");
        assert_eq!(kind.mime_type(Some("flac")), "audio/flac");
        assert_eq!(kind.mime_type(None), "audio/mpeg");
    }

    #[tokio::test]
    async fn video_with_autoplay_is_muted() {
        let options = RenderOptions {
            autoplay: true,
            ..Default::default()
        };
        let RenderOutcome::Rendered { markup, .. } = NativeRenderer::video()
            .render("https://example.com/clip.webm", &options)
            .await
        else {
            panic!("expected rendered markup");
        };
        assert!(markup.contains("<video"));
        assert!(markup.contains("autoplay muted"));
        assert!(markup.contains(r#"type="video/webm""#));
        assert_eq!(markup.matches("<source").count(), 1);
        assert!(markup.contains("me-controls"));
    }

    #[tokio::test]
    async fn audio_with_featured_image_gets_backdrop() {
        let options = RenderOptions {
            featured_image_url: Some("https://example.com/cover.png".to_string()),
            ..Default::default()
        };
        let RenderOutcome::Rendered { markup, .. } = NativeRenderer::audio()
            .render("https://example.com/song.mp3", &options)
            .await
        else {
            panic!("expected rendered markup");
        };
        assert!(markup.contains("<audio"));
        assert!(markup.contains("me-visual"));
        assert!(markup.contains(r#"type="audio/mpeg""#));
    }

    #[tokio::test]
    async fn apostrophe_in_artwork_url_stays_inside_css_string() {
        let options = RenderOptions {
            featured_image_url: Some("https://example.com/o'brien.jpg".to_string()),
            ..Default::default()
        };
        let RenderOutcome::Rendered { markup, .. } = NativeRenderer::audio()
            .render("https://example.com/song.mp3", &options)
            .await
        else {
            panic!("expected rendered markup");
        };
        assert!(markup.contains("background-image:url('https://example.com/o%27brien.jpg')"));
        assert!(!markup.contains("&#39;"));
    }

    #[tokio::test]
    async fn archive_flac_rendition_gets_flac_type() {
        let RenderOutcome::Rendered { markup, .. } = NativeRenderer::audio()
            .render("https://archive.org/download/gd1977/t01.flac", &RenderOptions::default())
            .await
        else {
            panic!("expected rendered markup");
        };
        assert!(markup.contains(r#"type="audio/flac""#));
    }

    #[tokio::test]
    async fn audio_url_is_escaped() {
        let RenderOutcome::Rendered { markup, .. } = NativeRenderer::audio()
            .render(r#"https://example.com/a.mp3?x="><script>"#, &RenderOptions::default())
            .await
        else {
            panic!("expected rendered markup");
        };
        assert!(!markup.contains("<script>"));
    }

    #[tokio::test]
    async fn declines_script_urls() {
        let outcome = NativeRenderer::video()
            .render("javascript:alert(1)//.mp4", &RenderOptions::default())
            .await;
        assert!(matches!(outcome, RenderOutcome::Decline { .. }));
    }
}
