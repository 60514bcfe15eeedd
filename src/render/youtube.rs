//! YouTube renderer.
//!
//! Emits a placeholder rather than an iframe: the client-side controller
//! builds the player from `data-video-id` and `data-player-vars` so it can
//! drive it through the unified controls.

use async_trait::async_trait;
use serde::Serialize;

use super::controls::controls;
use super::{RenderOutcome, Renderer};
use crate::extract::youtube_id;
use crate::html::{css_url, escape};
use crate::options::RenderOptions;
use crate::source::SourceType;

pub struct YouTubeRenderer;

/// Player parameters handed to the client-side controller.
#[derive(Debug, Serialize)]
struct PlayerVars {
    autoplay: u8,
    mute: u8,
    rel: u8,
    modestbranding: u8,
    playsinline: u8,
    controls: u8,
    enablejsapi: u8,
}

impl PlayerVars {
    fn new(options: &RenderOptions) -> Self {
        let autoplay = u8::from(options.autoplay);
        Self {
            autoplay,
            // Browsers only honor autoplay on muted players.
            mute: autoplay,
            rel: 0,
            modestbranding: 1,
            playsinline: 1,
            controls: 0,
            enablejsapi: 1,
        }
    }
}

#[async_trait]
impl Renderer for YouTubeRenderer {
    fn source(&self) -> SourceType {
        SourceType::YouTube
    }

    async fn render(&self, url: &str, options: &RenderOptions) -> RenderOutcome {
        let Some(id) = youtube_id(url) else {
            return RenderOutcome::decline("no YouTube video id in URL");
        };

        let vars = serde_json::to_string(&PlayerVars::new(options)).unwrap_or_default();
        let poster = options.featured_image().map_or_else(
            || format!("https://img.youtube.com/vi/{id}/hqdefault.jpg"),
            str::to_string,
        );
        let title = options.title.as_deref().unwrap_or("YouTube video");

        let markup = format!(
            concat!(
                r#"<div class="me-player me-player--youtube" data-controller="youtube">"#,
                r#"<div class="me-youtube-placeholder" id="me-yt-{id}" data-video-id="{id}" data-player-vars="{vars}" title="{title}"></div>"#,
                r#"<div class="me-poster" style="background-image:url('{poster}')"></div>"#,
                "{controls}",
                "</div>"
            ),
            id = escape(&id),
            vars = escape(&vars),
            title = escape(title),
            poster = css_url(&poster),
            controls = controls(options.show_controls),
        );

        RenderOutcome::rendered(markup, Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::controls::CONTROLS;

    async fn render(url: &str, options: &RenderOptions) -> RenderOutcome {
        YouTubeRenderer.render(url, options).await
    }

    #[tokio::test]
    async fn emits_placeholder_not_iframe() {
        let outcome = render("https://youtu.be/dQw4w9WgXcQ", &RenderOptions::default()).await;
        let RenderOutcome::Rendered { markup, identifier } = outcome else {
            panic!("expected rendered markup");
        };
        assert_eq!(identifier.as_deref(), Some("dQw4w9WgXcQ"));
        assert!(markup.contains(r#"data-video-id="dQw4w9WgXcQ""#));
        assert!(!markup.contains("<iframe"));
        assert!(markup.contains(CONTROLS));
        assert!(markup.contains("img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"));
    }

    #[tokio::test]
    async fn autoplay_forces_mute() {
        let options = RenderOptions {
            autoplay: true,
            ..Default::default()
        };
        let RenderOutcome::Rendered { markup, .. } =
            render("https://www.youtube.com/watch?v=dQw4w9WgXcQ", &options).await
        else {
            panic!("expected rendered markup");
        };
        assert!(markup.contains("&quot;autoplay&quot;:1,&quot;mute&quot;:1"));
        assert!(markup.contains("&quot;rel&quot;:0"));
        assert!(markup.contains("&quot;playsinline&quot;:1"));
    }

    #[tokio::test]
    async fn featured_image_replaces_thumbnail_and_controls_can_be_hidden() {
        let options = RenderOptions {
            featured_image_url: Some("https://example.com/poster.jpg".to_string()),
            show_controls: false,
            ..Default::default()
        };
        let RenderOutcome::Rendered { markup, .. } =
            render("https://youtu.be/dQw4w9WgXcQ", &options).await
        else {
            panic!("expected rendered markup");
        };
        assert!(markup.contains("https://example.com/poster.jpg"));
        assert!(!markup.contains("me-controls"));
    }

    #[tokio::test]
    async fn declines_without_id() {
        let outcome = render("https://youtube.com/channel/UCxyz", &RenderOptions::default()).await;
        assert!(matches!(outcome, RenderOutcome::Decline { .. }));
    }

    #[tokio::test]
    async fn poster_with_apostrophe_is_css_safe() {
        let options = RenderOptions {
            featured_image_url: Some("https://example.com/o'brien.jpg".to_string()),
            ..Default::default()
        };
        let RenderOutcome::Rendered { markup, .. } =
            render("https://youtu.be/dQw4w9WgXcQ", &options).await
        else {
            panic!("expected rendered markup");
        };
        assert!(markup.contains("background-image:url('https://example.com/o%27brien.jpg')"));
        assert!(!markup.contains("o&#39;brien"));
    }
}
