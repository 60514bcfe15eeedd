//! SoundCloud renderer: the raw track URL goes straight to the widget
//! endpoint, no identifier extraction.

use async_trait::async_trait;

use super::controls::controls;
use super::{RenderOutcome, Renderer};
use crate::html::{css_url, escape};
use crate::options::RenderOptions;
use crate::source::SourceType;

const WIDGET_ENDPOINT: &str = "https://w.soundcloud.com/player/";

pub struct SoundCloudRenderer;

/// Stable DOM key for a track URL.
pub fn dom_key(url: &str) -> String {
    let digest = format!("{:x}", md5::compute(url.as_bytes()));
    format!("sc-{}", &digest[..12])
}

/// Widget URL carrying the track URL and display flags.
pub fn widget_url(url: &str, options: &RenderOptions) -> String {
    format!(
        "{WIDGET_ENDPOINT}?url={}&color={}&auto_play=false&hide_related=true&show_comments=false&show_user=false&show_reposts=false&show_teaser=false",
        urlencoding::encode(url),
        urlencoding::encode(options.color_param()),
    )
}

#[async_trait]
impl Renderer for SoundCloudRenderer {
    fn source(&self) -> SourceType {
        SourceType::SoundCloud
    }

    async fn render(&self, url: &str, options: &RenderOptions) -> RenderOutcome {
        let key = dom_key(url);
        let src = widget_url(url, options);
        let title = options.title.as_deref().unwrap_or("SoundCloud audio");

        let markup = match options.featured_image() {
            Some(image) => format!(
                concat!(
                    r#"<div class="me-player me-player--soundcloud me-player--visual" id="{key}" data-controller="soundcloud">"#,
                    r#"<div class="me-visual" style="background-image:url('{image}')" role="img" aria-label="{title}"></div>"#,
                    r#"<iframe class="me-soundcloud-frame me-hidden" src="{src}" title="{title}" width="100%" height="20" frameborder="0" allow="autoplay"></iframe>"#,
                    "{controls}",
                    "</div>"
                ),
                key = key,
                image = css_url(image),
                title = escape(title),
                src = escape(&src),
                controls = controls(options.show_controls),
            ),
            None => format!(
                concat!(
                    r#"<div class="me-player me-player--soundcloud" id="{key}" data-controller="soundcloud">"#,
                    r#"<iframe class="me-soundcloud-frame" src="{src}" title="{title}" width="100%" height="166" frameborder="0" allow="autoplay"></iframe>"#,
                    "</div>"
                ),
                key = key,
                title = escape(title),
                src = escape(&src),
            ),
        };

        RenderOutcome::rendered(markup, None)
    }
}
