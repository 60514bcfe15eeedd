//! Vimeo renderer.
//!
//! Vimeo keeps its native controls: the iframe is not layered under the
//! unified controls block.

use async_trait::async_trait;

use super::{RenderOutcome, Renderer};
use crate::extract::vimeo_id;
use crate::html::escape;
use crate::options::RenderOptions;
use crate::source::SourceType;

pub struct VimeoRenderer;

/// Player URL for an identifier from [`vimeo_id`]. Private-link identifiers
/// already carry `?h=...`, so the remaining parameters join with `&`.
pub fn player_url(identifier: &str, options: &RenderOptions) -> String {
    let mut params = vec![
        format!("color={}", urlencoding::encode(options.color_param())),
        "byline=0".to_string(),
        "portrait=0".to_string(),
        "title=0".to_string(),
        "sidedock=0".to_string(),
        "transparent=0".to_string(),
    ];
    if options.autoplay {
        params.push("autoplay=1".to_string());
        params.push("muted=1".to_string());
    }

    let separator = if identifier.contains('?') { '&' } else { '?' };
    format!(
        "https://player.vimeo.com/video/{identifier}{separator}{}",
        params.join("&")
    )
}

#[async_trait]
impl Renderer for VimeoRenderer {
    fn source(&self) -> SourceType {
        SourceType::Vimeo
    }

    async fn render(&self, url: &str, options: &RenderOptions) -> RenderOutcome {
        let Some(id) = vimeo_id(url) else {
            return RenderOutcome::decline("no Vimeo video id in URL");
        };

        let src = player_url(&id, options);
        let title = options.title.as_deref().unwrap_or("Vimeo video");
        let markup = format!(
            concat!(
                r#"<div class="me-player me-player--vimeo">"#,
                r#"<iframe src="{src}" title="{title}" frameborder="0" "#,
                r#"allow="autoplay; fullscreen; picture-in-picture" allowfullscreen></iframe>"#,
                "</div>"
            ),
            src = escape(&src),
            title = escape(title),
        );

        RenderOutcome::rendered(markup, Some(id))
    }
}
