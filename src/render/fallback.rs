//! Terminal link-out fallback. Always produces markup.

use crate::html::{escape, is_script_url};
use crate::options::RenderOptions;

const NOTICE: &str = "Media player not available.";

/// Notice plus a link to the original URL. The link is omitted for empty
/// or script URLs; the notice is always present.
pub fn render_link(url: &str, options: &RenderOptions) -> String {
    let url = url.trim();
    let link = if url.is_empty() || is_script_url(url) {
        String::new()
    } else {
        let text = options.title.as_deref().unwrap_or(url);
        format!(
            r#"<a class="me-fallback__link" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
            escape(url),
            escape(text),
        )
    };

    format!(
        r#"<div class="me-fallback"><p class="me-fallback__notice">{NOTICE}</p>{link}</div>"#
    )
}
