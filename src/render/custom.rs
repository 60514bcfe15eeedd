//! Caller-supplied embed code.
//!
//! The code is parsed with html5ever and rebuilt from an allow-list: only
//! `iframe` and `script` elements survive, each with a fixed attribute set.
//! Inline script bodies and everything else are dropped.

use scraper::{ElementRef, Html};

use crate::html::{escape, is_script_url};

const IFRAME_ATTRS: &[&str] = &[
    "src",
    "width",
    "height",
    "frameborder",
    "allow",
    "allowfullscreen",
    "style",
    "title",
    "class",
];
const SCRIPT_ATTRS: &[&str] = &["src", "type"];

fn allowed_attrs(tag: &str) -> Option<&'static [&'static str]> {
    match tag {
        "iframe" => Some(IFRAME_ATTRS),
        "script" => Some(SCRIPT_ATTRS),
        _ => None,
    }
}

/// Rebuild `code` from allow-listed elements and attributes.
pub fn sanitize(code: &str) -> String {
    let fragment = Html::parse_fragment(code);
    let mut out = String::new();

    for element in fragment
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
    {
        let tag = element.value().name();
        let Some(allowed) = allowed_attrs(tag) else {
            continue;
        };

        out.push('<');
        out.push_str(tag);
        // Allow-list order keeps output stable regardless of source order.
        for &name in allowed {
            let Some(value) = element.value().attr(name) else {
                continue;
            };
            if name == "src" && is_script_url(value) {
                continue;
            }
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape(value));
                out.push('"');
            }
        }
        out.push_str("></");
        out.push_str(tag);
        out.push('>');
    }

    out
}

/// Sanitized code inside the custom-embed container.
pub fn render_custom(code: &str) -> String {
    format!(
        r#"<div class="me-player me-custom-embed">{}</div>"#,
        sanitize(code)
    )
}
