//! The final embed descriptor and its outer container.

use serde::Serialize;

use crate::html::escape;
use crate::options::RenderOptions;
use crate::source::SourceType;

/// Markup plus the source and identifier it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedDescriptor {
    pub markup: String,
    pub source: SourceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

/// Wrap renderer markup in the outer container that exposes `source` and
/// `identifier` to client-side code.
pub fn build_descriptor(
    inner: &str,
    source: SourceType,
    identifier: Option<String>,
    options: &RenderOptions,
) -> EmbedDescriptor {
    let mut class = format!("me-embed me-embed--{source}");
    let extra = options.css_class.trim();
    if !extra.is_empty() {
        class.push(' ');
        class.push_str(extra);
    }

    let identifier_attr = identifier
        .as_deref()
        .map(|id| format!(r#" data-identifier="{}""#, escape(id)))
        .unwrap_or_default();
    let width = non_empty(&options.width).unwrap_or("100%");
    let height = options.height.as_deref().and_then(non_empty).unwrap_or("auto");

    let markup = format!(
        r#"<div class="{class}" data-source="{source}"{identifier_attr} style="width:{width};height:{height}">{inner}</div>"#,
        class = escape(&class),
        width = escape(width),
        height = escape(height),
    );

    EmbedDescriptor {
        markup,
        source,
        identifier,
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}
