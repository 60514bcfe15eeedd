//! Caller-supplied render options.

use serde::{Deserialize, Serialize};

use crate::source::SourceType;

/// Options for a single render call. Every field has a default, so an empty
/// `[render]` table in the config file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Skip classification and render as this source.
    #[serde(rename = "source", skip_serializing_if = "Option::is_none")]
    pub source_override: Option<SourceType>,
    /// CSS width of the outer container.
    pub width: String,
    /// CSS height of the outer container; `auto` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    pub autoplay: bool,
    pub show_controls: bool,
    /// Extra class appended to the outer container.
    pub css_class: String,
    /// Accent color (`#rrggbb`) for players that accept one.
    pub primary_color: String,
    pub secondary_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw embed markup; when set, classification is bypassed entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_embed_code: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            source_override: None,
            width: "100%".to_string(),
            height: None,
            autoplay: false,
            show_controls: true,
            css_class: String::new(),
            primary_color: "#3b82f6".to_string(),
            secondary_color: "#1e293b".to_string(),
            featured_image_url: None,
            title: None,
            custom_embed_code: None,
        }
    }
}

impl RenderOptions {
    /// Primary color without the leading `#`, as player query strings expect.
    pub fn color_param(&self) -> &str {
        self.primary_color.trim().trim_start_matches('#')
    }

    /// Featured image, if one was supplied and is non-blank.
    pub fn featured_image(&self) -> Option<&str> {
        self.featured_image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Custom embed code, if one was supplied and is non-blank.
    pub fn custom_embed(&self) -> Option<&str> {
        self.custom_embed_code
            .as_deref()
            .filter(|code| !code.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.width, "100%");
        assert!(options.show_controls);
        assert!(!options.autoplay);
        assert_eq!(options.color_param(), "3b82f6");
    }

    #[test]
    fn blank_values_count_as_absent() {
        let options = RenderOptions {
            featured_image_url: Some("  ".to_string()),
            custom_embed_code: Some("\n".to_string()),
            ..Default::default()
        };
        assert!(options.featured_image().is_none());
        assert!(options.custom_embed().is_none());
    }

    #[test]
    fn partial_toml_table_keeps_defaults() {
        let options: RenderOptions = toml::from_str(
            r##"
source = "vimeo"
autoplay = true
primary_color = "#ff5500"
"##,
        )
        .unwrap();
        assert_eq!(options.source_override, Some(SourceType::Vimeo));
        assert!(options.autoplay);
        assert_eq!(options.color_param(), "ff5500");
        assert_eq!(options.width, "100%");
    }
}
