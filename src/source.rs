//! Source types and per-request media references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::error::EmbedError;
use crate::extract::extract;

/// Media platform (or file kind) a URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    YouTube,
    Vimeo,
    SoundCloud,
    Archive,
    Video,
    Audio,
    Unknown,
    None,
}

impl SourceType {
    /// All variants, in classification order.
    pub const ALL: [SourceType; 8] = [
        SourceType::YouTube,
        SourceType::Vimeo,
        SourceType::SoundCloud,
        SourceType::Archive,
        SourceType::Video,
        SourceType::Audio,
        SourceType::Unknown,
        SourceType::None,
    ];

    /// Lowercase tag used in markup attributes and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::YouTube => "youtube",
            SourceType::Vimeo => "vimeo",
            SourceType::SoundCloud => "soundcloud",
            SourceType::Archive => "archive",
            SourceType::Video => "video",
            SourceType::Audio => "audio",
            SourceType::Unknown => "unknown",
            SourceType::None => "none",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = EmbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        SourceType::ALL
            .into_iter()
            .find(|source| source.as_str() == tag)
            .ok_or_else(|| EmbedError::UnknownSource(s.to_string()))
    }
}

/// A single resolution request: the input URL plus what it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaReference {
    pub url: String,
    pub explicit_source_override: Option<SourceType>,
    pub resolved_source: SourceType,
    pub identifier: Option<String>,
}

impl MediaReference {
    /// Classify `url` (unless overridden) and extract its identifier.
    ///
    /// An empty URL always resolves to [`SourceType::None`]. A `none`
    /// override on a non-empty URL is ignored.
    pub fn resolve(url: &str, source_override: Option<SourceType>) -> Self {
        let trimmed = url.trim();
        let resolved_source = if trimmed.is_empty() {
            SourceType::None
        } else {
            match source_override {
                Some(source) if source != SourceType::None => source,
                _ => classify(trimmed),
            }
        };

        Self {
            url: trimmed.to_string(),
            explicit_source_override: source_override,
            resolved_source,
            identifier: extract(trimmed, resolved_source),
        }
    }
}
