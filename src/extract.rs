//! Canonical identifier extraction.
//!
//! Only YouTube and Vimeo (and Archive.org, for the metadata lookup) carry an
//! identifier; every other source renders straight from the raw URL.

use std::sync::LazyLock;

use regex::Regex;

use crate::source::SourceType;

static YOUTUBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:(?i:youtube(?:-nocookie)?\.com)/(?:[^/]+/.+/|(?:v|e(?:mbed)?|shorts|live)/|.*[?&]v=)|(?i:youtu\.be)/)([^"&?/\s]{11})"#,
    )
    .expect("valid YouTube pattern")
});

/// Vimeo URL shapes in precedence order. Patterns with two groups carry a
/// private-link hash.
static VIMEO_RES: LazyLock<[Regex; 5]> = LazyLock::new(|| {
    [
        r"(?i:vimeo\.com)/(\d+)/([a-zA-Z0-9]+)",
        r"(?i:player\.vimeo\.com)/video/(\d+)\?(?:[^#]*&)?h=([a-zA-Z0-9]+)",
        r"(?i:vimeo\.com)/(\d+)\?(?:[^#]*&)?h=([a-zA-Z0-9]+)",
        r"(?i:vimeo\.com)/(\d+)",
        r"(?i:player\.vimeo\.com)/video/(\d+)",
    ]
    .map(|pattern| Regex::new(pattern).expect("valid Vimeo pattern"))
});

static ARCHIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:archive\.org)/(?:details|embed)/([^/?#]+)(?:/([^?#]+))?")
        .expect("valid Archive.org pattern")
});

/// Identifier for `url` when `source` is a platform that has one.
pub fn extract(url: &str, source: SourceType) -> Option<String> {
    match source {
        SourceType::YouTube => youtube_id(url),
        SourceType::Vimeo => vimeo_id(url),
        SourceType::Archive => extract_archive(url).map(|target| target.identifier),
        _ => None,
    }
}

/// The 11-character YouTube video token.
pub fn youtube_id(url: &str) -> Option<String> {
    YOUTUBE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        // Playlist embeds use this path segment in place of a video id.
        .filter(|id| *id != "videoseries")
        .map(str::to_string)
}

/// Vimeo id, as `"{id}?h={hash}"` for private links or the bare numeric id.
pub fn vimeo_id(url: &str) -> Option<String> {
    VIMEO_RES.iter().find_map(|re| {
        let caps = re.captures(url)?;
        let id = caps.get(1)?.as_str();
        Some(match caps.get(2) {
            Some(hash) => format!("{id}?h={}", hash.as_str()),
            None => id.to_string(),
        })
    })
}

/// Archive.org item, optionally narrowed to one file inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveTarget {
    pub identifier: String,
    /// Percent-decoded file path after the identifier.
    pub filename: Option<String>,
}

/// Parse `archive.org/details/{id}[/{file}]` or `archive.org/embed/{id}[/{file}]`.
pub fn extract_archive(url: &str) -> Option<ArchiveTarget> {
    let caps = ARCHIVE_RE.captures(url)?;
    let identifier = caps.get(1)?.as_str().to_string();
    let filename = caps
        .get(2)
        .map(|m| m.as_str().trim_end_matches('/'))
        .filter(|name| !name.is_empty())
        .map(|name| {
            urlencoding::decode(name)
                .map(std::borrow::Cow::into_owned)
                .unwrap_or_else(|_| name.to_string())
        });

    Some(ArchiveTarget {
        identifier,
        filename,
    })
}
