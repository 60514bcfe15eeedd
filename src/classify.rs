//! URL classification.
//!
//! Checks run in a fixed order and the first match wins; the patterns overlap
//! on purpose (a `youtube.com` URL without a video token is not YouTube).

use url::Url;

use crate::extract::youtube_id;
use crate::source::SourceType;

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "ogv"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "oga", "m4a"];

/// Map a URL to the platform or file kind it belongs to.
///
/// `ogg` appears in both extension sets; video is checked first, so `.ogg`
/// files classify as video.
pub fn classify(url: &str) -> SourceType {
    let url = url.trim();
    if url.is_empty() {
        return SourceType::None;
    }

    if youtube_id(url).is_some() {
        return SourceType::YouTube;
    }

    if host_contains(url, "vimeo.com") {
        return SourceType::Vimeo;
    }
    if host_contains(url, "soundcloud.com") {
        return SourceType::SoundCloud;
    }
    if host_contains(url, "archive.org") {
        return SourceType::Archive;
    }

    if let Some(ext) = path_extension(url) {
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            return SourceType::Video;
        }
        if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            return SourceType::Audio;
        }
    }

    SourceType::Unknown
}

/// Case-insensitive host match. Falls back to the raw input for strings
/// that don't parse as absolute URLs.
fn host_contains(url: &str, needle: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed
            .host_str()
            .is_some_and(|host| host.to_lowercase().contains(needle)),
        Err(_) => url.to_lowercase().contains(needle),
    }
}

/// Lowercased extension of the last path segment, ignoring query and fragment.
pub(crate) fn path_extension(url: &str) -> Option<String> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    let segment = path.rsplit('/').next()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}
