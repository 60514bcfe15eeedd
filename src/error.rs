//! Error types for the embed pipeline.
//!
//! None of these are fatal to a render request: the pipeline catches them at
//! the renderer boundary and degrades to a more generic player.

use thiserror::Error;

/// Errors raised by metadata lookups and parsing helpers.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown source type: {0}")]
    UnknownSource(String),
}

pub type Result<T> = std::result::Result<T, EmbedError>;
