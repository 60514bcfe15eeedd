//! Remote metadata fetcher for Archive.org items.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::instrument;

use super::ArchiveMetadata;
use crate::config::MetadataSettings;
use crate::error::{EmbedError, Result};
use crate::http_client::HttpClient;

/// Source of metadata documents for an item identifier.
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    async fn fetch(&self, identifier: &str) -> Result<ArchiveMetadata>;
}

/// Fetches `{endpoint}/{identifier}` from the Archive.org metadata API.
pub struct ArchiveFetcher {
    client: HttpClient,
    endpoint: String,
    timeout: Duration,
}

impl ArchiveFetcher {
    pub fn new(client: HttpClient, settings: &MetadataSettings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            timeout: settings.timeout(),
        }
    }

    fn metadata_url(&self, identifier: &str) -> String {
        format!("{}/{}", self.endpoint, urlencoding::encode(identifier))
    }
}

#[async_trait]
impl MetadataFetcher for ArchiveFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, identifier: &str) -> Result<ArchiveMetadata> {
        let url = self.metadata_url(identifier);
        let response = self.client.get(&url, self.timeout).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(EmbedError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                EmbedError::Timeout { url: url.clone() }
            } else {
                EmbedError::Http(e)
            }
        })?;

        parse_metadata(&body)
    }
}

/// Parse a metadata response body. Documents without a `files` array
/// (the API answers `{}` for unknown items) are rejected.
pub fn parse_metadata(body: &str) -> Result<ArchiveMetadata> {
    Ok(serde_json::from_str(body)?)
}
