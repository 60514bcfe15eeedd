//! HTTP client for platform metadata lookups
//!
//! Features:
//! - HTTP/2 with adaptive flow control
//! - TLS 1.3 via rustls (verification can be relaxed per integration)
//! - Brotli, Zstd, Gzip compression (auto-negotiated)
//! - Connection pooling with keep-alive
//! - Per-request timeouts so a slow upstream never stalls a render

use std::time::Duration;

use reqwest::{Client, Response};
use tracing::{debug, instrument};

use crate::config::MetadataSettings;
use crate::error::{EmbedError, Result};

const USER_AGENT: &str = concat!("mediaembed/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client with default settings (certificate verification on).
    pub fn new() -> Result<Self> {
        Self::build(false, Duration::from_secs(10))
    }

    /// Create a client configured for metadata lookups.
    pub fn for_metadata(settings: &MetadataSettings) -> Result<Self> {
        Self::build(settings.accept_invalid_certs, settings.timeout())
    }

    fn build(accept_invalid_certs: bool, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            // ═══════════════════════════════════════════════════════════════
            // CONNECTION
            // ═══════════════════════════════════════════════════════════════
            .http2_adaptive_window(true)
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            // ═══════════════════════════════════════════════════════════════
            // TLS
            // ═══════════════════════════════════════════════════════════════
            .use_rustls_tls()
            .danger_accept_invalid_certs(accept_invalid_certs)
            // ═══════════════════════════════════════════════════════════════
            // COMPRESSION (auto-negotiated via Accept-Encoding)
            // ═══════════════════════════════════════════════════════════════
            .brotli(true)
            .zstd(true)
            .gzip(true)
            .deflate(true)
            // ═══════════════════════════════════════════════════════════════
            // TIMEOUTS
            // ═══════════════════════════════════════════════════════════════
            .connect_timeout(timeout)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    /// GET `url`, failing with [`EmbedError::Timeout`] after `timeout`.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<Response> {
        debug!("Fetching");
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbedError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    EmbedError::Http(e)
                }
            })?;

        debug!(status = %response.status(), version = ?response.version(), "Response received");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_settings() {
        assert!(HttpClient::new().is_ok());
    }

    #[test]
    fn builds_with_relaxed_tls() {
        let settings = MetadataSettings::default();
        assert!(settings.accept_invalid_certs);
        assert!(HttpClient::for_metadata(&settings).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_an_error_not_a_panic() {
        let client = HttpClient::new().unwrap();
        let result = client
            .get("http://127.0.0.1:9/metadata/x", Duration::from_millis(500))
            .await;
        assert!(result.is_err());
    }
}
