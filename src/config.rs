//! Settings loaded from `~/.config/mediaembed/config.toml`.
//!
//! ```toml
//! [render]
//! width = "640px"
//! primary_color = "#ff5500"
//!
//! [metadata]
//! ttl_secs = 3600
//! timeout_secs = 3
//! capacity = 512
//! accept_invalid_certs = true
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::options::RenderOptions;

/// Top-level settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default render options; CLI flags override these per call.
    pub render: RenderOptions,
    pub metadata: MetadataSettings,
}

/// Archive.org metadata lookup and cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    /// How long a fetched metadata document stays fresh.
    pub ttl_secs: u64,
    /// Per-request timeout for the metadata endpoint.
    pub timeout_secs: u64,
    /// Maximum number of cached documents.
    pub capacity: usize,
    /// Base URL; the item identifier is appended as a path segment.
    pub endpoint: String,
    /// Skip TLS certificate verification for metadata requests.
    pub accept_invalid_certs: bool,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            ttl_secs: 3600,
            timeout_secs: 3,
            capacity: 512,
            endpoint: "https://archive.org/metadata".to_string(),
            accept_invalid_certs: true,
        }
    }
}

impl MetadataSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load settings from the default config path.
///
/// Returns defaults if the file doesn't exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings() -> Result<Settings> {
    let path = config_path();
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    parse_settings(&content).with_context(|| format!("invalid TOML in {}", path.display()))
}

/// Parse a settings document.
pub fn parse_settings(content: &str) -> Result<Settings> {
    Ok(toml::from_str(content)?)
}

/// Return the path to the config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mediaembed")
        .join("config.toml")
}
