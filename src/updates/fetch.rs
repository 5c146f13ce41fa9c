//! Manifest retrieval over HTTP or from the file system.

use reqwest::blocking::Client;
use std::fs;
use std::time::Duration;

use super::manifest::{parse_manifest, ManifestInfo, ManifestSource};
use crate::deployment::DeploymentUri;
use crate::error::{Error, FetchError, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches and parses deployment manifests.
pub struct ManifestFetcher {
    client: Client,
    timeout: Duration,
}

impl ManifestFetcher {
    /// Create a fetcher with the default 30-second timeout.
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT, "deployinfo")
    }

    /// Create a fetcher with a custom timeout and user agent.
    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Other(anyhow::anyhow!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch the manifest at `location`.
    ///
    /// Returns `Ok(None)` when the location is neither a network address
    /// nor a file. `application` is used in the invalid-manifest message.
    pub fn fetch(
        &self,
        location: &DeploymentUri,
        application: &str,
    ) -> Result<Option<ManifestInfo>> {
        let Some(source) = ManifestSource::resolve(location) else {
            tracing::debug!("No manifest source for update location {}", location);
            return Ok(None);
        };

        let text = self.read_source(&source)?;
        let info = parse_manifest(&text, application)?;
        tracing::debug!(
            "Manifest at {} publishes {} (minimum {:?})",
            location,
            info.version,
            info.minimum_required_version
        );
        Ok(Some(info))
    }

    /// Read the raw document text.
    pub fn read_source(&self, source: &ManifestSource) -> std::result::Result<String, FetchError> {
        match source {
            ManifestSource::Remote(url) => {
                tracing::debug!("Fetching manifest from {}", url);
                let http_err = |source| FetchError::Http {
                    url: url.to_string(),
                    source,
                };

                let response = self.client.get(url.as_str()).send().map_err(http_err)?;
                if !response.status().is_success() {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: response.status().as_u16(),
                    });
                }
                let body = response.bytes().map_err(http_err)?;
                Ok(String::from_utf8_lossy(&body).into_owned())
            }
            ManifestSource::File(path) => {
                tracing::debug!("Reading manifest from {}", path.display());
                let bytes = fs::read(path).map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }
}
