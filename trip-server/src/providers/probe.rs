//! Liveness probe for stored image links.
//!
//! Image search results hand out links that expire. The only reliable way
//! to tell whether one still works is to fetch it.

use super::config::ProviderConfig;
use super::error::ProviderError;

/// Fetches a URL and reports whether it could be retrieved.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    http: reqwest::Client,
}

impl HttpProbe {
    /// Create a new probe. Only the timeout of `config` is used.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: config.build_http()?,
        })
    }

    /// Retrieve `url` in full. Any non-2xx status is an error.
    pub async fn fetch(&self, url: &str) -> Result<(), ProviderError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: format!("probe of {url} failed"),
            });
        }

        response.bytes().await?;
        Ok(())
    }
}
