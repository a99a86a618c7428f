//! Pixabay image search client.
//!
//! Finds a landscape travel photo for a destination. If nothing matches the
//! city, the search is retried once with the country alone.

use serde::Deserialize;
use tracing::debug;

use super::config::ProviderConfig;
use super::error::ProviderError;
use super::http::get_json;

/// Default base URL for the Pixabay API.
const DEFAULT_BASE_URL: &str = "https://pixabay.com/api";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "webformatURL")]
    webformat_url: Option<String>,
}

/// Client for the Pixabay image search API.
#[derive(Debug, Clone)]
pub struct PixabayClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PixabayClient {
    /// Create a new Pixabay client.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: config.build_http()?,
            base_url: config.base_url_or(DEFAULT_BASE_URL),
            api_key: config.api_key,
        })
    }

    /// Find a thumbnail URL for a destination.
    ///
    /// Falls back to a country-only search when a city was given but
    /// returned no hits.
    pub async fn find_thumbnail(
        &self,
        city: Option<&str>,
        country: Option<&str>,
    ) -> Result<String, ProviderError> {
        let city = city.filter(|c| !c.trim().is_empty());
        let country = country.filter(|c| !c.trim().is_empty());

        if let Some(url) = self.search(city, country).await? {
            return Ok(url);
        }

        if city.is_some() {
            debug!(?city, ?country, "No photo for city, retrying with country");
            if let Some(url) = self.search(None, country).await? {
                return Ok(url);
            }
        }

        Err(ProviderError::NoResults {
            query: search_terms(city, country),
        })
    }

    /// Run one search and return the first hit's URL.
    async fn search(
        &self,
        city: Option<&str>,
        country: Option<&str>,
    ) -> Result<Option<String>, ProviderError> {
        let q = search_terms(city, country);
        let request = self.http.get(&self.base_url).query(&[
            ("category", "travel"),
            ("image_type", "photo"),
            ("key", self.api_key.as_str()),
            ("order", "popular"),
            ("orientation", "horizontal"),
            ("q", q.as_str()),
            ("safesearch", "true"),
        ]);

        let response: SearchResponse = get_json("pixabay", request).await?;
        Ok(response.hits.into_iter().find_map(|h| h.webformat_url))
    }
}

/// Join the non-empty search terms with a space.
fn search_terms(city: Option<&str>, country: Option<&str>) -> String {
    [city, country]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}
