//! Caching layer for Weatherbit forecasts.
//!
//! Restoring a session refreshes every saved trip at once, and several trips
//! often share a destination. The daily forecast for a coordinate does not
//! depend on the trip's dates, so the raw forecast days are cached per
//! coordinate and the matching days are picked out on every call.
//!
//! Coordinates are bucketed to four decimal places (about 11 m) so that the
//! same place reported as `"51.50853"` and `51.508530001` shares an entry.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;

use crate::domain::{CurrentWeather, ForecastPair};
use crate::providers::{ForecastDay, ProviderError, WeatherbitClient, select_forecast_pair};

/// Cache key: coordinates scaled by 10^4 and rounded.
type CoordKey = (i64, i64);

/// Cached forecast entry.
type ForecastEntry = Arc<Vec<ForecastDay>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 1000,
        }
    }
}

/// Bucket a coordinate pair into a cache key.
fn coord_key(latitude: f64, longitude: f64) -> CoordKey {
    (
        (latitude * 10_000.0).round() as i64,
        (longitude * 10_000.0).round() as i64,
    )
}

/// Weatherbit client with caching of daily forecasts.
///
/// Current conditions are not cached; they are only fetched on demand for
/// a single destination.
pub struct CachedForecastClient {
    client: WeatherbitClient,
    forecasts: MokaCache<CoordKey, ForecastEntry>,
}

impl CachedForecastClient {
    /// Create a new cached client.
    pub fn new(client: WeatherbitClient, config: &CacheConfig) -> Self {
        let forecasts = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, forecasts }
    }

    /// Get the daily forecast for a coordinate, using the cache if available.
    ///
    /// Concurrent misses for the same coordinate share a single provider
    /// call. Failures are never cached, so the next refresh retries.
    pub async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ForecastEntry, ProviderError> {
        self.forecasts
            .try_get_with(coord_key(latitude, longitude), async {
                self.client
                    .daily_forecast(latitude, longitude)
                    .await
                    .map(Arc::new)
            })
            .await
            .map_err(|e| Arc::try_unwrap(e).unwrap_or_else(ProviderError::Shared))
    }

    /// Forecasts for a trip's departure and return dates.
    pub async fn forecast_pair(
        &self,
        latitude: f64,
        longitude: f64,
        departure: NaiveDate,
        return_date: NaiveDate,
    ) -> Result<ForecastPair, ProviderError> {
        let days = self.daily_forecast(latitude, longitude).await?;
        Ok(select_forecast_pair(&days, departure, return_date))
    }

    /// Current conditions, straight from the provider.
    pub async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, ProviderError> {
        self.client.current(latitude, longitude).await
    }
}
