//! Live provider clients plugged into the refresh pipeline.

use chrono::NaiveDate;

use crate::cache::CachedForecastClient;
use crate::domain::ForecastPair;
use crate::providers::{HttpProbe, PixabayClient, ProviderError};

use super::refresh::{ForecastSource, ThumbnailSource, UrlProbe};

impl ThumbnailSource for PixabayClient {
    async fn fetch_thumbnail(
        &self,
        city: Option<&str>,
        country: Option<&str>,
    ) -> Result<String, ProviderError> {
        self.find_thumbnail(city, country).await
    }
}

impl ForecastSource for CachedForecastClient {
    async fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        departure: NaiveDate,
        return_date: NaiveDate,
    ) -> Result<ForecastPair, ProviderError> {
        self.forecast_pair(latitude, longitude, departure, return_date)
            .await
    }
}

impl UrlProbe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<(), ProviderError> {
        self.fetch(url).await
    }
}
