//! Per-trip refresh of time-sensitive derived data.
//!
//! Two things go stale on a saved trip: the thumbnail link (image hosts
//! expire them) and the weather forecast (only obtainable for the next
//! sixteen days). Each is recomputed independently and each degrades to
//! "absent" on failure.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::{DateWindow, ForecastPair, Trip};
use crate::providers::ProviderError;

/// Source of destination photos.
pub trait ThumbnailSource: Send + Sync {
    /// Find a photo URL for a destination.
    fn fetch_thumbnail(
        &self,
        city: Option<&str>,
        country: Option<&str>,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

/// Source of daily weather forecasts.
pub trait ForecastSource: Send + Sync {
    /// Forecasts for the two dates; either side may be absent.
    fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        departure: NaiveDate,
        return_date: NaiveDate,
    ) -> impl Future<Output = Result<ForecastPair, ProviderError>> + Send;
}

/// Retrieves a URL to see whether it still resolves.
pub trait UrlProbe: Send + Sync {
    fn probe(&self, url: &str) -> impl Future<Output = Result<(), ProviderError>> + Send;
}

impl<S: ThumbnailSource> ThumbnailSource for Arc<S> {
    fn fetch_thumbnail(
        &self,
        city: Option<&str>,
        country: Option<&str>,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send {
        (**self).fetch_thumbnail(city, country)
    }
}

impl<S: ForecastSource> ForecastSource for Arc<S> {
    fn fetch_forecast(
        &self,
        latitude: f64,
        longitude: f64,
        departure: NaiveDate,
        return_date: NaiveDate,
    ) -> impl Future<Output = Result<ForecastPair, ProviderError>> + Send {
        (**self).fetch_forecast(latitude, longitude, departure, return_date)
    }
}

impl<S: UrlProbe> UrlProbe for Arc<S> {
    fn probe(&self, url: &str) -> impl Future<Output = Result<(), ProviderError>> + Send {
        (**self).probe(url)
    }
}

/// Decides whether a stored thumbnail link can be kept.
#[derive(Debug, Clone)]
pub struct ThumbnailValidator<P> {
    probe: P,
}

impl<P: UrlProbe> ThumbnailValidator<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }

    /// True if `url` could be retrieved. Failures of any kind are `false`.
    pub async fn is_still_valid(&self, url: &str) -> bool {
        match self.probe.probe(url).await {
            Ok(()) => true,
            Err(e) => {
                debug!(url, error = %e, "Stored thumbnail no longer retrievable");
                false
            }
        }
    }

    /// Like [`is_still_valid`](Self::is_still_valid), with a missing link
    /// counting as invalid without any request being made.
    pub async fn is_usable(&self, url: Option<&str>) -> bool {
        match url {
            Some(url) => self.is_still_valid(url).await,
            None => false,
        }
    }
}

/// Brings one trip's thumbnail and weather up to date.
pub struct RefreshPipeline<T, F, P> {
    thumbnails: T,
    forecasts: F,
    validator: ThumbnailValidator<P>,
}

impl<T, F, P> RefreshPipeline<T, F, P>
where
    T: ThumbnailSource,
    F: ForecastSource,
    P: UrlProbe,
{
    pub fn new(thumbnails: T, forecasts: F, probe: P) -> Self {
        Self {
            thumbnails,
            forecasts,
            validator: ThumbnailValidator::new(probe),
        }
    }

    /// Return `trip` with thumbnail and weather recomputed.
    ///
    /// All other fields are left as they were. This never fails.
    pub async fn refresh(&self, trip: Trip, window: &DateWindow) -> Trip {
        let (thumbnail, forecast) = tokio::join!(
            self.refresh_thumbnail(&trip),
            self.refresh_forecast(&trip, window)
        );
        trip.with_derived(thumbnail, forecast)
    }

    /// Keep a working link, otherwise look for a new one.
    async fn refresh_thumbnail(&self, trip: &Trip) -> Option<String> {
        let current = trip.thumbnail.as_deref();
        if self.validator.is_usable(current).await {
            return current.map(str::to_string);
        }

        let location = &trip.location_info;
        match self
            .thumbnails
            .fetch_thumbnail(location.city.as_deref(), location.country.as_deref())
            .await
        {
            Ok(url) => Some(url),
            Err(e) => {
                debug!(trip = %trip.id, error = %e, "No replacement thumbnail, leaving it empty");
                None
            }
        }
    }

    /// Fresh forecasts while the departure is inside the forecast window.
    ///
    /// Outside the window both sides are cleared rather than keeping
    /// whatever forecast the trip carried before.
    async fn refresh_forecast(&self, trip: &Trip, window: &DateWindow) -> ForecastPair {
        let departure = trip.departure_info.date;
        if !window.is_forecastable(departure) {
            return ForecastPair::default();
        }

        let location = &trip.location_info;
        match self
            .forecasts
            .fetch_forecast(
                location.latitude,
                location.longitude,
                departure,
                trip.return_info.date,
            )
            .await
        {
            Ok(pair) => pair,
            Err(e) => {
                debug!(trip = %trip.id, error = %e, "Forecast unavailable, leaving weather empty");
                ForecastPair::default()
            }
        }
    }
}
