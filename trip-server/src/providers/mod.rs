//! HTTP clients for the external providers.
//!
//! - Pixabay: destination photos
//! - Weatherbit: current conditions and 16-day daily forecasts
//! - GeoNames: place search by name
//! - Positionstack: reverse geocoding with country and timezone details
//!
//! Plus a bare URL probe used to check whether a stored thumbnail link still
//! resolves. Every client has a request timeout; a timeout surfaces as an
//! ordinary `ProviderError::Http`.

mod config;
mod error;
mod geonames;
mod http;
mod pixabay;
mod positionstack;
mod probe;
mod weatherbit;

pub use config::{DEFAULT_TIMEOUT_SECS, ProviderConfig};
pub use error::ProviderError;
pub use geonames::{GeoNamesClient, Place};
pub use pixabay::PixabayClient;
pub use positionstack::{Currency, LocationDetails, PositionstackClient};
pub use probe::HttpProbe;
pub use weatherbit::{ForecastDay, WeatherbitClient, select_forecast_pair};
