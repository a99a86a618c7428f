//! Weather snapshots attached to trips.

use serde::{Deserialize, Deserializer, Serialize};

/// Forecast for a single day.
///
/// Either every field is present or the snapshot is absent altogether;
/// trips hold `Option<ForecastSnapshot>`, never a half-filled record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastSnapshot {
    pub description: String,
    /// Relative humidity, percent
    pub humidity: f64,
    pub icon: String,
    /// Degrees Celsius
    pub temperature: f64,
    /// Metres per second
    pub wind_speed: f64,
}

/// Forecasts matched to a trip's departure and return dates.
///
/// Either side may be missing when the provider had no matching day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_weather: Option<ForecastSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_weather: Option<ForecastSnapshot>,
}

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    /// Unix timestamp of the observation
    pub observed_timestamp: i64,
    pub description: String,
    pub humidity: f64,
    pub icon: String,
    pub temperature: f64,
    pub wind_speed: f64,
}

/// Deserialise a snapshot, treating anything malformed as absent.
///
/// Client caches can hold stale shapes; a refresh recomputes weather
/// anyway, so a bad snapshot is dropped rather than failing the request.
pub(crate) fn lenient_snapshot<'de, D>(deserializer: D) -> Result<Option<ForecastSnapshot>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}
