//! The saved trip aggregate.

use std::fmt;

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::weather::{ForecastPair, ForecastSnapshot, lenient_snapshot};

/// Caller-supplied trip identifier.
///
/// The client uses the geocoder's numeric place id, but any string is
/// accepted. Two ids are equal only if they have the same kind and value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TripId {
    Number(i64),
    Text(String),
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripId::Number(n) => write!(f, "{n}"),
            TripId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TripId {
    fn from(n: i64) -> Self {
        TripId::Number(n)
    }
}

impl From<&str> for TripId {
    fn from(s: &str) -> Self {
        TripId::Text(s.to_string())
    }
}

/// Where the trip goes.
///
/// Only the city, country and coordinates are interpreted; capital,
/// currencies, languages, timezone and the rest are carried through as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(deserialize_with = "coordinate")]
    pub latitude: f64,

    #[serde(deserialize_with = "coordinate")]
    pub longitude: f64,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LocationInfo {
    pub fn new(city: impl Into<String>, country: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            city: Some(city.into()),
            country: Some(country.into()),
            latitude: lat,
            longitude: lon,
            extra: Map::new(),
        }
    }
}

/// One end of the trip: a calendar date and, maybe, its forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateInfo {
    #[serde(rename = "dateString")]
    pub date: NaiveDate,

    #[serde(
        default,
        deserialize_with = "lenient_snapshot",
        skip_serializing_if = "Option::is_none"
    )]
    pub weather: Option<ForecastSnapshot>,
}

impl DateInfo {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            weather: None,
        }
    }
}

/// A saved trip.
///
/// Unknown top-level fields (for example the client's `currentInfo`) are
/// kept so a trip comes back from the server as it was sent, apart from
/// the refreshed thumbnail and weather.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    pub location_info: LocationInfo,

    pub departure_info: DateInfo,

    pub return_info: DateInfo,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Trip {
    /// Create a trip with no thumbnail and no weather.
    pub fn new(
        id: impl Into<TripId>,
        location_info: LocationInfo,
        departure: NaiveDate,
        return_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            thumbnail: None,
            location_info,
            departure_info: DateInfo::new(departure),
            return_info: DateInfo::new(return_date),
            extra: Map::new(),
        }
    }

    /// Replace the derived fields, leaving everything else untouched.
    pub fn with_derived(mut self, thumbnail: Option<String>, forecast: ForecastPair) -> Self {
        self.thumbnail = thumbnail;
        self.departure_info.weather = forecast.departure_weather;
        self.return_info.weather = forecast.return_weather;
        self
    }
}

/// Accept a coordinate as a JSON number or a numeric string.
///
/// The geocoder reports `"51.50853"`; clients that echo that back should
/// not have to convert it first.
fn coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("invalid coordinate {s:?}")))?,
    };

    if !value.is_finite() {
        return Err(D::Error::custom("coordinate must be finite"));
    }
    Ok(value)
}
