//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DateWindow, Trip, TripId, days_between};

/// Successful response envelope: `{"success": true, "results": {"data": ...}}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub results: ApiResults<T>,
}

#[derive(Debug, Serialize)]
pub struct ApiResults<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            results: ApiResults { data },
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Request to save a trip.
#[derive(Debug, Deserialize)]
pub struct AddTripRequest {
    pub trip: Trip,
}

/// Request to delete a trip.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveTripRequest {
    pub trip_id: TripId,
}

/// Request to restore a session from the browser's cached trips.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreTripsRequest {
    /// Absent when the browser has nothing cached. Entries are kept as raw
    /// JSON and only parsed if the server has no trips of its own.
    #[serde(default)]
    pub local_storage_trips: Option<Vec<Value>>,
}

/// Place search by name.
#[derive(Debug, Deserialize)]
pub struct GeoNameQuery {
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct CoordinateQuery {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct ThumbnailQuery {
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Forecast lookup for a trip's dates (`YYYY-MM-DD`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub departure_date: String,
    pub return_date: String,
}

/// A saved trip with the values the trip list shows alongside it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedTripView {
    #[serde(flatten)]
    pub trip: Trip,

    /// Days until departure; negative once it has passed
    pub days_from_today: i64,

    pub expired: bool,

    pub trip_length_days: i64,
}

impl SavedTripView {
    pub fn from_trip(trip: Trip, window: &DateWindow) -> Self {
        let departure = trip.departure_info.date;
        Self {
            days_from_today: window.days_from_today(departure),
            expired: window.is_expired(departure),
            trip_length_days: days_between(departure, trip.return_info.date),
            trip,
        }
    }
}
