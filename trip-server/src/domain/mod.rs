//! Domain types for the trip planner.
//!
//! A saved trip is a value aggregate: location, imagery, and weather
//! snapshots for a departure/return date pair. Wire-level quirks (numeric
//! strings for coordinates, ids that are numbers or strings) are resolved at
//! deserialisation time so the rest of the crate works with typed values.

mod date;
mod error;
mod trip;
mod weather;

pub use date::{DateWindow, FORECAST_HORIZON_DAYS, days_between, parse_date_string};
pub use error::DomainError;
pub use trip::{DateInfo, LocationInfo, Trip, TripId};
pub use weather::{CurrentWeather, ForecastPair, ForecastSnapshot};
