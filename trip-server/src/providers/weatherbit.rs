//! Weatherbit client.
//!
//! Two endpoints are used: current conditions, and the 16-day daily
//! forecast. The forecast is returned as raw days so callers (and the
//! cache) can pick out whichever dates they need.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::{CurrentWeather, ForecastPair, ForecastSnapshot};

use super::config::ProviderConfig;
use super::error::ProviderError;
use super::http::get_json;

/// Default base URL for the Weatherbit API.
const DEFAULT_BASE_URL: &str = "https://api.weatherbit.io/v2.0";

#[derive(Debug, Deserialize)]
struct Response<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct Conditions {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct DailyDto {
    valid_date: NaiveDate,
    rh: f64,
    temp: f64,
    weather: Conditions,
    wind_spd: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentDto {
    ts: i64,
    rh: f64,
    temp: f64,
    weather: Conditions,
    wind_spd: f64,
}

/// One day of the daily forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub snapshot: ForecastSnapshot,
}

impl From<DailyDto> for ForecastDay {
    fn from(dto: DailyDto) -> Self {
        Self {
            date: dto.valid_date,
            snapshot: ForecastSnapshot {
                description: dto.weather.description,
                humidity: dto.rh,
                icon: dto.weather.icon,
                temperature: dto.temp,
                wind_speed: dto.wind_spd,
            },
        }
    }
}

impl From<CurrentDto> for CurrentWeather {
    fn from(dto: CurrentDto) -> Self {
        Self {
            observed_timestamp: dto.ts,
            description: dto.weather.description,
            humidity: dto.rh,
            icon: dto.weather.icon,
            temperature: dto.temp,
            wind_speed: dto.wind_spd,
        }
    }
}

/// Pick the forecasts matching a departure and a return date.
///
/// Either side is `None` if the forecast has no such day.
pub fn select_forecast_pair(
    days: &[ForecastDay],
    departure: NaiveDate,
    return_date: NaiveDate,
) -> ForecastPair {
    let find = |date: NaiveDate| {
        days.iter()
            .find(|d| d.date == date)
            .map(|d| d.snapshot.clone())
    };
    ForecastPair {
        departure_weather: find(departure),
        return_weather: find(return_date),
    }
}

/// Client for the Weatherbit API.
#[derive(Debug, Clone)]
pub struct WeatherbitClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherbitClient {
    /// Create a new Weatherbit client.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: config.build_http()?,
            base_url: config.base_url_or(DEFAULT_BASE_URL),
            api_key: config.api_key,
        })
    }

    /// Fetch the daily forecast for a location, today first.
    pub async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<ForecastDay>, ProviderError> {
        let url = format!("{}/forecast/daily", self.base_url);
        let request = self.http.get(&url).query(&[
            ("key", self.api_key.clone()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
        ]);

        let response: Response<DailyDto> = get_json("weatherbit", request).await?;
        Ok(response.data.into_iter().map(ForecastDay::from).collect())
    }

    /// Fetch current conditions for a location.
    pub async fn current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<CurrentWeather, ProviderError> {
        let url = format!("{}/current", self.base_url);
        let request = self.http.get(&url).query(&[
            ("key", self.api_key.clone()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
        ]);

        let response: Response<CurrentDto> = get_json("weatherbit", request).await?;
        response
            .data
            .into_iter()
            .next()
            .map(CurrentWeather::from)
            .ok_or_else(|| ProviderError::NoResults {
                query: format!("{latitude},{longitude}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn daily_body() -> &'static str {
        r#"{
            "city_name": "Lisbon",
            "data": [
                {"valid_date": "2021-12-24", "rh": 80, "temp": 14.2,
                 "weather": {"icon": "c02d", "description": "Few clouds", "code": 801},
                 "wind_spd": 2.5, "max_temp": 16},
                {"valid_date": "2021-12-25", "rh": 91, "temp": 12.0,
                 "weather": {"icon": "r02d", "description": "Moderate rain", "code": 501},
                 "wind_spd": 5.1}
            ]
        }"#
    }

    #[test]
    fn parse_daily_forecast() {
        let response: Response<DailyDto> = serde_json::from_str(daily_body()).unwrap();
        let days: Vec<ForecastDay> = response.data.into_iter().map(ForecastDay::from).collect();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, date("2021-12-24"));
        assert_eq!(days[0].snapshot.description, "Few clouds");
        assert_eq!(days[0].snapshot.humidity, 80.0);
        assert_eq!(days[1].snapshot.wind_speed, 5.1);
    }

    #[test]
    fn parse_current_conditions() {
        let body = r#"{"count":1,"data":[{"ts":1640340000,"ob_time":"2021-12-24 10:00",
            "rh":75,"temp":13.5,"weather":{"icon":"c01d","description":"Clear sky"},
            "wind_spd":1.2}]}"#;
        let response: Response<CurrentDto> = serde_json::from_str(body).unwrap();
        let current: CurrentWeather = response.data.into_iter().next().unwrap().into();

        assert_eq!(current.observed_timestamp, 1640340000);
        assert_eq!(current.icon, "c01d");
        assert_eq!(current.temperature, 13.5);
    }

    #[test]
    fn select_pair_matches_dates() {
        let response: Response<DailyDto> = serde_json::from_str(daily_body()).unwrap();
        let days: Vec<ForecastDay> = response.data.into_iter().map(ForecastDay::from).collect();

        let pair = select_forecast_pair(&days, date("2021-12-24"), date("2021-12-25"));
        assert_eq!(pair.departure_weather.unwrap().icon, "c02d");
        assert_eq!(pair.return_weather.unwrap().icon, "r02d");
    }

    #[test]
    fn select_pair_leaves_unmatched_side_empty() {
        let response: Response<DailyDto> = serde_json::from_str(daily_body()).unwrap();
        let days: Vec<ForecastDay> = response.data.into_iter().map(ForecastDay::from).collect();

        // Return date is beyond the forecast horizon
        let pair = select_forecast_pair(&days, date("2021-12-25"), date("2022-01-20"));
        assert!(pair.departure_weather.is_some());
        assert!(pair.return_weather.is_none());
    }

    #[test]
    fn missing_data_is_empty() {
        let response: Response<DailyDto> = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_empty());
    }
}
