//! Positionstack reverse geocoding client.
//!
//! Used for the country and timezone details shown alongside a trip.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::ProviderConfig;
use super::error::ProviderError;
use super::http::get_json;

/// Default base URL for the Positionstack API.
const DEFAULT_BASE_URL: &str = "http://api.positionstack.com/v1";

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    data: Vec<ReverseDto>,
}

#[derive(Debug, Deserialize)]
struct ReverseDto {
    continent: Option<String>,
    country_module: CountryModule,
    timezone_module: TimezoneModule,
}

#[derive(Debug, Deserialize)]
struct CountryModule {
    capital: Option<String>,
    #[serde(default)]
    currencies: Vec<Currency>,
    /// Keyed by ISO code, e.g. `{"eng": "English"}`
    #[serde(default)]
    languages: serde_json::Map<String, Value>,
    flag: Option<String>,
    global: Option<GlobalInfo>,
}

#[derive(Debug, Deserialize)]
struct GlobalInfo {
    subregion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TimezoneModule {
    name: Option<String>,
    offset_string: Option<String>,
}

/// A currency used in a country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub name: String,
}

/// Country and timezone details for a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationDetails {
    pub capital: Option<String>,
    pub continent: Option<String>,
    pub currencies: Vec<Currency>,
    pub languages: Vec<String>,
    pub timezone: Option<String>,
    pub offset: Option<String>,
    pub flag: Option<String>,
    pub subregion: Option<String>,
}

impl From<ReverseDto> for LocationDetails {
    fn from(dto: ReverseDto) -> Self {
        let country = dto.country_module;
        Self {
            capital: country.capital,
            continent: dto.continent,
            currencies: country.currencies,
            languages: country
                .languages
                .into_iter()
                .filter_map(|(_, v)| v.as_str().map(str::to_string))
                .collect(),
            timezone: dto.timezone_module.name,
            offset: dto.timezone_module.offset_string,
            flag: country.flag,
            subregion: country.global.and_then(|g| g.subregion),
        }
    }
}

/// Client for the Positionstack API.
#[derive(Debug, Clone)]
pub struct PositionstackClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PositionstackClient {
    /// Create a new Positionstack client.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: config.build_http()?,
            base_url: config.base_url_or(DEFAULT_BASE_URL),
            api_key: config.api_key,
        })
    }

    /// Look up country and timezone details for a coordinate.
    pub async fn location_details(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<LocationDetails, ProviderError> {
        let url = format!("{}/reverse", self.base_url);
        let query = format!("{latitude},{longitude}");
        let request = self.http.get(&url).query(&[
            ("access_key", self.api_key.as_str()),
            ("country_module", "1"),
            ("limit", "1"),
            ("query", query.as_str()),
            ("timezone_module", "1"),
        ]);

        let response: ReverseResponse = get_json("positionstack", request).await?;
        response
            .data
            .into_iter()
            .next()
            .map(LocationDetails::from)
            .ok_or(ProviderError::NoResults { query })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reverse_result() {
        let body = r#"{"data":[{"latitude":38.72,"longitude":-9.14,"label":"Lisbon, Portugal",
            "continent":"Europe",
            "country_module":{"latitude":39.5,"capital":"Lisbon",
                "languages":{"por":"Portuguese"},"flag":"https://flags/pt.svg",
                "currencies":[{"symbol":"€","code":"EUR","name":"Euro"}],
                "global":{"alpha2":"PT","region":"Europe","subregion":"Southern Europe"}},
            "timezone_module":{"name":"Europe/Lisbon","offset_sec":0,"offset_string":"+00:00"}}]}"#;
        let response: ReverseResponse = serde_json::from_str(body).unwrap();
        let details: LocationDetails = response.data.into_iter().next().unwrap().into();

        assert_eq!(details.capital.as_deref(), Some("Lisbon"));
        assert_eq!(details.continent.as_deref(), Some("Europe"));
        assert_eq!(
            details.currencies,
            vec![Currency {
                code: "EUR".into(),
                name: "Euro".into()
            }]
        );
        assert_eq!(details.languages, vec!["Portuguese".to_string()]);
        assert_eq!(details.timezone.as_deref(), Some("Europe/Lisbon"));
        assert_eq!(details.offset.as_deref(), Some("+00:00"));
        assert_eq!(details.subregion.as_deref(), Some("Southern Europe"));
    }
}
