//! GeoNames place search client.

use serde::{Deserialize, Serialize};

use super::config::ProviderConfig;
use super::error::ProviderError;
use super::http::get_json;

/// Default base URL for the GeoNames web services.
const DEFAULT_BASE_URL: &str = "http://api.geonames.org";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    geonames: Vec<GeoNameDto>,
    /// GeoNames reports errors with HTTP 200 and a `status` object
    status: Option<StatusDto>,
}

#[derive(Debug, Deserialize)]
struct StatusDto {
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoNameDto {
    geoname_id: i64,
    name: String,
    country_name: Option<String>,
    admin_name1: Option<String>,
    lat: String,
    lng: String,
}

/// A place matched by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub city: String,
    pub country: Option<String>,
    pub county: Option<String>,
    pub geoname_id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl TryFrom<GeoNameDto> for Place {
    type Error = ProviderError;

    fn try_from(dto: GeoNameDto) -> Result<Self, Self::Error> {
        let coord = |s: &str| {
            s.parse::<f64>().map_err(|_| ProviderError::Json {
                message: format!("invalid coordinate {s:?}"),
            })
        };
        Ok(Self {
            latitude: coord(&dto.lat)?,
            longitude: coord(&dto.lng)?,
            city: dto.name,
            country: dto.country_name,
            county: dto.admin_name1.filter(|s| !s.is_empty()),
            geoname_id: dto.geoname_id,
        })
    }
}

/// Client for the GeoNames search API.
#[derive(Debug, Clone)]
pub struct GeoNamesClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
}

impl GeoNamesClient {
    /// Create a new GeoNames client. The credential is the account username.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            http: config.build_http()?,
            base_url: config.base_url_or(DEFAULT_BASE_URL),
            username: config.api_key,
        })
    }

    /// Find the best match for a free-text location.
    pub async fn search(&self, location: &str) -> Result<Place, ProviderError> {
        let url = format!("{}/searchJSON", self.base_url);
        let request = self.http.get(&url).query(&[
            ("maxRows", "1"),
            ("q", location),
            ("username", self.username.as_str()),
        ]);

        let response: SearchResponse = get_json("geonames", request).await?;
        first_place(response, location)
    }
}

fn first_place(response: SearchResponse, location: &str) -> Result<Place, ProviderError> {
    if let Some(status) = response.status {
        return Err(ProviderError::Api {
            status: 502,
            message: status.message,
        });
    }

    response
        .geonames
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::NoResults {
            query: location.to_string(),
        })?
        .try_into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_first_match() {
        let body = r#"{"totalResultsCount":3,"geonames":[{"adminCode1":"ENG",
            "lng":"-0.12574","geonameId":2643743,"toponymName":"London",
            "countryId":"2635167","fcl":"P","population":8961989,
            "countryCode":"GB","name":"London","fclName":"city, village,...",
            "countryName":"United Kingdom","fcodeName":"capital of a political entity",
            "adminName1":"England","lat":"51.50853","fcode":"PPLC"}]}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        let place = first_place(response, "london").unwrap();

        assert_eq!(place.city, "London");
        assert_eq!(place.country.as_deref(), Some("United Kingdom"));
        assert_eq!(place.county.as_deref(), Some("England"));
        assert_eq!(place.geoname_id, 2643743);
        assert!((place.latitude - 51.50853).abs() < 1e-9);
    }

    #[test]
    fn empty_result_is_no_results() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"totalResultsCount":0,"geonames":[]}"#).unwrap();
        let err = first_place(response, "xyzzy").unwrap_err();
        assert!(matches!(err, ProviderError::NoResults { query } if query == "xyzzy"));
    }

    #[test]
    fn status_object_is_an_error() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"status":{"message":"user account not enabled to use the free webservice.","value":10}}"#,
        )
        .unwrap();
        let err = first_place(response, "london").unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error 502: user account not enabled to use the free webservice."
        );
    }
}
