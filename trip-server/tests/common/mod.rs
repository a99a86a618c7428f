//! Shared helpers for integration tests: a local stand-in for the external
//! providers, and request helpers for the router.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{Duration, NaiveDate, Utc};
use serde_json::{Value, json};
use tower::ServiceExt;

use trip_server::cache::{CacheConfig, CachedForecastClient};
use trip_server::providers::{
    GeoNamesClient, HttpProbe, PixabayClient, PositionstackClient, ProviderConfig,
    WeatherbitClient,
};
use trip_server::trips::ReconcileConfig;
use trip_server::web::{AppState, create_router};

/// Calls received by the mock providers.
#[derive(Default)]
pub struct Calls {
    pub pixabay: AtomicUsize,
    pub forecast: AtomicUsize,
    pub images: AtomicUsize,
}

impl Calls {
    pub fn pixabay(&self) -> usize {
        self.pixabay.load(Ordering::SeqCst)
    }

    pub fn forecast(&self) -> usize {
        self.forecast.load(Ordering::SeqCst)
    }
}

#[derive(Clone)]
struct MockState {
    base: String,
    calls: Arc<Calls>,
}

/// A running mock provider server.
pub struct MockProviders {
    pub base: String,
    pub calls: Arc<Calls>,
}

impl MockProviders {
    /// URL of an image the mock serves.
    pub fn live_image(&self, name: &str) -> String {
        format!("{}/images/{name}", self.base)
    }

    /// URL of an image that no longer exists.
    pub fn dead_image(&self) -> String {
        format!("{}/images/dead.jpg", self.base)
    }

    fn config(&self, path: &str) -> ProviderConfig {
        ProviderConfig::new("test-key")
            .with_base_url(format!("{}/{path}", self.base))
            .with_timeout(5)
    }

    /// App state whose clients all point at this mock.
    pub fn app_state(&self, reconcile: ReconcileConfig) -> AppState {
        let weatherbit = WeatherbitClient::new(self.config("weatherbit")).unwrap();
        AppState::new(
            GeoNamesClient::new(self.config("geonames")).unwrap(),
            PositionstackClient::new(self.config("positionstack")).unwrap(),
            PixabayClient::new(self.config("pixabay")).unwrap(),
            CachedForecastClient::new(weatherbit, &CacheConfig::default()),
            HttpProbe::new(&self.config("")).unwrap(),
            reconcile,
        )
    }

    /// Router wired to this mock.
    pub fn app(&self, static_dir: &str) -> Router {
        create_router(self.app_state(ReconcileConfig::default()), static_dir)
    }
}

/// Today's date as the server sees it.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// `today + days` as `YYYY-MM-DD`.
pub fn day(days: i64) -> String {
    (today() + Duration::days(days)).format("%Y-%m-%d").to_string()
}

/// Start the mock providers on an ephemeral port.
pub async fn spawn_mock_providers() -> MockProviders {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let calls = Arc::new(Calls::default());

    let state = MockState {
        base: base.clone(),
        calls: Arc::clone(&calls),
    };
    let app = Router::new()
        .route("/pixabay", get(pixabay))
        .route("/images/:name", get(image))
        .route("/weatherbit/forecast/daily", get(forecast_daily))
        .route("/weatherbit/current", get(current))
        .route("/geonames/searchJSON", get(geonames))
        .route("/positionstack/reverse", get(positionstack))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockProviders { base, calls }
}

async fn pixabay(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.calls.pixabay.fetch_add(1, Ordering::SeqCst);
    let image = match params.get("q").map(String::as_str) {
        Some("Lisbon Portugal") => Some("lisbon.jpg"),
        Some("Porto Portugal") => Some("porto.jpg"),
        Some("Portugal") => Some("portugal.jpg"),
        _ => None,
    };
    let hits: Vec<Value> = image
        .map(|name| json!({"id": 1, "webformatURL": format!("{}/images/{name}", state.base)}))
        .into_iter()
        .collect();
    Json(json!({"total": hits.len(), "totalHits": hits.len(), "hits": hits}))
}

async fn image(State(state): State<MockState>, Path(name): Path<String>) -> impl IntoResponse {
    state.calls.images.fetch_add(1, Ordering::SeqCst);
    if name.starts_with("dead") {
        (StatusCode::NOT_FOUND, "gone").into_response()
    } else {
        (StatusCode::OK, "jpeg bytes").into_response()
    }
}

/// Sixteen days starting today; day `i` has temperature `i`.
async fn forecast_daily(State(state): State<MockState>) -> Json<Value> {
    state.calls.forecast.fetch_add(1, Ordering::SeqCst);
    let data: Vec<Value> = (0..16)
        .map(|i| {
            json!({
                "valid_date": day(i),
                "rh": 60,
                "temp": i as f64,
                "wind_spd": 2.5,
                "weather": {"icon": "c02d", "code": 802, "description": "Scattered clouds"}
            })
        })
        .collect();
    Json(json!({"city_name": "Lisbon", "data": data}))
}

async fn current() -> Json<Value> {
    Json(json!({
        "count": 1,
        "data": [{
            "ts": 1_640_340_000,
            "rh": 81,
            "temp": 14.2,
            "wind_spd": 4.1,
            "weather": {"icon": "r01d", "code": 500, "description": "Light rain"}
        }]
    }))
}

async fn geonames(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    match params.get("q").map(String::as_str) {
        Some("Lisbon") => Json(json!({
            "totalResultsCount": 1,
            "geonames": [{
                "geonameId": 2267057,
                "name": "Lisbon",
                "countryName": "Portugal",
                "adminName1": "Lisbon",
                "lat": "38.71667",
                "lng": "-9.13333"
            }]
        })),
        Some("over-limit") => Json(json!({
            "status": {"message": "the daily limit of 20000 credits has been exceeded", "value": 18}
        })),
        _ => Json(json!({"totalResultsCount": 0, "geonames": []})),
    }
}

async fn positionstack() -> Json<Value> {
    Json(json!({
        "data": [{
            "label": "Lisbon, Portugal",
            "continent": "Europe",
            "country_module": {
                "capital": "Lisbon",
                "languages": {"por": "Portuguese"},
                "flag": "https://flags/pt.svg",
                "currencies": [{"symbol": "€", "code": "EUR", "name": "Euro"}],
                "global": {"subregion": "Southern Europe"}
            },
            "timezone_module": {"name": "Europe/Lisbon", "offset_string": "+00:00"}
        }]
    }))
}

/// Send a request and return `(status, json_body)`.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(body)
                .expect("request build should succeed"),
        )
        .await
        .expect("app should handle request");

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("response body should be readable");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, "POST", uri, Some(body)).await
}

/// A trip in the shape the browser sends.
pub fn trip_json(id: Value, city: &str, departure: &str, return_date: &str) -> Value {
    json!({
        "id": id,
        "locationInfo": {
            "city": city,
            "country": "Portugal",
            "latitude": "38.71667",
            "longitude": -9.13333
        },
        "departureInfo": {"dateString": departure},
        "returnInfo": {"dateString": return_date}
    })
}
