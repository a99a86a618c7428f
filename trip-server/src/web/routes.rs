//! HTTP route handlers.

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

use crate::domain::{DateWindow, DomainError, parse_date_string};
use crate::providers::ProviderError;
use crate::trips::TripError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `static_dir` holds the browser client; anything not matched by an API
/// route is served from there.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    let api = Router::new()
        .route("/geoname", get(geoname))
        .route("/location-info", get(location_info))
        .route("/thumbnail", get(thumbnail))
        .route("/weather/current", get(weather_current))
        .route("/weather/forecast", get(weather_forecast))
        .route("/trips", get(saved_trips))
        .route("/trips/add", post(add_trip))
        .route("/trips/remove", post(remove_trip))
        .route("/trips/restore", post(restore_trips));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .fallback_service(ServeDir::new(static_dir))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, logging it when it does not parse.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "Invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| AppError::BadRequest {
            message: e.body_text(),
        })
}

/// Saved trips in display order, with per-trip date figures.
async fn saved_trips(State(state): State<AppState>) -> Json<ApiResponse<Vec<SavedTripView>>> {
    let window = DateWindow::today();
    let views = state
        .trips
        .saved_trips(&window)
        .await
        .into_iter()
        .map(|trip| SavedTripView::from_trip(trip, &window))
        .collect();

    Json(ApiResponse::data(views))
}

/// Save a trip, replacing any trip with the same id.
async fn add_trip(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: AddTripRequest = parse_body(&body)?;
    info!(trip = %req.trip.id, "Saving trip");

    let trips = state.trips.add_trip(req.trip).await;
    Ok(Json(ApiResponse::data(trips)).into_response())
}

/// Delete a trip by id.
async fn remove_trip(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: RemoveTripRequest = parse_body(&body)?;
    info!(trip = %req.trip_id, "Removing trip");

    let trips = state.trips.remove_trip(&req.trip_id).await;
    Ok(Json(ApiResponse::data(trips)).into_response())
}

/// Reconcile with the browser's cache and refresh every trip.
async fn restore_trips(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    // An empty body means nothing cached
    let req: RestoreTripsRequest = if body.is_empty() {
        RestoreTripsRequest::default()
    } else {
        parse_body(&body)?
    };

    let trips = state
        .trips
        .restore_from_json(req.local_storage_trips, DateWindow::today())
        .await?;
    Ok(Json(ApiResponse::data(trips)).into_response())
}

/// Look up a place by name.
async fn geoname(
    State(state): State<AppState>,
    query: Result<Query<GeoNameQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let q = parse_query(query)?;
    let place = state.geonames.search(&q.location).await?;
    Ok(Json(ApiResponse::data(place)).into_response())
}

/// Country and timezone details for a coordinate.
async fn location_info(
    State(state): State<AppState>,
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let q = parse_query(query)?;
    let details = state
        .positionstack
        .location_details(q.latitude, q.longitude)
        .await?;
    Ok(Json(ApiResponse::data(details)).into_response())
}

/// A photo of a city, or of its country.
async fn thumbnail(
    State(state): State<AppState>,
    query: Result<Query<ThumbnailQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let q = parse_query(query)?;
    let url = state
        .pixabay
        .find_thumbnail(q.city.as_deref(), q.country.as_deref())
        .await?;
    Ok(Json(ApiResponse::data(url)).into_response())
}

async fn weather_current(
    State(state): State<AppState>,
    query: Result<Query<CoordinateQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let q = parse_query(query)?;
    let current = state.weather.current(q.latitude, q.longitude).await?;
    Ok(Json(ApiResponse::data(current)).into_response())
}

/// Forecasts for a departure and return date.
///
/// Either side is absent when the date falls outside the provider's range.
async fn weather_forecast(
    State(state): State<AppState>,
    query: Result<Query<ForecastQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let q = parse_query(query)?;
    let departure = parse_date_string(&q.departure_date)?;
    let return_date = parse_date_string(&q.return_date)?;

    let pair = state
        .weather
        .forecast_pair(q.latitude, q.longitude, departure, return_date)
        .await?;
    Ok(Json(ApiResponse::data(pair)).into_response())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// A provider failed; `status` is passed on to the caller
    Upstream { status: StatusCode, message: String },
    Internal { message: String },
}

/// Status to answer with when a provider call fails.
fn provider_status(e: &ProviderError) -> StatusCode {
    match e {
        ProviderError::NoResults { .. } => StatusCode::NOT_FOUND,
        ProviderError::Api { status, .. } => StatusCode::from_u16(*status)
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
        ProviderError::Http(inner) if inner.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        ProviderError::Shared(inner) => provider_status(inner),
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        let message = e.to_string();
        match provider_status(&e) {
            StatusCode::NOT_FOUND => AppError::NotFound { message },
            status => AppError::Upstream { status, message },
        }
    }
}

impl From<TripError> for AppError {
    fn from(e: TripError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { status, message } => (status, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
