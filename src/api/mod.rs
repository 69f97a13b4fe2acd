//! JSON API exposing suggestions, geocoding and routing to the frontend

use std::sync::Arc;

use axum::{
    Router,
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    GeocodeClient, RotaflexError, RouteClient,
    config::RotaflexConfig,
    models::{AddressSuggestion, Coordinate, RoutePlan, RouteResult},
    transport::HttpTransport,
};

/// Clients shared by all handlers
pub struct AppState {
    pub geocoder: GeocodeClient,
    pub routes: RouteClient,
    /// Used when a request does not carry its own key
    pub default_api_key: Option<String>,
}

impl AppState {
    pub fn new(transport: Arc<dyn HttpTransport>, config: &RotaflexConfig) -> Self {
        Self {
            geocoder: GeocodeClient::new(transport.clone(), &config.geocoding),
            routes: RouteClient::new(transport, &config.geocoding, &config.routing),
            default_api_key: config.routing.api_key.clone(),
        }
    }

    fn api_key<'a>(&'a self, requested: Option<&'a str>) -> Result<&'a str, RotaflexError> {
        requested
            .filter(|key| !key.is_empty())
            .or(self.default_api_key.as_deref())
            .ok_or_else(|| RotaflexError::invalid_input("Missing routing API key"))
    }
}

/// Error body in the shape `{timestamp, status, error, message, path}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub timestamp: String,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

pub struct ApiError {
    error: RotaflexError,
    path: String,
}

impl ApiError {
    fn at(path: &OriginalUri) -> impl FnOnce(RotaflexError) -> ApiError + '_ {
        move |error| ApiError {
            error,
            path: path.0.path().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        warn!("{} failed with {}: {}", self.path, status, self.error);

        let body = ErrorBody {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message: self.error.user_message(),
            path: self.path,
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct GeocodeParams {
    pub address: String,
}

#[derive(Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub api_key: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct PlanRequest {
    pub origin: String,
    pub destination: String,
    pub api_key: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/suggest", get(suggest))
        .route("/geocode", get(geocode))
        .route("/route", post(route))
        .route("/plan", post(plan))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn suggest(
    State(state): State<Arc<AppState>>,
    uri: OriginalUri,
    Query(params): Query<SuggestParams>,
) -> Result<Json<Vec<AddressSuggestion>>, ApiError> {
    let suggestions = state
        .geocoder
        .suggest(&params.q)
        .await
        .map_err(ApiError::at(&uri))?;
    Ok(Json(suggestions))
}

async fn geocode(
    State(state): State<Arc<AppState>>,
    uri: OriginalUri,
    Query(params): Query<GeocodeParams>,
) -> Result<Json<Coordinate>, ApiError> {
    let coordinate = state
        .routes
        .geocode(&params.address)
        .await
        .map_err(ApiError::at(&uri))?;
    Ok(Json(coordinate))
}

async fn route(
    State(state): State<Arc<AppState>>,
    uri: OriginalUri,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResult>, ApiError> {
    request.origin.validate().map_err(ApiError::at(&uri))?;
    request.destination.validate().map_err(ApiError::at(&uri))?;
    let api_key = state
        .api_key(request.api_key.as_deref())
        .map_err(ApiError::at(&uri))?;

    let result = state
        .routes
        .compute_route(request.origin, request.destination, api_key)
        .await
        .map_err(ApiError::at(&uri))?;
    Ok(Json(result))
}

async fn plan(
    State(state): State<Arc<AppState>>,
    uri: OriginalUri,
    Json(request): Json<PlanRequest>,
) -> Result<Json<RoutePlan>, ApiError> {
    let api_key = state
        .api_key(request.api_key.as_deref())
        .map_err(ApiError::at(&uri))?;

    let result = state
        .routes
        .plan(&request.origin, &request.destination, api_key)
        .await
        .map_err(ApiError::at(&uri))?;
    Ok(Json(result))
}
