//! Address resolution and driving routes
//!
//! Addresses are resolved through the same Nominatim-compatible search
//! service as autocomplete; routes come from an OpenRouteService-compatible
//! directions endpoint returning GeoJSON.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, instrument, warn};

use crate::config::{GeocodingConfig, RoutingConfig};
use crate::error::RotaflexError;
use crate::models::{AddressSuggestion, Coordinate, RoutePlan, RouteResult};
use crate::transport::HttpTransport;
use crate::Result;

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
struct RouteFeature {
    properties: RouteProperties,
    geometry: Value,
}

#[derive(Debug, Deserialize)]
struct RouteProperties {
    summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
struct RouteSummary {
    distance: f64,
    duration: f64,
}

/// Client for geocoding single addresses and computing routes
#[derive(Clone)]
pub struct RouteClient {
    transport: Arc<dyn HttpTransport>,
    search_url: String,
    directions_url: String,
}

impl RouteClient {
    /// Create a new client
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        geocoding: &GeocodingConfig,
        routing: &RoutingConfig,
    ) -> Self {
        Self {
            transport,
            search_url: geocoding.search_url.clone(),
            directions_url: routing.directions_url.clone(),
        }
    }

    /// Resolve an address to the coordinate of the best match
    #[instrument(skip(self))]
    pub async fn geocode(&self, address: &str) -> Result<Coordinate> {
        let url = format!(
            "{}?q={}&format=json&limit=1",
            self.search_url,
            urlencoding::encode(address)
        );
        debug!("Geocoding request URL: {}", url);

        let body = self.transport.get_json(&url).await?;
        let results: Vec<AddressSuggestion> = serde_json::from_value(body).map_err(|e| {
            RotaflexError::decode(format!("Invalid geocoding response for '{address}': {e}"))
        })?;

        let Some(best) = results.first() else {
            warn!("No geocoding results for '{}'", address);
            return Err(RotaflexError::not_found(address));
        };

        let coordinate = best.coordinate()?;
        info!("Resolved '{}' to ({})", address, coordinate);
        Ok(coordinate)
    }

    /// Request a driving route between two coordinates
    #[instrument(skip(self, api_key))]
    pub async fn compute_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        api_key: &str,
    ) -> Result<RouteResult> {
        let body = json!({ "coordinates": [origin, destination] });
        let headers = [
            ("Authorization", api_key),
            ("Content-Type", "application/json"),
        ];

        let response = self
            .transport
            .post_json(&self.directions_url, &headers, &body)
            .await?;
        let directions: DirectionsResponse = serde_json::from_value(response)
            .map_err(|e| RotaflexError::decode(format!("Invalid directions response: {e}")))?;

        let Some(feature) = directions.features.into_iter().next() else {
            warn!("Routing service returned no route features");
            return Err(RotaflexError::RouteUnavailable);
        };

        let summary = feature.properties.summary;
        info!(
            "Route computed: {:.0} m, {:.0} s",
            summary.distance, summary.duration
        );

        Ok(RouteResult {
            distance_meters: summary.distance,
            duration_seconds: summary.duration,
            geometry: feature.geometry,
        })
    }

    /// Resolve both addresses concurrently, then compute the route between them
    #[instrument(skip(self, api_key))]
    pub async fn plan(
        &self,
        origin_address: &str,
        destination_address: &str,
        api_key: &str,
    ) -> Result<RoutePlan> {
        let (origin, destination) = futures::try_join!(
            self.geocode(origin_address),
            self.geocode(destination_address)
        )?;

        let route = self.compute_route(origin, destination, api_key).await?;
        Ok(RoutePlan {
            origin,
            destination,
            route,
        })
    }
}
