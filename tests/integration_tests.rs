//! Integration tests for RotaFlex against a scripted upstream

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use rotaflex::api::AppState;
use rotaflex::{
    Coordinate, GeocodeClient, HttpTransport, RotaflexConfig, RotaflexError, RouteClient, web,
};

/// Stands in for Nominatim and OpenRouteService
#[derive(Default)]
struct ScriptedUpstream {
    posted: Mutex<Vec<Value>>,
    gets: Mutex<Vec<String>>,
}

#[async_trait]
impl HttpTransport for ScriptedUpstream {
    async fn get_json(&self, url: &str) -> rotaflex::Result<Value> {
        self.gets.lock().unwrap().push(url.to_string());
        let body = if url.contains("q=Belo%20Horizonte") {
            json!([{ "display_name": "Belo Horizonte, MG", "lat": "-19.9167", "lon": "-43.9345" }])
        } else if url.contains("q=Ouro%20Preto") {
            json!([{ "display_name": "Ouro Preto, MG", "lat": "-20.3856", "lon": "-43.5035" }])
        } else {
            json!([])
        };
        Ok(body)
    }

    async fn post_json(
        &self,
        _url: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> rotaflex::Result<Value> {
        self.posted.lock().unwrap().push(body.clone());
        if !headers.iter().any(|(k, v)| *k == "Authorization" && *v == "valid-key") {
            return Ok(json!({ "error": "Access to this API has been disallowed" }));
        }
        Ok(json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": { "summary": { "distance": 98_765.4, "duration": 5_432.1 } },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[-43.9345, -19.9167], [-43.5035, -20.3856]]
                }
            }]
        }))
    }
}

#[tokio::test]
async fn test_plan_round_trips_coordinate_order() {
    let upstream = Arc::new(ScriptedUpstream::default());
    let config = RotaflexConfig::default();
    let routes = RouteClient::new(upstream.clone(), &config.geocoding, &config.routing);

    let origin = routes.geocode("Belo Horizonte").await.unwrap();
    let destination = routes.geocode("Ouro Preto").await.unwrap();
    let route = routes.compute_route(origin, destination, "valid-key").await.unwrap();

    assert_eq!(origin, Coordinate::new(-43.9345, -19.9167));
    assert_eq!(
        upstream.posted.lock().unwrap()[0],
        json!({ "coordinates": [[-43.9345, -19.9167], [-43.5035, -20.3856]] })
    );
    assert_eq!(route.path().unwrap(), vec![origin, destination]);
    assert_eq!(route.format_distance(), "98.77 km");
    assert_eq!(route.format_duration(), "1 h 31 min");
}

#[tokio::test]
async fn test_rejected_api_key_surfaces_as_route_unavailable() {
    let upstream = Arc::new(ScriptedUpstream::default());
    let config = RotaflexConfig::default();
    let routes = RouteClient::new(upstream, &config.geocoding, &config.routing);

    let err = routes
        .plan("Belo Horizonte", "Ouro Preto", "revoked-key")
        .await
        .unwrap_err();
    assert!(matches!(err, RotaflexError::RouteUnavailable));
}

#[tokio::test]
async fn test_suggest_skips_network_for_empty_query() {
    let upstream = Arc::new(ScriptedUpstream::default());
    let geocoder = GeocodeClient::new(upstream.clone(), &RotaflexConfig::default().geocoding);

    assert!(geocoder.suggest("").await.unwrap().is_empty());
    assert!(upstream.gets.lock().unwrap().is_empty());

    let suggestions = geocoder.suggest("Ouro Preto").await.unwrap();
    assert_eq!(suggestions[0].display_name, "Ouro Preto, MG");
    assert_eq!(upstream.gets.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_web_app_plan_endpoint() {
    let upstream = Arc::new(ScriptedUpstream::default());
    let app = web::app(AppState::new(upstream, &RotaflexConfig::default()));

    let request = Request::post("/api/plan")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::from(
            json!({ "origin": "Belo Horizonte", "destination": "Ouro Preto", "api_key": "valid-key" })
                .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let plan: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(plan["origin"], json!([-43.9345, -19.9167]));
    assert_eq!(plan["destination"], json!([-43.5035, -20.3856]));
    assert_eq!(plan["route"]["distance_meters"], 98_765.4);
}

#[tokio::test]
async fn test_web_app_unknown_address() {
    let upstream = Arc::new(ScriptedUpstream::default());
    let app = web::app(AppState::new(upstream, &RotaflexConfig::default()));

    let response = app
        .oneshot(
            Request::get("/api/geocode?address=Eldorado")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], 404);
    assert_eq!(body["path"], "/api/geocode");
}
