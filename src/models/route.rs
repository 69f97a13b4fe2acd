//! Route results from the routing service

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Coordinate;
use crate::error::RotaflexError;

/// A computed driving route
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteResult {
    /// Total distance in meters
    pub distance_meters: f64,
    /// Total duration in seconds
    pub duration_seconds: f64,
    /// Path geometry exactly as the routing service returned it
    pub geometry: Value,
}

/// Both resolved endpoints plus the route between them
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RoutePlan {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub route: RouteResult,
}

#[derive(Deserialize)]
struct LineString {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Vec<Coordinate>,
}

impl RouteResult {
    /// Distance in kilometers
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    /// Duration in minutes
    #[must_use]
    pub fn duration_minutes(&self) -> f64 {
        self.duration_seconds / 60.0
    }

    /// Format distance with unit
    #[must_use]
    pub fn format_distance(&self) -> String {
        format!("{:.2} km", self.distance_km())
    }

    /// Format duration as hours and minutes
    #[must_use]
    pub fn format_duration(&self) -> String {
        let total_minutes = self.duration_minutes().round() as u64;
        let hours = total_minutes / 60;
        let minutes = total_minutes % 60;
        if hours > 0 {
            format!("{hours} h {minutes} min")
        } else {
            format!("{minutes} min")
        }
    }

    /// Read the geometry as a GeoJSON `LineString` path.
    ///
    /// The raw geometry is left untouched; any other geometry type is an error.
    pub fn path(&self) -> Result<Vec<Coordinate>, RotaflexError> {
        let line: LineString = serde_json::from_value(self.geometry.clone())
            .map_err(|e| RotaflexError::decode(format!("Route geometry is not a path: {e}")))?;

        if line.kind != "LineString" {
            return Err(RotaflexError::decode(format!(
                "Expected LineString geometry, got {}",
                line.kind
            )));
        }
        Ok(line.coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn route(distance_meters: f64, duration_seconds: f64, geometry: Value) -> RouteResult {
        RouteResult {
            distance_meters,
            duration_seconds,
            geometry,
        }
    }

    #[test]
    fn test_formatting() {
        let short = route(1000.0, 120.0, Value::Null);
        assert_eq!(short.format_distance(), "1.00 km");
        assert_eq!(short.format_duration(), "2 min");

        let long = route(431_250.0, 16_260.0, Value::Null);
        assert_eq!(long.format_distance(), "431.25 km");
        assert_eq!(long.format_duration(), "4 h 31 min");
    }

    #[test]
    fn test_path_from_linestring() {
        let geometry = json!({
            "type": "LineString",
            "coordinates": [[-46.6, -23.5], [-46.61, -23.51], [-43.2, -22.9]]
        });
        let result = route(1.0, 1.0, geometry.clone());

        let path = result.path().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], Coordinate::new(-46.6, -23.5));
        assert_eq!(path[2], Coordinate::new(-43.2, -22.9));
        assert_eq!(result.geometry, geometry);
    }

    #[test]
    fn test_path_rejects_other_geometries() {
        let point = route(1.0, 1.0, json!({ "type": "Point", "coordinates": [[0.0, 0.0]] }));
        assert!(matches!(point.path(), Err(RotaflexError::Decode { .. })));

        let opaque = route(1.0, 1.0, json!("encoded-polyline"));
        assert!(matches!(opaque.path(), Err(RotaflexError::Decode { .. })));
    }
}
