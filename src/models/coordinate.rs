//! Coordinate model for geographic points

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RotaflexError;

/// A point on the globe, longitude first.
///
/// Serializes as the JSON array `[lon, lat]`, which is the argument order the
/// routing service expects.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Latitude in decimal degrees
    pub latitude: f64,
}

impl Coordinate {
    /// Create a new coordinate from longitude and latitude
    #[must_use]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Check that both components are within their geographic ranges
    pub fn validate(&self) -> Result<(), RotaflexError> {
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(RotaflexError::invalid_input(format!(
                "Longitude must be between -180 and 180, got: {}",
                self.longitude
            )));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(RotaflexError::invalid_input(format!(
                "Latitude must be between -90 and 90, got: {}",
                self.latitude
            )));
        }
        Ok(())
    }

    /// Parse a `lon,lat` pair as typed on the command line
    pub fn parse(input: &str) -> Result<Self, RotaflexError> {
        let parts: Vec<&str> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(RotaflexError::invalid_input(
                "Coordinates must be in format 'lon,lat'",
            ));
        }

        let longitude = parts[0].parse::<f64>().map_err(|_| {
            RotaflexError::invalid_input(format!("Invalid longitude: {}", parts[0]))
        })?;
        let latitude = parts[1].parse::<f64>().map_err(|_| {
            RotaflexError::invalid_input(format!("Invalid latitude: {}", parts[1]))
        })?;

        let coordinate = Self::new(longitude, latitude);
        coordinate.validate()?;
        Ok(coordinate)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::new(longitude, latitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.longitude, coordinate.latitude]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}
