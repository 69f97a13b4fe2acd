//! Address suggestions returned by the address-search service

use serde::{Deserialize, Serialize};

use super::Coordinate;
use crate::error::RotaflexError;

/// One autocomplete candidate.
///
/// `lat` and `lon` are kept in the textual form the upstream service sent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddressSuggestion {
    /// Human-readable address
    pub display_name: String,
    /// Latitude as sent upstream
    pub lat: String,
    /// Longitude as sent upstream
    pub lon: String,
}

impl AddressSuggestion {
    /// Parse the textual pair into a coordinate
    pub fn coordinate(&self) -> Result<Coordinate, RotaflexError> {
        let longitude = self.lon.trim().parse::<f64>().map_err(|_| {
            RotaflexError::decode(format!(
                "Invalid longitude '{}' for '{}'",
                self.lon, self.display_name
            ))
        })?;
        let latitude = self.lat.trim().parse::<f64>().map_err(|_| {
            RotaflexError::decode(format!(
                "Invalid latitude '{}' for '{}'",
                self.lat, self.display_name
            ))
        })?;
        Ok(Coordinate::new(longitude, latitude))
    }
}
