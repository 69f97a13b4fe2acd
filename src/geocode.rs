//! Address autocomplete against a Nominatim-compatible search service

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::RotaflexError;
use crate::models::AddressSuggestion;
use crate::transport::HttpTransport;
use crate::Result;

/// Client for address suggestions
#[derive(Clone)]
pub struct GeocodeClient {
    transport: Arc<dyn HttpTransport>,
    search_url: String,
    limit: u32,
}

impl GeocodeClient {
    /// Create a new client
    pub fn new(transport: Arc<dyn HttpTransport>, config: &GeocodingConfig) -> Self {
        Self {
            transport,
            search_url: config.search_url.clone(),
            limit: config.suggestion_limit,
        }
    }

    /// Suggest addresses matching a free-text query.
    ///
    /// An empty query returns no suggestions without touching the network.
    #[instrument(skip(self))]
    pub async fn suggest(&self, query: &str) -> Result<Vec<AddressSuggestion>> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{}?q={}&format=json&addressdetails=1&limit={}",
            self.search_url,
            urlencoding::encode(query),
            self.limit
        );
        debug!("Address search request URL: {}", url);

        let start_time = Instant::now();
        let body = self.transport.get_json(&url).await?;
        let suggestions = decode_suggestions(body)?;

        if suggestions.is_empty() {
            warn!("No suggestions found for '{}'", query);
        } else {
            info!(
                "Found {} suggestions for '{}' in {:.3}s",
                suggestions.len(),
                query,
                start_time.elapsed().as_secs_f64()
            );
        }

        Ok(suggestions)
    }
}

fn decode_suggestions(body: Value) -> Result<Vec<AddressSuggestion>> {
    serde_json::from_value(body)
        .map_err(|e| RotaflexError::decode(format!("Invalid address search response: {e}")))
}
