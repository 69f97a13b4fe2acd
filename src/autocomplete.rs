//! Autocomplete with stale-result detection
//!
//! Fast typing issues overlapping suggestion requests. Requests are never
//! cancelled; each one takes a generation number and its result is marked
//! superseded when a newer request started before it finished.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::Result;
use crate::geocode::GeocodeClient;
use crate::models::AddressSuggestion;

/// Result of one autocomplete request
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestions {
    /// Generation this request was issued under
    pub generation: u64,
    /// Suggestions from the address-search service
    pub items: Vec<AddressSuggestion>,
    /// A newer request was issued while this one was in flight
    pub superseded: bool,
}

/// Autocomplete session sharing one generation counter
#[derive(Clone)]
pub struct Autocomplete {
    client: GeocodeClient,
    latest: Arc<AtomicU64>,
}

impl Autocomplete {
    pub fn new(client: GeocodeClient) -> Self {
        Self {
            client,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Issue a suggestion request under a fresh generation
    pub async fn suggest(&self, query: &str) -> Result<Suggestions> {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let items = self.client.suggest(query).await?;

        let superseded = !self.is_current(generation);
        if superseded {
            debug!("Suggestions for '{}' superseded (generation {})", query, generation);
        }

        Ok(Suggestions {
            generation,
            items,
            superseded,
        })
    }

    /// Whether `generation` is still the newest request issued
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }
}
