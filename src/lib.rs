//! `RotaFlex` - address lookup and driving route planning
//!
//! This library wraps a Nominatim-compatible address-search service and an
//! OpenRouteService-compatible routing service: autocomplete suggestions,
//! single-address geocoding, and driving routes between two coordinates.

pub mod api;
pub mod autocomplete;
pub mod config;
pub mod error;
pub mod geocode;
pub mod logging;
pub mod models;
pub mod routing;
pub mod transport;
pub mod web;

// Re-export core types for public API
pub use autocomplete::{Autocomplete, Suggestions};
pub use config::RotaflexConfig;
pub use error::RotaflexError;
pub use geocode::GeocodeClient;
pub use models::{AddressSuggestion, Coordinate, RoutePlan, RouteResult};
pub use routing::RouteClient;
pub use transport::{HttpTransport, ReqwestTransport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, RotaflexError>;
