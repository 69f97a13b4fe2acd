//! Data models for `RotaFlex`
//!
//! - Coordinate: longitude-first geographic point
//! - Suggestion: autocomplete candidates from the address-search service
//! - Route: route results from the routing service

pub mod coordinate;
pub mod route;
pub mod suggestion;

pub use coordinate::Coordinate;
pub use route::{RoutePlan, RouteResult};
pub use suggestion::AddressSuggestion;
