//! Error types and handling for `RotaFlex`

use thiserror::Error;

/// Main error type for `RotaFlex`
#[derive(Error, Debug)]
pub enum RotaflexError {
    /// The address-search service returned no results for an address
    #[error("Address not found: {address}")]
    NotFound { address: String },

    /// The routing service returned no route features
    #[error("Route could not be computed")]
    RouteUnavailable,

    /// The HTTP request itself failed
    #[error("Transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// The response body was not JSON
    #[error("Invalid JSON: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// The response body was JSON but did not have the expected shape
    #[error("Unexpected response: {message}")]
    Decode { message: String },

    /// Non-success HTTP status with a body that was not JSON
    #[error("Upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl RotaflexError {
    /// Create a new not-found error for an address
    pub fn not_found<S: Into<String>>(address: S) -> Self {
        Self::NotFound {
            address: address.into(),
        }
    }

    /// Create a new decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new input validation error
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status used when the error is rendered by the web API
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            RotaflexError::NotFound { .. } => 404,
            RotaflexError::RouteUnavailable => 422,
            RotaflexError::InvalidInput { .. } => 400,
            RotaflexError::Config { .. } => 500,
            RotaflexError::Transport { .. }
            | RotaflexError::Json { .. }
            | RotaflexError::Decode { .. }
            | RotaflexError::Upstream { .. } => 502,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            RotaflexError::NotFound { address } => format!("Address not found: {address}"),
            RotaflexError::RouteUnavailable => {
                "No driving route could be calculated between these points.".to_string()
            }
            RotaflexError::Transport { .. } | RotaflexError::Upstream { .. } => {
                "Unable to reach the map services. Please check your internet connection."
                    .to_string()
            }
            RotaflexError::Json { .. } | RotaflexError::Decode { .. } => {
                "The map service sent a response that could not be understood.".to_string()
            }
            RotaflexError::InvalidInput { message } => format!("Invalid input: {message}"),
            RotaflexError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
        }
    }
}
