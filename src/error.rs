//! Error types for route analysis

use thiserror::Error;

use crate::providers::{Provider, TransportError};

/// The single fatal error kind surfaced by an analysis run
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A named location could not be geocoded
    #[error("Could not convert '{query}' into latitude/longitude")]
    LookupFailure { query: String },

    /// An external call failed, timed out or returned unusable data
    #[error("{provider} request failed: {message}")]
    ProviderFailure { provider: Provider, message: String },

    /// Country metadata had no ISO code, so holidays cannot be located
    #[error("Destination country code not found for '{country}' - can't find holidays")]
    MissingCountryCode { country: String },

    /// Request validation errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl AnalysisError {
    /// Create a new lookup failure for a location query
    pub fn lookup<S: Into<String>>(query: S) -> Self {
        Self::LookupFailure {
            query: query.into(),
        }
    }

    /// Wrap a transport error raised by `provider`
    pub fn provider(provider: Provider, source: TransportError) -> Self {
        Self::ProviderFailure {
            provider,
            message: source.to_string(),
        }
    }

    /// Create a new missing country code error
    pub fn missing_country_code<S: Into<String>>(country: S) -> Self {
        Self::MissingCountryCode {
            country: country.into(),
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

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::LookupFailure { query } => {
                format!("Could not find '{query}'. Please check the spelling of the location.")
            }
            AnalysisError::ProviderFailure { provider, .. } => {
                format!(
                    "Unable to get data from {provider}. Please check your internet connection and API keys."
                )
            }
            AnalysisError::MissingCountryCode { country } => {
                format!("No country code is known for '{country}', so public holidays are unavailable.")
            }
            AnalysisError::InvalidInput { message } => format!("Invalid input: {message}"),
            AnalysisError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
        }
    }
}
