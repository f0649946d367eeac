//! Error type definitions for the places proxy

use thiserror::Error;

/// Name used for the upstream provider in error messages
pub const PLACES_SERVICE: &str = "Google Places API";

/// Top-level application error type
///
/// Variants line up with the HTTP status codes the service reports:
/// validation failures are the caller's fault, not-found covers both cache
/// misses and empty searches, and the two upstream variants separate an
/// unreachable provider from one that answered with a failure.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing request parameters
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// No cached or fetchable resource
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// The upstream provider could not be reached
    #[error("Error connecting to {service}: {message}")]
    UpstreamUnavailable { service: String, message: String },

    /// The upstream provider was reached but reported a failure
    #[error("{service} error: {message}")]
    UpstreamProtocol { service: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Local filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an error for a places provider that could not be reached
    pub fn upstream_unavailable<M: Into<String>>(message: M) -> Self {
        Self::UpstreamUnavailable {
            service: PLACES_SERVICE.to_string(),
            message: message.into(),
        }
    }

    /// Create an error for a places provider that answered with a failure
    pub fn upstream_protocol<M: Into<String>>(message: M) -> Self {
        Self::UpstreamProtocol {
            service: PLACES_SERVICE.to_string(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Message suitable for returning to an API caller
    ///
    /// Validation and not-found messages are reported without their category
    /// prefix; the status code already carries that information.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation { message } | Self::NotFound { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::upstream_protocol(format!("invalid response body: {error}"))
        } else {
            Self::upstream_unavailable(error.to_string())
        }
    }
}
