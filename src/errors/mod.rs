//! Centralized error handling for the places proxy
//!
//! Every failure the service can report to a caller is expressed as an
//! [`AppError`]. The web layer maps each variant to exactly one HTTP status
//! code in [`crate::web::responses::handle_error`].
//!
//! # Error Categories
//!
//! - **Validation Errors**: missing or malformed request parameters, unknown idea types
//! - **Not Found Errors**: no cached or fetchable photo, zero search results
//! - **Upstream Errors**: the places provider is unreachable or reports a failure
//! - **Local Errors**: filesystem and configuration problems
//!
//! # Usage
//!
//! ```rust
//! use places_proxy::errors::{AppError, AppResult};
//!
//! fn require(value: Option<&str>) -> AppResult<&str> {
//!     value.ok_or_else(|| AppError::validation("value is required"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;
