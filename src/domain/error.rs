//! Error types for the country explorer plugin.
//!
//! This module defines the centralized error type [`ExplorerError`] and a type alias
//! [`Result`] used throughout the plugin. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Missing or malformed fields on an individual country record are never errors;
//! they degrade to defaults during normalization (see [`crate::domain::country`]).

use thiserror::Error;

/// The main error type for country explorer operations.
///
/// Fetch failures (transport, status, body shape) are surfaced to the user as
/// "No results were found" with the error text as a dim subtitle.
///
/// # Examples
///
/// ```
/// use country_explorer::domain::ExplorerError;
///
/// let err = ExplorerError::Http { status: 404 };
/// assert_eq!(err.to_string(), "Request failed with HTTP status 404");
/// ```
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The remote dataset answered with a non-2xx status.
    #[error("Request failed with HTTP status {status}")]
    Http {
        /// HTTP status code reported by the host.
        status: u16,
    },

    /// The request never produced a response (network unreachable, DNS, etc.).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("Malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response body was valid JSON but not an array of countries.
    #[error("Unexpected response body: expected a JSON array")]
    UnexpectedBody,

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for country explorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;
