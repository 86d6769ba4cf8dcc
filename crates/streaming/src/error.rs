//! Errors raised while talking to the external catalog.
//!
//! A title that simply isn't in the catalog, or has no subscription offers,
//! is not an error: the resolver returns an empty list for that. Everything
//! here means the lookup itself broke.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreamingError {
    /// The HTTP client could not be built from the configuration
    #[error("Invalid catalog client configuration: {0}")]
    Config(String),

    /// Connection, TLS or protocol failure
    #[error("Catalog request failed: {0}")]
    Http(String),

    /// The request did not complete within the configured timeout
    #[error("Catalog request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u128 },

    /// The catalog answered with a non-success status
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON shape we expect
    #[error("Could not decode catalog response: {0}")]
    Decode(String),

    /// The catalog reported errors for the query itself
    #[error("Catalog query failed: {0}")]
    GraphQl(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StreamingError>;
