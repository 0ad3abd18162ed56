//! Error types for the todo API client.
//!
//! # Design
//! `ApiError` is the closed set callers see: every expected failure of a
//! client call is one of its three variants, and any unhandled status code
//! lands in `Unknown` with the literal code rather than being dropped.
//! `TransportError` explains why no response was obtained; the façade logs it
//! and surfaces only `ApiError::Network`.

use thiserror::Error;

/// Failure outcome of a client operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ApiError {
    /// The server returned 404, the requested task does not exist.
    #[error("resource not found")]
    NotFound,

    /// Any other failing or contract-violating response, with the status
    /// code that was actually received.
    #[error("unexpected API response (HTTP {0})")]
    Unknown(u16),

    /// The exchange failed before a response was obtained.
    #[error("network error: no response obtained")]
    Network,
}

/// Reasons a request produced no HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP exchange failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("request body could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}
