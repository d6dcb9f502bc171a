//! Error types for the staydex data layer.
//!
//! This module provides a unified error type aggregating domain-specific
//! errors (configuration) and external library errors (HTTP, JSON, IO) using
//! `thiserror` for ergonomic definitions with automatic `Display` and `Error`
//! trait implementations.
//!
//! Field- and record-level problems never surface here: malformed fields are
//! coerced to absent values and nameless records are dropped during
//! transformation. This type covers the failures that can escape a call:
//! remote round trips that exhausted their retry budget, bad configuration,
//! and the one unrecoverable cache state (no snapshot ever captured).

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

/// Main error type for the staydex data layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Transport-level HTTP error (connection, timeout, body decoding).
    #[error(transparent)]
    HttpError(#[from] reqwest::Error),
    /// Non-success response from the remote tabular source.
    #[error("Remote source returned status {status}: {message}")]
    ApiError {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, as returned by the remote source.
        message: String,
    },
    /// JSON serialization or deserialization error.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// Filesystem error (summary side table loading).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Internal error indicating a bug in staydex's code.
    #[error("Internal error with staydex's code, please open an issue as this indicates a bug: {0:?}")]
    InternalError(String),
}
