//! Error types for the inference API client.
//!
//! # Design
//! The only distinction callers can act on is "the call failed" versus "the
//! server answered with a non-success status". Non-2xx responses keep the raw
//! status code and body; everything else carries the underlying message.

use thiserror::Error;

/// Errors returned by the client, config resolution, and hosts.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, connection, ...).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A required environment variable is unset or empty.
    #[error("missing configuration: {0} is not set")]
    MissingConfig(&'static str),
}
