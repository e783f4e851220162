//! Error types for the Transsmart client.
//!
//! # Design
//! The set is closed: every failure a caller can see is one of these kinds.
//! HTTP status codes are not interpreted; a non-2xx response whose body is
//! JSON is returned as a payload like any other, and `Decode` carries the
//! status only for diagnosis.

use thiserror::Error;

/// Result alias used throughout the client.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the core and the connector.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The login response could not be parsed or did not carry a token.
    #[error("failed to obtain token: {0}")]
    AuthenticationFailed(String),

    /// The HTTP round-trip itself failed (connection, TLS, I/O).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not valid JSON.
    #[error("failed to decode response (HTTP {status}): {message}")]
    Decode { status: u16, message: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The shipment id would not address a single shipment resource.
    #[error("invalid shipment id: {0:?}")]
    InvalidShipmentId(String),

    /// The client configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
