//! Wire types for the Transsmart API.
//!
//! Shipment payloads are passed through untouched as `serde_json::Value`; the
//! only body the client looks inside is the login response.

use std::fmt;

use serde::Deserialize;

/// A parsed response body, returned to the caller as-is.
pub type Payload = serde_json::Value;

/// Body of a successful `GET /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Bearer token obtained at login. Never refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}
