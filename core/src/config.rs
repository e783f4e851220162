//! Client configuration.
//!
//! The core never reads the process environment; a bootstrap layer builds a
//! `ClientConfig` once and hands it over.

use std::fmt;

use url::Url;

use crate::error::{ApiError, ApiResult};

/// Production endpoint of the Transsmart API.
pub const DEFAULT_BASE_URL: &str = "https://api.transsmart.com";

/// API version used in the shipments path.
pub const DEFAULT_API_VERSION: &str = "v2";

/// Account identifier plus login credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub account: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(
        account: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to reach one Transsmart account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub version: String,
    pub credentials: Credentials,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            credentials,
        }
    }

    /// Point the client at another host, e.g. the acceptance environment or a
    /// local mock. A trailing slash is dropped.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn validate(&self) -> ApiResult<()> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::config(format!("base_url {:?}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::config("base_url must use http or https"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::config("base_url must not carry a query or fragment"));
        }
        if self.version.is_empty() || self.version.contains('/') {
            return Err(ApiError::config(format!("invalid API version {:?}", self.version)));
        }
        if self.credentials.account.is_empty() || self.credentials.account.contains('/') {
            return Err(ApiError::config(format!(
                "invalid account {:?}",
                self.credentials.account
            )));
        }
        Ok(())
    }
}
