//! Login request builder and response parser.
//!
//! # Design
//! `TranssmartClient` is the unauthenticated half of the API: it knows the
//! configuration and can build the `GET /login` request. Feeding the login
//! response back through `authenticate` yields a `Session`, which carries
//! the bearer token and builds every shipment request. The caller executes
//! the HTTP round-trip in between, so this crate stays free of I/O.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::Session;
use crate::types::{LoginResponse, Token};

/// Unauthenticated client for the Transsmart API.
#[derive(Debug, Clone)]
pub struct TranssmartClient {
    config: ClientConfig,
}

impl TranssmartClient {
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `GET {base_url}/login` with HTTP Basic credentials.
    pub fn build_login(&self) -> HttpRequest {
        let credentials = &self.config.credentials;
        let basic = STANDARD.encode(format!("{}:{}", credentials.username, credentials.password));
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/login", self.config.base_url),
            query: Vec::new(),
            headers: vec![("Authorization".to_string(), format!("Basic {basic}"))],
            body: None,
        }
    }

    /// Extract the token from a login response.
    ///
    /// The status code is not inspected: any body that is not a JSON object
    /// with a non-empty `token` string fails with `AuthenticationFailed`.
    pub fn parse_login(&self, response: HttpResponse) -> ApiResult<Token> {
        let login: LoginResponse = serde_json::from_slice(&response.body).map_err(|e| {
            warn!(status = response.status, error = %e, "login response rejected");
            ApiError::AuthenticationFailed(e.to_string())
        })?;
        if login.token.is_empty() {
            warn!(status = response.status, "login response carried an empty token");
            return Err(ApiError::AuthenticationFailed("empty token".to_string()));
        }
        info!(account = %self.config.credentials.account, "authenticated");
        Ok(Token::new(login.token))
    }

    /// Turn a login response into an authenticated `Session`.
    pub fn authenticate(self, response: HttpResponse) -> ApiResult<Session> {
        let token = self.parse_login(response)?;
        Ok(self.into_session(token))
    }

    /// Build a `Session` from a token obtained elsewhere.
    pub fn into_session(self, token: Token) -> Session {
        Session::new(self.config, token)
    }
}
