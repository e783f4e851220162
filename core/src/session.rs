//! Authenticated request builder for the shipment endpoints.
//!
//! # Design
//! A `Session` holds the bearer token and the address parts of the
//! shipments path. It carries no mutable state: each `build_*` method
//! produces one `HttpRequest` with the default headers attached, and
//! `parse_payload` turns any response into the JSON body the caller gets.
//! Every operation returns the same shape.

use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::endpoint::{shipments_url, Action};
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Payload, Token};

/// Builds shipment requests for one authenticated account.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: String,
    version: String,
    account: String,
    token: Token,
}

impl Session {
    pub fn new(config: ClientConfig, token: Token) -> Self {
        Self {
            base_url: config.base_url,
            version: config.version,
            account: config.credentials.account,
            token,
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Headers sent with every shipment request.
    pub fn default_headers(&self) -> Vec<(String, String)> {
        vec![
            ("Authorization".to_string(), self.token.bearer()),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }

    /// List shipments, forwarding `params` verbatim as query parameters.
    pub fn build_get_shipments<K, V>(&self, params: &[(K, V)]) -> ApiResult<HttpRequest>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut req = self.request(HttpMethod::Get, Action::Collection, None)?;
        req.query = params
            .iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        Ok(req)
    }

    pub fn build_get_shipment(&self, id: &str) -> ApiResult<HttpRequest> {
        self.request(HttpMethod::Get, Action::Shipment(id), None)
    }

    pub fn build_create_shipment<T>(&self, shipment: &T) -> ApiResult<HttpRequest>
    where
        T: Serialize + ?Sized,
    {
        let body = to_json(shipment)?;
        self.request(HttpMethod::Post, Action::Collection, Some(body))
    }

    pub fn build_update_shipment<T>(&self, id: &str, shipment: &T) -> ApiResult<HttpRequest>
    where
        T: Serialize + ?Sized,
    {
        let body = to_json(shipment)?;
        self.request(HttpMethod::Put, Action::Shipment(id), Some(body))
    }

    pub fn build_delete_shipment(&self, id: &str) -> ApiResult<HttpRequest> {
        self.request(HttpMethod::Delete, Action::Shipment(id), None)
    }

    /// Cancelling is a POST without a body.
    pub fn build_cancel_shipment(&self, id: &str) -> ApiResult<HttpRequest> {
        self.request(HttpMethod::Post, Action::Cancel(id), None)
    }

    pub fn build_get_labels(&self, id: &str) -> ApiResult<HttpRequest> {
        self.request(HttpMethod::Get, Action::Labels(id), None)
    }

    pub fn build_get_documents(&self, id: &str) -> ApiResult<HttpRequest> {
        self.request(HttpMethod::Get, Action::Documents(id), None)
    }

    pub fn build_get_shipment_status(&self, id: &str) -> ApiResult<HttpRequest> {
        self.request(HttpMethod::Get, Action::Status(id), None)
    }

    pub fn build_get_track_and_trace(&self, id: &str) -> ApiResult<HttpRequest> {
        self.request(HttpMethod::Get, Action::TrackAndTrace(id), None)
    }

    pub fn build_get_carriers(&self) -> ApiResult<HttpRequest> {
        self.request(HttpMethod::Get, Action::Carriers, None)
    }

    /// Parse a response body as JSON, whatever its status.
    ///
    /// An empty body (e.g. `204 No Content`) yields `Payload::Null`. Bytes
    /// that are not UTF-8 JSON fail with `Decode`.
    pub fn parse_payload(&self, response: HttpResponse) -> ApiResult<Payload> {
        debug!(status = response.status, bytes = response.body.len(), "parsing payload");
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload::Null);
        }
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode {
            status: response.status,
            message: e.to_string(),
        })
    }

    fn request(
        &self,
        method: HttpMethod,
        action: Action<'_>,
        body: Option<String>,
    ) -> ApiResult<HttpRequest> {
        Ok(HttpRequest {
            method,
            url: shipments_url(&self.base_url, &self.version, &self.account, action)?,
            query: Vec::new(),
            headers: self.default_headers(),
            body,
        })
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> ApiResult<String> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}
