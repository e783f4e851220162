//! Authenticated, blocking client for the Transsmart shipment API.
//!
//! # Design
//! Construction performs the login round-trip immediately; a connector that
//! exists always holds a token. Each operation builds one request through the
//! core `Session`, executes it on the `Transport`, and returns the parsed
//! body. There is no retry, refresh or status interpretation.

use serde::Serialize;
use tracing::instrument;
use transsmart_core::{
    ApiResult, ClientConfig, HttpRequest, Payload, Session, Token, TranssmartClient,
};

use crate::transport::{Transport, UreqTransport};

/// One authenticated Transsmart account.
#[derive(Debug)]
pub struct TranssmartConnector<T = UreqTransport> {
    session: Session,
    transport: T,
}

impl TranssmartConnector<UreqTransport> {
    /// Log in over HTTP and return a ready connector.
    pub fn connect(config: ClientConfig) -> ApiResult<Self> {
        Self::connect_with(config, UreqTransport::new())
    }
}

impl<T: Transport> TranssmartConnector<T> {
    /// Log in through `transport`.
    ///
    /// Fails with `AuthenticationFailed` when the login response carries no
    /// usable token.
    #[instrument(
        skip_all,
        fields(account = %config.credentials.account, base_url = %config.base_url)
    )]
    pub fn connect_with(config: ClientConfig, transport: T) -> ApiResult<Self> {
        let client = TranssmartClient::new(config)?;
        let response = transport.execute(&client.build_login())?;
        let session = client.authenticate(response)?;
        Ok(Self { session, transport })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> &Token {
        self.session.token()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// List shipments; `params` are forwarded as query parameters.
    #[instrument(skip_all)]
    pub fn get_shipments<K, V>(&self, params: &[(K, V)]) -> ApiResult<Payload>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.send(self.session.build_get_shipments(params)?)
    }

    #[instrument(skip(self))]
    pub fn get_shipment(&self, id: &str) -> ApiResult<Payload> {
        self.send(self.session.build_get_shipment(id)?)
    }

    #[instrument(skip_all)]
    pub fn create_shipment<S>(&self, shipment: &S) -> ApiResult<Payload>
    where
        S: Serialize + ?Sized,
    {
        self.send(self.session.build_create_shipment(shipment)?)
    }

    #[instrument(skip(self, shipment))]
    pub fn update_shipment<S>(&self, id: &str, shipment: &S) -> ApiResult<Payload>
    where
        S: Serialize + ?Sized,
    {
        self.send(self.session.build_update_shipment(id, shipment)?)
    }

    #[instrument(skip(self))]
    pub fn delete_shipment(&self, id: &str) -> ApiResult<Payload> {
        self.send(self.session.build_delete_shipment(id)?)
    }

    #[instrument(skip(self))]
    pub fn cancel_shipment(&self, id: &str) -> ApiResult<Payload> {
        self.send(self.session.build_cancel_shipment(id)?)
    }

    #[instrument(skip(self))]
    pub fn get_labels(&self, id: &str) -> ApiResult<Payload> {
        self.send(self.session.build_get_labels(id)?)
    }

    #[instrument(skip(self))]
    pub fn get_documents(&self, id: &str) -> ApiResult<Payload> {
        self.send(self.session.build_get_documents(id)?)
    }

    #[instrument(skip(self))]
    pub fn get_shipment_status(&self, id: &str) -> ApiResult<Payload> {
        self.send(self.session.build_get_shipment_status(id)?)
    }

    #[instrument(skip(self))]
    pub fn get_track_and_trace(&self, id: &str) -> ApiResult<Payload> {
        self.send(self.session.build_get_track_and_trace(id)?)
    }

    #[instrument(skip(self))]
    pub fn get_carriers(&self) -> ApiResult<Payload> {
        self.send(self.session.build_get_carriers()?)
    }

    fn send(&self, request: HttpRequest) -> ApiResult<Payload> {
        let response = self.transport.execute(&request)?;
        self.session.parse_payload(response)
    }
}
