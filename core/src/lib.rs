//! Synchronous API client core for the Transsmart shipment API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, keeping the core deterministic and testable.
//!
//! # Design
//! - `TranssmartClient` knows the configuration and handles login.
//! - `Session` is what login produces: it holds the bearer token and builds
//!   one request per shipment endpoint.
//! - Shipment payloads are untyped JSON, passed through unchanged.
//! - Configuration is explicit; nothing here reads the environment.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod session;
pub mod types;

pub use client::TranssmartClient;
pub use config::{ClientConfig, Credentials, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use endpoint::Action;
pub use error::{ApiError, ApiResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use session::Session;
pub use types::{LoginResponse, Payload, Token};
