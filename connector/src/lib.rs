//! Blocking Transsmart connector.
//!
//! # Overview
//! Executes the requests built by `transsmart-core` over HTTP with `ureq`.
//! `TranssmartConnector::connect` logs in immediately and then exposes one
//! method per shipment endpoint, each returning the response body as JSON.
//!
//! ```no_run
//! use transsmart_connector::{bootstrap, TranssmartConnector};
//!
//! # fn main() -> Result<(), transsmart_connector::ApiError> {
//! let config = bootstrap::config_from_env()?;
//! let connector = TranssmartConnector::connect(config)?;
//! let shipment = connector.get_shipment("PNL-1717597661")?;
//! println!("{shipment}");
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod connector;
pub mod transport;

pub use connector::TranssmartConnector;
pub use transport::{Transport, UreqTransport};
pub use transsmart_core::{ApiError, ApiResult, ClientConfig, Credentials, Payload};
