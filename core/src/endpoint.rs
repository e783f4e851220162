//! Shipment endpoint addressing.
//!
//! Every shipment call targets `{base_url}/{version}/shipments/{account}/{action}`
//! where `action` is one of the segments below.

use url::Url;

use crate::error::{ApiError, ApiResult};

/// The action segment appended to the account's shipments path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action<'a> {
    /// The shipments collection itself (empty segment).
    Collection,
    Shipment(&'a str),
    Cancel(&'a str),
    Labels(&'a str),
    Documents(&'a str),
    Status(&'a str),
    TrackAndTrace(&'a str),
    Carriers,
}

impl<'a> Action<'a> {
    /// Raw path segments after the account, rejecting ids that would
    /// address another resource.
    pub fn segments(&self) -> ApiResult<Vec<&'a str>> {
        let (id, suffix) = match *self {
            Action::Collection => return Ok(vec![""]),
            Action::Carriers => return Ok(vec!["carriers"]),
            Action::Shipment(id) => (id, None),
            Action::Cancel(id) => (id, Some("cancel")),
            Action::Labels(id) => (id, Some("labels")),
            Action::Documents(id) => (id, Some("documents")),
            Action::Status(id) => (id, Some("status")),
            Action::TrackAndTrace(id) => (id, Some("trackandtrace")),
        };
        let id = validate_shipment_id(id)?;
        Ok(std::iter::once(id).chain(suffix).collect())
    }
}

/// Shipment ids are opaque, but an empty id, a dot segment, or one
/// containing a path, query or fragment delimiter would silently hit a
/// different endpoint.
pub fn validate_shipment_id(id: &str) -> ApiResult<&str> {
    if id.trim().is_empty() || matches!(id, "." | "..") || id.contains(['/', '?', '#']) {
        return Err(ApiError::InvalidShipmentId(id.to_string()));
    }
    Ok(id)
}

/// Format the full endpoint URL for `action`. Every segment is
/// percent-encoded.
pub fn shipments_url(
    base_url: &str,
    version: &str,
    account: &str,
    action: Action<'_>,
) -> ApiResult<String> {
    let tail = action.segments()?;
    let mut url = Url::parse(base_url)
        .map_err(|e| ApiError::config(format!("base_url {base_url:?}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ApiError::config(format!("base_url {base_url:?} cannot carry a path")))?
        .pop_if_empty()
        .extend([version, "shipments", account])
        .extend(tail);
    Ok(url.into())
}
