//! Outbound target resolution.
//!
//! The outbound URL starts as the definition's `proxy.target_url`. A hook
//! that changed the request path or query wins over the target's own path or
//! query; anything the hooks left alone keeps the target's value. The two
//! components are decided independently.

use crate::definition::ApiDefinition;
use crate::error::{SimError, SimResult};
use crate::request::SimRequest;
use reqwest::Method;
use url::Url;

/// Method and URL of the single outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundTarget {
    pub method: Method,
    pub url: Url,
}

/// Compute the outbound call from what the hooks changed.
///
/// `original` is the snapshot taken before any hook ran, `working` the request
/// after the request-stage hooks.
pub fn resolve_outbound(
    original: &SimRequest,
    working: &SimRequest,
    definition: &ApiDefinition,
) -> SimResult<OutboundTarget> {
    let target = &definition.proxy.target_url;
    let mut url = Url::parse(target).map_err(|source| SimError::InvalidTarget {
        url: target.clone(),
        source,
    })?;

    if original.path() != working.path() {
        url.set_path(working.path());
    }
    if original.query() != working.query() {
        url.set_query(working.query());
    }

    Ok(OutboundTarget {
        method: protocol_method(&definition.protocol)?,
        url,
    })
}

/// The definition's protocol used verbatim as the method token.
///
/// An empty protocol means `GET`, as with an HTTP client given no method.
fn protocol_method(protocol: &str) -> SimResult<Method> {
    if protocol.is_empty() {
        return Ok(Method::GET);
    }
    Method::from_bytes(protocol.as_bytes())
        .map_err(|_| SimError::InvalidMethod(protocol.to_string()))
}
