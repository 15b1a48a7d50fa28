//! The simulated inbound request.

use crate::definition::ApiDefinition;
use crate::error::{SimError, SimResult};
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

/// A request flowing through the simulated middleware stages.
///
/// Hooks receive the working copy as `&mut SimRequest` and may change any
/// field. The definition travels with the request so every stage can read it
/// without a side lookup.
#[derive(Debug, Clone)]
pub struct SimRequest {
    /// Correlation id used in log events for this simulation.
    pub id: String,
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    definition: Arc<ApiDefinition>,
}

impl SimRequest {
    /// Build a `GET` request against `inbound_url`, bound to `definition`.
    pub fn get(inbound_url: &str, definition: Arc<ApiDefinition>) -> SimResult<Self> {
        let url = Url::parse(inbound_url).map_err(|source| SimError::InvalidUrl {
            url: inbound_url.to_string(),
            source,
        })?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
            body: Vec::new(),
            definition,
        })
    }

    /// The definition this request is bound to.
    pub fn definition(&self) -> &ApiDefinition {
        &self.definition
    }

    pub fn definition_arc(&self) -> Arc<ApiDefinition> {
        Arc::clone(&self.definition)
    }

    /// Percent-encoded path component.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn set_path(&mut self, path: &str) {
        self.url.set_path(path);
    }

    /// Raw query string, without the leading `?`.
    pub fn query(&self) -> Option<&str> {
        self.url.query()
    }

    pub fn set_query(&mut self, query: Option<&str>) {
        self.url.set_query(query);
    }

    /// Insert or replace a header. Invalid names or values are ignored.
    pub fn set_header(&mut self, name: &str, value: &str) {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
    }

    /// Header value as UTF-8 text, if present and printable.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Builder helper: set the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def() -> Arc<ApiDefinition> {
        Arc::new(ApiDefinition::new("GET", "http://backend.internal/"))
    }

    #[test]
    fn get_builds_a_get_request() {
        let req = SimRequest::get("http://localhost/foo?x=1", def()).unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.path(), "/foo");
        assert_eq!(req.query(), Some("x=1"));
        assert_eq!(req.definition().proxy.target_url, "http://backend.internal/");
        assert!(!req.id.is_empty());
    }

    #[test]
    fn malformed_url_is_rejected() {
        let err = SimRequest::get("not a url", def()).unwrap_err();
        assert!(matches!(err, SimError::InvalidUrl { .. }));
    }

    #[test]
    fn clone_is_independent_of_the_original() {
        let mut working = SimRequest::get("http://localhost/foo", def()).unwrap();
        let original = working.clone();
        working.set_path("/bar");
        working.set_header("X-Trace", "abc");
        assert_eq!(original.path(), "/foo");
        assert!(original.header("x-trace").is_none());
        assert_eq!(working.header("x-trace"), Some("abc"));
    }
}
