//! Outbound response with a single-use body.

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;

enum Body {
    Live(reqwest::Response),
    Replaced(Bytes),
    Consumed,
}

/// The backend's answer to the outbound call.
///
/// Response-stage hooks may rewrite the status and headers or substitute the
/// body entirely. The live body stream is read at most once; it is moved into
/// the read, so it is released whether the read succeeds or not.
pub struct SimResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    body: Body,
}

impl SimResponse {
    pub(crate) fn from_live(resp: reqwest::Response) -> Self {
        Self {
            status: resp.status(),
            headers: resp.headers().clone(),
            body: Body::Live(resp),
        }
    }

    /// Build a response with an already-buffered body.
    pub fn buffered(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Body::Replaced(body.into()),
        }
    }

    /// Replace the body; a pending live stream is dropped unread.
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = Body::Replaced(body.into());
    }

    /// Whether the body still comes from the backend stream.
    pub fn is_live(&self) -> bool {
        matches!(self.body, Body::Live(_))
    }

    /// Take the whole body. Later calls return an empty buffer.
    ///
    /// The live stream is released before this returns, also when the read
    /// fails.
    pub async fn take_body(&mut self) -> reqwest::Result<Bytes> {
        match std::mem::replace(&mut self.body, Body::Consumed) {
            Body::Live(resp) => resp.bytes().await,
            Body::Replaced(bytes) => Ok(bytes),
            Body::Consumed => Ok(Bytes::new()),
        }
    }
}

impl std::fmt::Debug for SimResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let body = match &self.body {
            Body::Live(_) => "live",
            Body::Replaced(_) => "replaced",
            Body::Consumed => "consumed",
        };
        f.debug_struct("SimResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &body)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn body_is_taken_once() {
        let mut resp = SimResponse::buffered(StatusCode::OK, "hello");
        assert!(!resp.is_live());
        assert_eq!(resp.take_body().await.unwrap(), Bytes::from_static(b"hello"));
        assert!(resp.take_body().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_body_replaces_content() {
        let mut resp = SimResponse::buffered(StatusCode::OK, "old");
        resp.set_body("new");
        assert_eq!(resp.take_body().await.unwrap(), Bytes::from_static(b"new"));
    }
}
