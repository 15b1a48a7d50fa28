//! Response-writer sink handed to every hook.

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::io;

/// Records what hooks write back to the (simulated) client.
///
/// Nothing written here reaches the backend or the console; it is kept for
/// inspection once the simulation has finished.
#[derive(Debug, Clone, Default)]
pub struct ResponseRecorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an explicit status. Only the first call takes effect.
    pub fn write_header(&mut self, status: StatusCode) {
        if self.status.is_none() {
            self.status = Some(status);
        }
    }

    /// Recorded status; `200 OK` once anything was written without one.
    pub fn status(&self) -> Option<StatusCode> {
        match self.status {
            Some(status) => Some(status),
            None if !self.body.is_empty() => Some(StatusCode::OK),
            None => None,
        }
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Whether any hook wrote a status or body.
    pub fn is_written(&self) -> bool {
        self.status.is_some() || !self.body.is_empty()
    }
}

impl io::Write for ResponseRecorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
