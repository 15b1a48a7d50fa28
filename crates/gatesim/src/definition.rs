//! API definition loading.
//!
//! A definition document wraps the gateway's API definition object under a
//! single `api_definition` key:
//!
//! ```json
//! {
//!   "api_definition": {
//!     "api_id": "echo",
//!     "name": "Echo API",
//!     "protocol": "GET",
//!     "proxy": { "listen_path": "/echo/", "target_url": "http://localhost:8080/" }
//!   }
//! }
//! ```
//!
//! Only the backend target and the outbound protocol drive the simulation.
//! Every other field is kept as opaque JSON so hooks can still read it.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upstream proxy block of a definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Inbound path prefix the gateway listens on.
    pub listen_path: String,
    /// Backend URL the gateway forwards to.
    pub target_url: String,
    /// Whether the gateway strips `listen_path` before forwarding.
    pub strip_listen_path: bool,
    /// Remaining proxy settings, carried verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// An externally-authored API definition, immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiDefinition {
    pub api_id: String,
    pub name: String,
    /// Outbound protocol. The simulator sends it as the request method.
    pub protocol: String,
    pub proxy: ProxyConfig,
    /// Remaining definition fields, carried verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct DefinitionDocument {
    api_definition: ApiDefinition,
}

impl ApiDefinition {
    /// Construct a minimal definition pointing at `target_url`.
    pub fn new(protocol: impl Into<String>, target_url: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            proxy: ProxyConfig {
                target_url: target_url.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Builder helper: set the API id and display name.
    pub fn with_identity(mut self, api_id: impl Into<String>, name: impl Into<String>) -> Self {
        self.api_id = api_id.into();
        self.name = name.into();
        self
    }

    /// Parse a definition document (`{"api_definition": {...}}`).
    pub fn from_slice(bytes: &[u8]) -> SimResult<Self> {
        let doc: DefinitionDocument = serde_json::from_slice(bytes)?;
        Ok(doc.api_definition)
    }

    /// Read and parse a definition document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SimError::DefinitionRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_slice(&bytes)
    }
}
