//! Simulator error types.
//!
//! Every variant of [`SimError`] is fatal for the simulation that produced it:
//! the orchestrator stops at the first one and hands it back to the caller.
//! Failures the simulator recovers from locally (an unindentable response
//! body, a value that cannot be serialized for logging) never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal simulation errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    // ── Construction ────────────────────────────────────────────────────────
    /// The definition file could not be read.
    #[error("failed to read API definition '{path}': {source}")]
    DefinitionRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The definition document is not a valid `api_definition` wrapper.
    #[error("failed to parse API definition: {0}")]
    DefinitionParse(#[from] serde_json::Error),

    /// The inbound URL handed to the simulator is malformed.
    #[error("invalid inbound url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    // ── Outbound resolution ─────────────────────────────────────────────────
    /// The definition's `proxy.target_url` is malformed.
    #[error("invalid target url '{url}' in API definition: {source}")]
    InvalidTarget {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The definition's protocol is not a usable request method token.
    #[error("protocol '{0}' is not a valid request method")]
    InvalidMethod(String),

    // ── Transport ───────────────────────────────────────────────────────────
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// The outbound call failed at the transport level.
    #[error("outbound call to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // ── Output / settings ───────────────────────────────────────────────────
    /// Writing the dumped body to the console sink failed.
    #[error("failed to write to console: {0}")]
    Console(#[from] std::io::Error),

    /// Simulator settings could not be loaded.
    #[error("failed to load simulator config: {0}")]
    Config(#[from] config::ConfigError),
}

pub type SimResult<T> = Result<T, SimError>;
