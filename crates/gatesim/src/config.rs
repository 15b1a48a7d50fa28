//! Simulator settings.
//!
//! Settings are layered: built-in defaults, then an optional file (format
//! picked from its extension: TOML, JSON or YAML), then `GATESIM_*`
//! environment variables, e.g. `GATESIM_OUTBOUND_TIMEOUT_MS=5000`.

use crate::dump::{BODY_DUMP_LIMIT, VALUE_DUMP_LIMIT};
use crate::error::SimResult;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Banner written to the console ahead of the dumped response body.
pub const DEFAULT_BANNER: &str = "---- Response Body ----";

const ENV_PREFIX: &str = "GATESIM";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Cap for the console dump of the response body, in bytes.
    pub body_dump_limit: usize,
    /// Cap for structured values sent to the logger, in bytes.
    pub value_dump_limit: usize,
    /// Deadline for the outbound call. `None` waits indefinitely.
    pub outbound_timeout_ms: Option<u64>,
    pub banner: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            body_dump_limit: BODY_DUMP_LIMIT,
            value_dump_limit: VALUE_DUMP_LIMIT,
            outbound_timeout_ms: None,
            banner: DEFAULT_BANNER.to_string(),
        }
    }
}

impl SimulatorConfig {
    /// Load settings from an optional file plus the process environment.
    pub fn load(path: Option<&str>) -> SimResult<Self> {
        Self::load_with_env(path, None)
    }

    /// As [`load`](Self::load), reading variables from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        path: Option<&str>,
        env: Option<HashMap<String, String>>,
    ) -> SimResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::with_name(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn outbound_timeout(&self) -> Option<Duration> {
        self.outbound_timeout_ms.map(Duration::from_millis)
    }

    /// Builder helper: set the outbound deadline.
    pub fn with_outbound_timeout(mut self, timeout: Duration) -> Self {
        self.outbound_timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }
}
