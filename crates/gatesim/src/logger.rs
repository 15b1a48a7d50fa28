//! Logger contract used by the dumper.
//!
//! The simulator never installs a subscriber. [`TracingLogger`] forwards to
//! whatever `tracing` subscriber the host has set up; [`MemoryLogger`] keeps
//! entries in memory so tests can assert on them.

use parking_lot::Mutex;
use tracing::info;

/// Info-level sink taking a prefix and a message.
pub trait SimLogger: Send + Sync {
    fn info(&self, prefix: &str, message: &str);
}

/// Forwards to `tracing::info!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl SimLogger for TracingLogger {
    fn info(&self, prefix: &str, message: &str) {
        info!(target: "gatesim", prefix = %prefix.trim_end(), "{message}");
    }
}

/// One captured log call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub prefix: String,
    pub message: String,
}

/// Captures every call for later inspection.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl SimLogger for MemoryLogger {
    fn info(&self, prefix: &str, message: &str) {
        self.entries.lock().push(LogEntry {
            prefix: prefix.to_string(),
            message: message.to_string(),
        });
    }
}
