//! Bounded diagnostic dumps.
//!
//! Response bodies and arbitrary values are pretty-printed and then capped so
//! a large payload cannot flood the console or the log. Anything over the
//! cap is cut at exactly `cap` bytes and followed by a trailer naming the cap;
//! anything at or under it passes through untouched.

use crate::logger::SimLogger;
use serde::Serialize;
use serde::de::IgnoredAny;
use std::sync::Arc;

/// Default cap for response bodies, in bytes.
pub const BODY_DUMP_LIMIT: usize = 1000;
/// Default cap for structured values sent to the logger, in bytes.
pub const VALUE_DUMP_LIMIT: usize = 300;

/// Cut `output` to `cap` bytes and append the trim trailer when it is longer.
pub fn bound(mut output: Vec<u8>, cap: usize) -> Vec<u8> {
    if output.len() > cap {
        output.truncate(cap);
        output.extend_from_slice(format!("\n...(trimmed at {cap} bytes)").as_bytes());
    }
    output
}

/// Re-indent a JSON document with tabs; `None` if it is not valid JSON.
///
/// Only whitespace between tokens changes. Strings, numbers, literals and
/// repeated keys are copied byte for byte.
fn indent_json(raw: &[u8]) -> Option<Vec<u8>> {
    serde_json::from_slice::<IgnoredAny>(raw).ok()?;

    let mut out = Vec::with_capacity(raw.len() + raw.len() / 2);
    let mut depth = 0usize;
    // An opener was written and its newline waits for the first element,
    // so that `{}` and `[]` stay on one line.
    let mut pending_open = false;
    let mut in_string = false;
    let mut escaped = false;

    for &b in raw {
        if in_string {
            out.push(b);
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
            continue;
        }
        if pending_open && b != b'}' && b != b']' {
            pending_open = false;
            depth += 1;
            newline(&mut out, depth);
        }
        match b {
            b'"' => {
                in_string = true;
                out.push(b);
            }
            b'{' | b'[' => {
                out.push(b);
                pending_open = true;
            }
            b',' => {
                out.push(b);
                newline(&mut out, depth);
            }
            b':' => out.extend_from_slice(b": "),
            b'}' | b']' => {
                if pending_open {
                    pending_open = false;
                } else {
                    depth = depth.saturating_sub(1);
                    newline(&mut out, depth);
                }
                out.push(b);
            }
            _ => out.push(b),
        }
    }
    Some(out)
}

fn newline(out: &mut Vec<u8>, depth: usize) {
    out.push(b'\n');
    out.extend(std::iter::repeat_n(b'\t', depth));
}

/// Renders response bodies and logs structured values under fixed caps.
#[derive(Clone)]
pub struct Dumper {
    logger: Arc<dyn SimLogger>,
    body_limit: usize,
    value_limit: usize,
}

impl Dumper {
    pub fn new(logger: Arc<dyn SimLogger>) -> Self {
        Self {
            logger,
            body_limit: BODY_DUMP_LIMIT,
            value_limit: VALUE_DUMP_LIMIT,
        }
    }

    /// Builder helper: override both caps.
    pub fn with_limits(mut self, body_limit: usize, value_limit: usize) -> Self {
        self.body_limit = body_limit;
        self.value_limit = value_limit;
        self
    }

    pub fn body_limit(&self) -> usize {
        self.body_limit
    }

    pub fn value_limit(&self) -> usize {
        self.value_limit
    }

    /// Pretty-print a response body for the console.
    ///
    /// Bodies that are not JSON are dumped as they arrived.
    pub fn render_body(&self, body: &[u8]) -> Vec<u8> {
        let output = indent_json(body).unwrap_or_else(|| body.to_vec());
        bound(output, self.body_limit)
    }

    /// Log `value` as two-space indented JSON under `prefix`.
    ///
    /// A value that fails to serialize is reported and not dumped.
    pub fn log_as_json<T: Serialize + ?Sized>(&self, prefix: &str, value: &T) {
        self.log_rendered(prefix, serde_json::to_vec_pretty(value));
    }

    fn log_rendered(&self, prefix: &str, rendered: serde_json::Result<Vec<u8>>) {
        let bytes = match rendered {
            Ok(bytes) => bytes,
            Err(e) => {
                self.logger
                    .info(prefix, &format!("Error marshalling JSON: {e}"));
                return;
            }
        };
        if bytes.is_empty() {
            self.logger.info(prefix, "Empty JSON");
            return;
        }
        let bytes = bound(bytes, self.value_limit);
        self.logger
            .info(&format!("{prefix}\n"), &String::from_utf8_lossy(&bytes));
    }
}

impl std::fmt::Debug for Dumper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dumper")
            .field("body_limit", &self.body_limit)
            .field("value_limit", &self.value_limit)
            .finish_non_exhaustive()
    }
}
