//! `gatesim` — single-session gateway middleware simulator.
//!
//! Register stand-in hooks for each gateway middleware stage, drive one
//! synthetic request through them, and inspect how the hooks changed it, what
//! the backend answered, and a size-capped dump of the response body.
//!
//! | Module | Role |
//! |--------|------|
//! | [`simulator`] | [`Simulation`]: fixed-order hook pipeline and the outbound call |
//! | [`target`] | [`resolve_outbound`]: outbound method and URL from what hooks changed |
//! | [`dump`] | [`Dumper`]: pretty-printed, size-capped diagnostic output |
//! | [`hook`] | [`HookSet`], [`HookStage`] and the hook traits |
//! | [`definition`] | [`ApiDefinition`] loading |
//! | [`config`] | [`SimulatorConfig`] layered settings |
//!
//! The crate never installs a `tracing` subscriber; hosts that want the
//! simulator's events on screen set one up themselves.

pub mod config;
pub mod definition;
pub mod dump;
pub mod error;
pub mod hook;
pub mod logger;
pub mod recorder;
pub mod request;
pub mod response;
pub mod simulator;
pub mod target;

pub use config::SimulatorConfig;
pub use definition::{ApiDefinition, ProxyConfig};
pub use dump::Dumper;
pub use error::{SimError, SimResult};
pub use hook::{HookSet, HookStage, RequestHook, ResponseHook};
pub use logger::{LogEntry, MemoryLogger, SimLogger, TracingLogger};
pub use recorder::ResponseRecorder;
pub use request::SimRequest;
pub use response::SimResponse;
pub use simulator::{Simulation, SimulationReport};
pub use target::{OutboundTarget, resolve_outbound};
