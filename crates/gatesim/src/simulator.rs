//! The simulation orchestrator.
//!
//! [`Simulation`] drives one synthetic request through the hook stages, makes
//! the single outbound call, runs the response stages and dumps the response
//! body to the console.
//!
//! ```rust,no_run
//! use gatesim::{HookSet, Simulation};
//!
//! # async fn run() -> gatesim::SimResult<()> {
//! let hooks = HookSet::new().with_pre(|_rw, req| {
//!     req.set_header("x-debug", "1");
//!     req.set_path("/v2/status");
//! });
//!
//! let report = Simulation::new("http://localhost/status?full=1", "api.json")?
//!     .with_hooks(hooks)
//!     .start()
//!     .await?;
//! println!("backend answered {}", report.status);
//! # Ok(())
//! # }
//! ```

use crate::config::SimulatorConfig;
use crate::definition::ApiDefinition;
use crate::dump::Dumper;
use crate::error::{SimError, SimResult};
use crate::hook::{HookSet, HookStage};
use crate::logger::{SimLogger, TracingLogger};
use crate::recorder::ResponseRecorder;
use crate::request::SimRequest;
use crate::response::SimResponse;
use crate::target::{OutboundTarget, resolve_outbound};
use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Everything observed during one simulation.
#[derive(Debug)]
pub struct SimulationReport {
    /// The request as it was before any hook ran.
    pub original: SimRequest,
    /// The working request after every stage, carrying the outbound method
    /// and URL.
    pub request: SimRequest,
    pub target: OutboundTarget,
    /// What the hooks wrote to the response writer.
    pub recorder: ResponseRecorder,
    /// Status after the response-stage hooks.
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Bytes,
    /// The dumped body exactly as written to the console, without the banner.
    pub rendered_body: Vec<u8>,
    /// Stages whose hook ran, in order.
    pub stages: Vec<HookStage>,
}

/// A single-use simulated request/response exchange.
pub struct Simulation {
    request: SimRequest,
    recorder: ResponseRecorder,
    hooks: HookSet,
    config: SimulatorConfig,
    logger: Arc<dyn SimLogger>,
    console: Box<dyn Write + Send>,
}

impl Simulation {
    /// Build a `GET` against `inbound_url` bound to the definition stored at
    /// `definition_path`.
    pub fn new(inbound_url: &str, definition_path: impl AsRef<Path>) -> SimResult<Self> {
        let definition = ApiDefinition::from_file(definition_path)?;
        Self::with_definition(inbound_url, definition)
    }

    /// Build a `GET` against `inbound_url` bound to an already-loaded
    /// definition.
    pub fn with_definition(
        inbound_url: &str,
        definition: impl Into<Arc<ApiDefinition>>,
    ) -> SimResult<Self> {
        let request = SimRequest::get(inbound_url, definition.into())?;
        Ok(Self {
            request,
            recorder: ResponseRecorder::new(),
            hooks: HookSet::new(),
            config: SimulatorConfig::default(),
            logger: Arc::new(TracingLogger),
            console: Box::new(std::io::stdout()),
        })
    }

    pub fn with_hooks(mut self, hooks: HookSet) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn SimLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Redirect the response dump away from stdout.
    pub fn with_console(mut self, console: impl Write + Send + 'static) -> Self {
        self.console = Box::new(console);
        self
    }

    pub fn hooks_mut(&mut self) -> &mut HookSet {
        &mut self.hooks
    }

    pub fn request(&self) -> &SimRequest {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut SimRequest {
        &mut self.request
    }

    pub fn definition(&self) -> &ApiDefinition {
        self.request.definition()
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn logger(&self) -> Arc<dyn SimLogger> {
        Arc::clone(&self.logger)
    }

    /// A dumper sharing this simulation's logger and caps, for use in hooks.
    pub fn dumper(&self) -> Dumper {
        Dumper::new(self.logger()).with_limits(
            self.config.body_dump_limit,
            self.config.value_dump_limit,
        )
    }

    /// Run the exchange end to end.
    #[instrument(
        skip(self),
        fields(request_id = %self.request.id, api_id = %self.request.definition().api_id)
    )]
    pub async fn start(self) -> SimResult<SimulationReport> {
        let dumper = self.dumper();
        let Self {
            mut request,
            mut recorder,
            mut hooks,
            config,
            logger,
            mut console,
        } = self;

        let original = request.clone();
        let mut stages = Vec::new();

        for stage in HookStage::REQUEST {
            if let Some(hook) = hooks.request_hook(stage) {
                debug!(stage = %stage, path = request.path(), "running request hook");
                hook.call(&mut recorder, &mut request);
                stages.push(stage);
            }
        }

        let definition = request.definition_arc();
        let target = resolve_outbound(&original, &request, &definition)?;
        request.method = target.method.clone();
        request.url = target.url.clone();

        let mut response = SimResponse::from_live(send(&config, &request).await?);
        info!(status = response.status.as_u16(), "← outbound response");

        for stage in HookStage::RESPONSE {
            if let Some(hook) = hooks.response_hook(stage) {
                debug!(stage = %stage, "running response hook");
                hook.call(&mut recorder, &mut response, &mut request);
                stages.push(stage);
            }
        }

        let body = match response.take_body().await {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "failed to read response body");
                logger.info("response body", &format!("failed to read response body: {e}"));
                Bytes::new()
            }
        };
        let rendered = dumper.render_body(&body);
        writeln!(console, "{}", config.banner)?;
        console.write_all(&rendered)?;
        console.write_all(b"\n")?;
        console.flush()?;

        Ok(SimulationReport {
            original,
            request,
            target,
            recorder,
            status: response.status,
            headers: response.headers,
            body,
            rendered_body: rendered,
            stages,
        })
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("request", &self.request)
            .field("hooks", &self.hooks)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Issue the outbound call for the rewritten working request.
async fn send(config: &SimulatorConfig, request: &SimRequest) -> SimResult<reqwest::Response> {
    let mut client = reqwest::Client::builder();
    if let Some(timeout) = config.outbound_timeout() {
        client = client.timeout(timeout);
    }
    let client = client.build().map_err(SimError::Client)?;

    info!(method = %request.method, url = %request.url, "→ outbound request");

    let mut builder = client
        .request(request.method.clone(), request.url.clone())
        .headers(request.headers.clone());
    if !request.body.is_empty() {
        builder = builder.body(request.body.clone());
    }

    builder.send().await.map_err(|source| SimError::Transport {
        url: request.url.to_string(),
        source,
    })
}
