//! Hook stages and the hook set.
//!
//! A simulation runs caller-supplied hooks in place of the gateway's real
//! middleware, always in the same order:
//!
//! ```text
//! Request  ──► Pre ──► PostKeyAuth ──► GatewayRequest ──► Post
//!                  (outbound call happens here)
//! Response ──► GatewayResponse ──► Response
//! ```
//!
//! Any closure with the right signature is a hook, so most callers never
//! implement [`RequestHook`] or [`ResponseHook`] by hand.

use crate::recorder::ResponseRecorder;
use crate::request::SimRequest;
use crate::response::SimResponse;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Stages
// ─────────────────────────────────────────────────────────────────────────────

/// One slot in the simulated middleware chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookStage {
    Pre,
    PostKeyAuth,
    /// The gateway's own request-transformation stage.
    GatewayRequest,
    Post,
    /// The gateway's own response-transformation stage.
    GatewayResponse,
    Response,
}

impl HookStage {
    /// Stages that run before the outbound call, in execution order.
    pub const REQUEST: [HookStage; 4] = [
        HookStage::Pre,
        HookStage::PostKeyAuth,
        HookStage::GatewayRequest,
        HookStage::Post,
    ];

    /// Stages that run after the outbound call, in execution order.
    pub const RESPONSE: [HookStage; 2] = [HookStage::GatewayResponse, HookStage::Response];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookStage::Pre => "pre",
            HookStage::PostKeyAuth => "post_key_auth",
            HookStage::GatewayRequest => "gateway_request",
            HookStage::Post => "post",
            HookStage::GatewayResponse => "gateway_response",
            HookStage::Response => "response",
        }
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Hook traits
// ─────────────────────────────────────────────────────────────────────────────

/// A request-stage hook: observes or mutates the working request.
pub trait RequestHook: Send {
    fn call(&mut self, rw: &mut ResponseRecorder, req: &mut SimRequest);
}

impl<F> RequestHook for F
where
    F: FnMut(&mut ResponseRecorder, &mut SimRequest) + Send,
{
    fn call(&mut self, rw: &mut ResponseRecorder, req: &mut SimRequest) {
        self(rw, req)
    }
}

/// A response-stage hook: observes or mutates the outbound response.
pub trait ResponseHook: Send {
    fn call(&mut self, rw: &mut ResponseRecorder, res: &mut SimResponse, req: &mut SimRequest);
}

impl<F> ResponseHook for F
where
    F: FnMut(&mut ResponseRecorder, &mut SimResponse, &mut SimRequest) + Send,
{
    fn call(&mut self, rw: &mut ResponseRecorder, res: &mut SimResponse, req: &mut SimRequest) {
        self(rw, res, req)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// HookSet
// ─────────────────────────────────────────────────────────────────────────────

/// Six optional hook slots. An empty slot is skipped.
#[derive(Default)]
pub struct HookSet {
    pub pre: Option<Box<dyn RequestHook>>,
    pub post_key_auth: Option<Box<dyn RequestHook>>,
    pub gateway_request: Option<Box<dyn RequestHook>>,
    pub post: Option<Box<dyn RequestHook>>,
    pub gateway_response: Option<Box<dyn ResponseHook>>,
    pub response: Option<Box<dyn ResponseHook>>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pre<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ResponseRecorder, &mut SimRequest) + Send + 'static,
    {
        self.pre = Some(Box::new(hook));
        self
    }

    pub fn with_post_key_auth<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ResponseRecorder, &mut SimRequest) + Send + 'static,
    {
        self.post_key_auth = Some(Box::new(hook));
        self
    }

    pub fn with_gateway_request<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ResponseRecorder, &mut SimRequest) + Send + 'static,
    {
        self.gateway_request = Some(Box::new(hook));
        self
    }

    pub fn with_post<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ResponseRecorder, &mut SimRequest) + Send + 'static,
    {
        self.post = Some(Box::new(hook));
        self
    }

    pub fn with_gateway_response<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ResponseRecorder, &mut SimResponse, &mut SimRequest) + Send + 'static,
    {
        self.gateway_response = Some(Box::new(hook));
        self
    }

    pub fn with_response<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut ResponseRecorder, &mut SimResponse, &mut SimRequest) + Send + 'static,
    {
        self.response = Some(Box::new(hook));
        self
    }

    /// Slot for a request stage; `None` for response stages.
    pub fn request_hook(
        &mut self,
        stage: HookStage,
    ) -> Option<&mut (dyn RequestHook + 'static)> {
        let slot = match stage {
            HookStage::Pre => &mut self.pre,
            HookStage::PostKeyAuth => &mut self.post_key_auth,
            HookStage::GatewayRequest => &mut self.gateway_request,
            HookStage::Post => &mut self.post,
            HookStage::GatewayResponse | HookStage::Response => return None,
        };
        slot.as_deref_mut()
    }

    /// Slot for a response stage; `None` for request stages.
    pub fn response_hook(
        &mut self,
        stage: HookStage,
    ) -> Option<&mut (dyn ResponseHook + 'static)> {
        let slot = match stage {
            HookStage::GatewayResponse => &mut self.gateway_response,
            HookStage::Response => &mut self.response,
            _ => return None,
        };
        slot.as_deref_mut()
    }

    /// Stages with a hook installed, in execution order.
    pub fn populated(&self) -> Vec<HookStage> {
        let slots = [
            (HookStage::Pre, self.pre.is_some()),
            (HookStage::PostKeyAuth, self.post_key_auth.is_some()),
            (HookStage::GatewayRequest, self.gateway_request.is_some()),
            (HookStage::Post, self.post.is_some()),
            (HookStage::GatewayResponse, self.gateway_response.is_some()),
            (HookStage::Response, self.response.is_some()),
        ];
        slots
            .into_iter()
            .filter_map(|(stage, set)| set.then_some(stage))
            .collect()
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSet")
            .field("populated", &self.populated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_has_no_hooks() {
        let mut hooks = HookSet::new();
        assert!(hooks.populated().is_empty());
        for stage in HookStage::REQUEST {
            assert!(hooks.request_hook(stage).is_none());
        }
        for stage in HookStage::RESPONSE {
            assert!(hooks.response_hook(stage).is_none());
        }
    }

    #[test]
    fn populated_follows_execution_order() {
        let hooks = HookSet::new()
            .with_response(|_, _, _| {})
            .with_post(|_, _| {})
            .with_pre(|_, _| {});
        assert_eq!(
            hooks.populated(),
            vec![HookStage::Pre, HookStage::Post, HookStage::Response]
        );
    }

    #[test]
    fn stage_kinds_do_not_cross() {
        let mut hooks = HookSet::new()
            .with_pre(|_, _| {})
            .with_response(|_, _, _| {});
        assert!(hooks.request_hook(HookStage::Pre).is_some());
        assert!(hooks.response_hook(HookStage::Pre).is_none());
        assert!(hooks.response_hook(HookStage::Response).is_some());
        assert!(hooks.request_hook(HookStage::Response).is_none());
    }

    #[test]
    fn stage_names_are_snake_case() {
        assert_eq!(HookStage::PostKeyAuth.to_string(), "post_key_auth");
        assert_eq!(HookStage::GatewayResponse.as_str(), "gateway_response");
    }
}
