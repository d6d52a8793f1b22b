//! Stateful adapter around mock tools
//!
//! The adapter computes the mock's canned payload, classifies the call and
//! applies the implied side effects to the shared session, merging injected
//! fields into the payload. It never fails the caller: when any step after
//! the canned payload goes wrong, the untouched canned payload is returned.

use crate::classifier::{classify_in, Domain, Effect, EffectSet, ToolCallContext};
use crate::error::format_error_chain;
use crate::mock::MockResponder;
use crate::session::{SessionState, SharedSession};
use crate::StateError;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Why the heuristic layer gave up on a call
#[derive(Debug, Error)]
pub enum HeuristicOutcome {
    /// An effect fired without the argument it needs
    #[error("Missing argument: {0}")]
    MissingField(&'static str),

    /// The session rejected a side effect
    #[error("Session rejected side effect: {0}")]
    State(#[from] StateError),

    /// An injected field could not be rendered
    #[error("Failed to render injected field: {0}")]
    Render(#[from] serde_json::Error),
}

/// Applies classified side effects to a shared session
#[derive(Debug, Clone)]
pub struct ToolAdapter {
    session: SharedSession,
    domain: Domain,
}

impl ToolAdapter {
    /// Adapter applying the file and inventory rules
    pub fn new(session: SharedSession) -> Self {
        Self::for_domain(session, Domain::Any)
    }

    /// Adapter applying the rule group of `domain`
    pub fn for_domain(session: SharedSession, domain: Domain) -> Self {
        Self { session, domain }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Run a mock tool call with stateful side effects
    ///
    /// Returns the canned payload with injected fields, or the canned payload
    /// unchanged if the heuristic layer fails.
    pub fn invoke<R>(&self, responder: &R, ctx: &ToolCallContext) -> Map<String, Value>
    where
        R: MockResponder + ?Sized,
    {
        let base = responder.respond(&ctx.tool_name);

        match self.try_invoke(&base, ctx) {
            Ok(result) => result,
            Err(outcome) => {
                debug!(
                    tool = %ctx.tool_name,
                    reason = %format_error_chain(&outcome),
                    "Heuristic side effects discarded"
                );
                base
            }
        }
    }

    /// Run a call from a loose argument map
    pub fn invoke_kwargs<R>(
        &self,
        responder: &R,
        tool_name: &str,
        kwargs: &Map<String, Value>,
    ) -> Map<String, Value>
    where
        R: MockResponder + ?Sized,
    {
        self.invoke(responder, &ToolCallContext::from_kwargs(tool_name, kwargs))
    }

    fn try_invoke(
        &self,
        base: &Map<String, Value>,
        ctx: &ToolCallContext,
    ) -> Result<Map<String, Value>, HeuristicOutcome> {
        let effects = classify_in(self.domain, ctx);
        let mut result = base.clone();
        if effects.is_empty() {
            return Ok(result);
        }

        // all effects of one call apply under a single lock
        let mut session = self.session.lock();
        apply_effects(&mut session, ctx, &effects, &mut result)?;
        debug!(tool = %ctx.tool_name, ?effects, "Applied side effects");
        Ok(result)
    }
}

/// Apply `effects` for `ctx` to `session`, injecting fields into `result`
///
/// Effects run in `Effect` order: a call that both writes and reads a path
/// reads back what it just wrote.
pub fn apply_effects(
    session: &mut SessionState,
    ctx: &ToolCallContext,
    effects: &EffectSet,
    result: &mut Map<String, Value>,
) -> Result<(), HeuristicOutcome> {
    for effect in effects {
        match effect {
            Effect::Write => {
                let path = ctx.target_path().ok_or(HeuristicOutcome::MissingField("path"))?;
                let content = ctx
                    .write_payload()
                    .ok_or(HeuristicOutcome::MissingField("content"))?;
                session.write_file(path, content)?;
            }
            Effect::Read => {
                let path = ctx.target_path().ok_or(HeuristicOutcome::MissingField("path"))?;
                if let Some(real) = session.read_file(path) {
                    result.insert("content".to_string(), Value::String(real));
                }
            }
            Effect::InventoryRead => {
                let inventory = session.get_inventory();
                let rendered = serde_json::to_string(&inventory)?;
                result.insert("inventory".to_string(), Value::Array(inventory));
                result.insert("content".to_string(), Value::String(rendered));
            }
            Effect::InventoryAdd => {
                let item = ctx
                    .inventory_item()
                    .ok_or(HeuristicOutcome::MissingField("item"))?;
                session.add_item(item.clone())?;
            }
            Effect::Post => {
                let text = ctx
                    .post_payload()
                    .ok_or(HeuristicOutcome::MissingField("content"))?;
                session.post_content(text);
            }
            Effect::FeedRead => {
                let feed = session.get_feed();
                if !feed.is_empty() {
                    result.insert("content".to_string(), serde_json::to_value(feed)?);
                }
            }
        }
    }
    Ok(())
}
