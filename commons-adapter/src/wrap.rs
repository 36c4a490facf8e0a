//! Adapting business functions into envelope-returning tools.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use async_trait::async_trait;
use commons_primitives::{Tool, ToolResult, ToolSignature};
use futures::FutureExt;
use futures::future::{self as fut, BoxFuture};
use serde_json::Value;
use tracing::{debug, warn};

use crate::envelope::{IntoEnvelope, ResultEnvelope};
use crate::error::AdapterResult;
use crate::stats::AdapterStats;

/// A business function that can be adapted.
///
/// Implemented for async closures `Fn(Value) -> impl Future<Output = O>` whose
/// output converts into an envelope, and for [`AdaptedTool`] itself so that an
/// adapted tool can be wrapped again without changing what callers observe.
pub trait BusinessFn: Send + Sync + 'static {
    /// Raw return type of the business function.
    type Output: IntoEnvelope + Send + 'static;

    /// Starts the computation for one invocation.
    fn run(&self, input: Value) -> BoxFuture<'static, Self::Output>;
}

impl<F, Fut, O> BusinessFn for F
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
    O: IntoEnvelope + Send + 'static,
{
    type Output = O;

    fn run(&self, input: Value) -> BoxFuture<'static, O> {
        (self)(input).boxed()
    }
}

impl BusinessFn for AdaptedTool {
    type Output = ResultEnvelope;

    fn run(&self, input: Value) -> BoxFuture<'static, ResultEnvelope> {
        let tool = self.clone();
        async move { tool.call(input).await }.boxed()
    }
}

type Handler = Arc<dyn Fn(Value) -> BoxFuture<'static, ResultEnvelope> + Send + Sync>;

/// Envelope-returning tool produced by [`wrap`].
///
/// Carries the signature it was wrapped with unchanged, so a runtime that
/// introspects it sees the business function's name, documentation, and
/// parameters.
#[derive(Clone)]
pub struct AdaptedTool {
    signature: Arc<ToolSignature>,
    handler: Handler,
    stats: Option<Arc<AdapterStats>>,
}

impl fmt::Debug for AdaptedTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptedTool")
            .field("signature", &self.signature)
            .field("stats", &self.stats.is_some())
            .finish_non_exhaustive()
    }
}

impl AdaptedTool {
    /// Returns the signature the tool was wrapped with.
    #[must_use]
    pub fn signature(&self) -> &ToolSignature {
        &self.signature
    }

    /// Returns the tool name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.signature.name()
    }

    /// Records every invocation of this tool into the shared counters.
    #[must_use]
    pub fn with_stats(mut self, stats: Arc<AdapterStats>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Invokes the business function and normalises its outcome.
    ///
    /// Never fails: errors and panics surface as failure envelopes.
    pub async fn call(&self, input: Value) -> ResultEnvelope {
        let handler = Arc::clone(&self.handler);
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| handler(input))) {
            Ok(pending) => AssertUnwindSafe(pending).catch_unwind().await,
            Err(payload) => Err(payload),
        };

        let envelope = outcome.unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            warn!(tool = %self.name(), panic = %message, "business logic panicked");
            ResultEnvelope::failure(format!("tool `{}` panicked: {message}", self.name()))
        });

        if let Some(error) = envelope.error() {
            debug!(tool = %self.name(), %error, "business logic returned failure");
        }
        if let Some(stats) = &self.stats {
            stats.record(envelope.is_success());
        }
        envelope
    }
}

#[async_trait]
impl Tool for AdaptedTool {
    async fn invoke(&self, input: Value) -> ToolResult<Value> {
        Ok(self.call(input).await.to_value())
    }
}

/// Adapts an async business function.
///
/// The signature is validated here, so a descriptor the runtime could not
/// register fails at wrap time rather than on first invocation.
///
/// # Errors
///
/// Returns [`crate::AdapterError::Configuration`] when the signature is invalid.
pub fn wrap<B>(signature: ToolSignature, business: B) -> AdapterResult<AdaptedTool>
where
    B: BusinessFn,
{
    signature.validate()?;
    let business = Arc::new(business);
    let handler: Handler = Arc::new(move |input: Value| {
        let pending = business.run(input);
        async move { pending.await.into_envelope() }.boxed()
    });

    debug!(tool = %signature.name(), "wrapped business function");
    Ok(AdaptedTool {
        signature: Arc::new(signature),
        handler,
        stats: None,
    })
}

/// Adapts a synchronous business function.
///
/// # Errors
///
/// Returns [`crate::AdapterError::Configuration`] when the signature is invalid.
pub fn wrap_sync<F, O>(signature: ToolSignature, business: F) -> AdapterResult<AdaptedTool>
where
    F: Fn(Value) -> O + Send + Sync + 'static,
    O: IntoEnvelope + Send + 'static,
{
    wrap(signature, move |input| fut::ready(business(input)))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_owned()
    }
}
