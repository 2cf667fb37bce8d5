//! External image engine abstraction.
//!
//! The pipeline never constructs images itself; it hands a [`BuildContext`] and an
//! [`ImageRef`] to an [`ImageEngine`] and only interprets success or failure.
use async_trait::async_trait;
use thiserror::Error;

use kiln_model::ImageRef;

use crate::store::BuildContext;

/// Failure reported by the engine.
///
/// `output` is the engine's diagnostic text, passed to the caller verbatim.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct EngineFailure {
    pub reason: String,
    pub output: String,
}

impl EngineFailure {
    pub fn new(reason: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            output: output.into(),
        }
    }
}

/// `Ok` carries the engine's diagnostic output of a successful step.
pub type EngineResult = Result<String, EngineFailure>;

/// Builds images from a context and pushes them to a registry.
#[async_trait]
pub trait ImageEngine: Send + Sync + 'static {
    /// Engine name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Build `context` into a local image labeled `image`.
    async fn build(&self, context: &BuildContext, image: &ImageRef) -> EngineResult;

    /// Push an already built local image to its registry.
    async fn publish(&self, image: &ImageRef) -> EngineResult;
}
