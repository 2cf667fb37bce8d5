use async_trait::async_trait;

use kiln_core::{BuildReport, Preview};
use kiln_model::BuildSpec;

use crate::error::ApiError;

/// Backend of the HTTP surface.
///
/// [`crate::PipelineApiAdapter`] is the stock implementation; wrap or replace it
/// to add auth, rate limiting or request queueing.
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    /// Render, build and publish an image for `spec`.
    async fn build_and_push(&self, spec: BuildSpec) -> Result<BuildReport, ApiError>;

    /// Render and tag `spec` without building anything.
    async fn render(&self, spec: BuildSpec) -> Result<Preview, ApiError>;
}
