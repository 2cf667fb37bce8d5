use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;

use kiln_core::{BuildReport, Pipeline, Preview};
use kiln_model::BuildSpec;

use crate::{error::ApiError, handler::ApiHandler};

/// Bridges [`Pipeline`] to [`ApiHandler`].
///
/// Each build runs in its own spawned task, so a client that disconnects
/// mid-request does not abort an in-flight build or push.
pub struct PipelineApiAdapter {
    pipeline: Arc<Pipeline>,
}

impl PipelineApiAdapter {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl ApiHandler for PipelineApiAdapter {
    async fn build_and_push(&self, spec: BuildSpec) -> Result<BuildReport, ApiError> {
        let pipeline = self.pipeline.clone();
        let task = tokio::spawn(async move { pipeline.run(&spec).await });

        match task.await {
            Ok(result) => result.map_err(ApiError::from),
            Err(e) => {
                error!("build task did not complete: {e}");
                Err(ApiError::Internal(format!("build task did not complete: {e}")))
            }
        }
    }

    async fn render(&self, spec: BuildSpec) -> Result<Preview, ApiError> {
        self.pipeline.preview(&spec).map_err(ApiError::from)
    }
}
