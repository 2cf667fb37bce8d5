use thiserror::Error;

use kiln_model::ModelError;

use crate::render::RenderError;

/// Terminal error of a pipeline run.
///
/// The pipeline is strictly linear: the first failing step produces one of these and nothing after it runs.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("malformed request: {0}")]
    MalformedRequest(#[from] ModelError),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("failed to persist build context: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("image build failed for {image}: {reason}\n{output}")]
    Build {
        image: String,
        reason: String,
        output: String,
    },

    #[error("image push failed for {image}: {reason}\n{output}")]
    Publish {
        image: String,
        reason: String,
        output: String,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Stable machine-readable label for API bodies and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MalformedRequest(_) => "malformed_request",
            PipelineError::Render(_) => "render_failure",
            PipelineError::Persistence(_) => "persistence_failure",
            PipelineError::Build { .. } => "build_failure",
            PipelineError::Publish { .. } => "publish_failure",
            PipelineError::Internal(_) => "internal",
        }
    }

    /// `true` when the caller sent bad input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::MalformedRequest(_))
    }

    /// `true` when the external build engine reported the failure.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            PipelineError::Build { .. } | PipelineError::Publish { .. }
        )
    }
}
