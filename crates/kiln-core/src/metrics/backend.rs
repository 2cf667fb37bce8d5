use std::sync::Arc;

use crate::PipelineError;

/// Terminal classification of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Success,
    Malformed,
    RenderFailure,
    PersistenceFailure,
    BuildFailure,
    PublishFailure,
    Internal,
}

impl BuildOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            BuildOutcome::Success => "success",
            BuildOutcome::Malformed => "malformed",
            BuildOutcome::RenderFailure => "render_failure",
            BuildOutcome::PersistenceFailure => "persistence_failure",
            BuildOutcome::BuildFailure => "build_failure",
            BuildOutcome::PublishFailure => "publish_failure",
            BuildOutcome::Internal => "internal",
        }
    }
}

impl From<&PipelineError> for BuildOutcome {
    fn from(e: &PipelineError) -> Self {
        match e {
            PipelineError::MalformedRequest(_) => BuildOutcome::Malformed,
            PipelineError::Render(_) => BuildOutcome::RenderFailure,
            PipelineError::Persistence(_) => BuildOutcome::PersistenceFailure,
            PipelineError::Build { .. } => BuildOutcome::BuildFailure,
            PipelineError::Publish { .. } => BuildOutcome::PublishFailure,
            PipelineError::Internal(_) => BuildOutcome::Internal,
        }
    }
}

/// Engine-facing pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Build,
    Publish,
}

impl Stage {
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            Stage::Build => "build",
            Stage::Publish => "publish",
        }
    }
}

/// Backend metrics collection interface.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record that a pipeline run has started.
    fn record_build_started(&self);
    /// Record pipeline completion with outcome and total duration.
    ///
    /// Called exactly once per started run, whatever the outcome.
    fn record_build_completed(&self, outcome: BuildOutcome, duration_ms: u64);
    /// Record how long a single engine stage took.
    ///
    /// Called for every stage that was invoked, successful or not.
    fn record_stage_duration(&self, stage: Stage, duration_ms: u64);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
