//! Request-to-artifact orchestration.
//!
//! One [`Pipeline::run`] call drives a single request end to end:
//! validate → render → persist → tag → build → publish.
//! Steps run strictly in order and the first failure is the only result.
use std::{sync::Arc, time::Instant};

use tracing::{debug, info, warn};

use kiln_model::{BuildSpec, BuildTag, ImageRef};

use crate::{
    PipelineError,
    config::ServiceConfig,
    engine::ImageEngine,
    metrics::{BuildOutcome, MetricsHandle, Stage, noop_metrics},
    render::{Recipe, render},
    store::ContextStore,
    tag::compute_tag,
};

/// Successful pipeline result.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub image: ImageRef,
    pub build_output: String,
    pub publish_output: String,
}

impl BuildReport {
    pub fn tag(&self) -> &BuildTag {
        self.image.tag()
    }

    /// Human-readable success message.
    pub fn message(&self) -> String {
        format!("Docker image built and pushed successfully: {}", self.image)
    }
}

/// Side-effect free view of what a run would produce.
#[derive(Debug, Clone)]
pub struct Preview {
    pub recipe: Recipe,
    pub image: ImageRef,
}

/// Build orchestrator.
///
/// Cheap to share behind an `Arc`; holds no per-request state.
pub struct Pipeline {
    config: Arc<ServiceConfig>,
    engine: Arc<dyn ImageEngine>,
    store: ContextStore,
    metrics: MetricsHandle,
}

impl Pipeline {
    /// Create a pipeline storing build contexts under `config.work_dir`.
    pub fn new(config: Arc<ServiceConfig>, engine: Arc<dyn ImageEngine>) -> Self {
        let store = ContextStore::new(&config.work_dir);
        Self {
            config,
            engine,
            store,
            metrics: noop_metrics(),
        }
    }

    /// Attach a metrics backend.
    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Validate, render and tag a spec without touching disk or the engine.
    pub fn preview(&self, spec: &BuildSpec) -> Result<Preview, PipelineError> {
        spec.validate()?;
        let recipe = render(spec)?;
        let image = self.config.image_ref(compute_tag(spec)?);
        Ok(Preview { recipe, image })
    }

    /// Drive one request end to end.
    ///
    /// Nothing is retried and nothing is rolled back: a failed publish leaves
    /// the freshly built image in the engine's local store.
    pub async fn run(&self, spec: &BuildSpec) -> Result<BuildReport, PipelineError> {
        let started = Instant::now();
        self.metrics.record_build_started();

        let result = self.execute(spec).await;

        let outcome = match &result {
            Ok(_) => BuildOutcome::Success,
            Err(e) => BuildOutcome::from(e),
        };
        self.metrics
            .record_build_completed(outcome, elapsed_ms(started));

        match &result {
            Ok(report) => info!(image = %report.image, "build and publish finished"),
            Err(e) if e.is_client_error() => warn!(kind = e.kind(), "request rejected: {e}"),
            Err(e) => warn!(kind = e.kind(), "pipeline failed: {e}"),
        }
        result
    }

    async fn execute(&self, spec: &BuildSpec) -> Result<BuildReport, PipelineError> {
        spec.validate()?;
        if let Some(base) = spec.base_image() {
            debug!(base_image = base, "base_image override is not applied to the recipe");
        }

        let recipe = render(spec)?;
        let context = self.store.persist(&recipe).await?;

        let tag = compute_tag(spec)?;
        let image = self.config.image_ref(tag);
        info!(
            tag = %image.tag(),
            image = %image,
            context = %context.path().display(),
            engine = self.engine.name(),
            "starting image build"
        );

        let stage = Instant::now();
        let built = self.engine.build(&context, &image).await;
        self.metrics
            .record_stage_duration(Stage::Build, elapsed_ms(stage));
        let build_output = built.map_err(|f| PipelineError::Build {
            image: image.to_string(),
            reason: f.reason,
            output: f.output,
        })?;
        info!(image = %image, "image built, publishing");

        let stage = Instant::now();
        let published = self.engine.publish(&image).await;
        self.metrics
            .record_stage_duration(Stage::Publish, elapsed_ms(stage));
        let publish_output = published.map_err(|f| PipelineError::Publish {
            image: image.to_string(),
            reason: f.reason,
            output: f.output,
        })?;

        Ok(BuildReport {
            image,
            build_output,
            publish_output,
        })
    }
}

fn elapsed_ms(since: Instant) -> u64 {
    u64::try_from(since.elapsed().as_millis()).unwrap_or(u64::MAX)
}
