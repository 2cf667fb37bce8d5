pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod render;
pub mod store;
pub mod tag;

pub use config::{ConfigError, ServiceConfig};
pub use engine::{EngineFailure, EngineResult, ImageEngine};
pub use error::PipelineError;
pub use metrics::{BuildOutcome, MetricsBackend, MetricsHandle, NoOpMetrics, Stage, noop_metrics};
pub use pipeline::{BuildReport, Pipeline, Preview};
pub use render::{ContextAsset, Recipe, RenderError, render};
pub use store::{BuildContext, ContextStore};
pub use tag::compute_tag;

pub mod prelude {
    pub use crate::engine::{EngineFailure, ImageEngine};
    pub use crate::error::PipelineError;
    pub use crate::pipeline::{BuildReport, Pipeline};
    pub use crate::store::BuildContext;
}
