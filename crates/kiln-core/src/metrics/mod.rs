//! Metrics collection abstraction for the build pipeline.
//!
//! Backends (prometheus, statsd, etc) implement [`MetricsBackend`] and are injected into [`crate::Pipeline`].
mod backend;
pub use backend::{BuildOutcome, MetricsBackend, MetricsHandle, Stage};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
