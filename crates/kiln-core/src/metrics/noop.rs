use crate::metrics::backend::{BuildOutcome, MetricsBackend, Stage};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_build_started(&self) {}

    #[inline(always)]
    fn record_build_completed(&self, _: BuildOutcome, _: u64) {}

    #[inline(always)]
    fn record_stage_duration(&self, _: Stage, _: u64) {}
}
