use std::sync::Arc;

use prometheus::{
    Counter, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    proto::MetricFamily,
};

use kiln_core::{BuildOutcome, MetricsBackend, Stage};

/// `stage` label value for whole-run durations.
pub const STAGE_TOTAL: &str = "total";

/// Image builds run from seconds (cache hits) to tens of minutes.
const DURATION_BUCKETS: [f64; 11] = [
    0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0, 1200.0, 1800.0,
];

/// Prometheus metrics backend.
///
/// ## Label cardinality
/// - `outcome`: one value per [`BuildOutcome`]
/// - `stage`: `build`, `publish`, `total`
#[derive(Clone)]
pub struct PrometheusMetrics {
    builds_started: Counter,
    builds_completed: CounterVec,
    build_duration: HistogramVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Register all collectors in the given registry.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let builds_started = Counter::with_opts(Opts::new(
            "kiln_builds_started_total",
            "Total number of build requests accepted by the pipeline",
        ))?;
        registry.register(Box::new(builds_started.clone()))?;

        let builds_completed = CounterVec::new(
            Opts::new(
                "kiln_builds_completed_total",
                "Total number of finished pipeline runs by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(builds_completed.clone()))?;

        let build_duration = HistogramVec::new(
            HistogramOpts::new(
                "kiln_build_duration_seconds",
                "Duration of engine stages and whole runs in seconds",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["stage"],
        )?;
        registry.register(Box::new(build_duration.clone()))?;

        Ok(Self {
            builds_started,
            builds_completed,
            build_duration,
            registry,
        })
    }

    /// Backend with a private registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render all metrics in the text exposition format.
    pub fn encode_text(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_build_started(&self) {
        self.builds_started.inc();
    }

    fn record_build_completed(&self, outcome: BuildOutcome, duration_ms: u64) {
        self.builds_completed
            .with_label_values(&[outcome.as_label()])
            .inc();
        self.build_duration
            .with_label_values(&[STAGE_TOTAL])
            .observe(seconds(duration_ms));
    }

    fn record_stage_duration(&self, stage: Stage, duration_ms: u64) {
        self.build_duration
            .with_label_values(&[stage.as_label()])
            .observe(seconds(duration_ms));
    }
}

fn seconds(ms: u64) -> f64 {
    ms as f64 / 1000.0
}
