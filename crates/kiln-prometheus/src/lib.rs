//! Prometheus backend for the kiln build pipeline.
//!
//! [`PrometheusMetrics`] implements [`kiln_core::MetricsBackend`]; plug it into
//! a pipeline with [`kiln_core::Pipeline::with_metrics`].
//!
//! ## Metrics
//! - `kiln_builds_started_total` - Counter
//! - `kiln_builds_completed_total{outcome}` - Counter
//! - `kiln_build_duration_seconds{stage}` - Histogram (`build`, `publish`, `total`)
//!
//! ## HTTP
//! No server here. The daemon mounts `/metrics` and serves [`PrometheusMetrics::encode_text`].
//!
//! ```rust
//! use std::sync::Arc;
//! use kiln_core::MetricsBackend;
//! use kiln_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = Arc::new(PrometheusMetrics::new()?);
//! metrics.record_build_started();
//!
//! let body = metrics.encode_text()?;
//! assert!(body.contains("kiln_builds_started_total 1"));
//! # Ok(())
//! # }
//! ```

mod backend;
pub use backend::{PrometheusMetrics, STAGE_TOTAL};

pub use prometheus::{Encoder, Registry, TextEncoder};
