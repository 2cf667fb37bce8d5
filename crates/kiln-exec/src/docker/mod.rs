//! Docker CLI engine.
//!
//! Builds with `docker build -t <image> -f <recipe> <context>` and publishes
//! with `docker push <image>`, capturing everything the CLI prints.
mod config;
pub use config::DockerEngineConfig;

mod engine;
pub use engine::DockerEngine;
