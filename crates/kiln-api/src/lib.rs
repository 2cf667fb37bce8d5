//! HTTP surface of the build service.
//!
//! [`HttpApi`] mounts the routes over any [`ApiHandler`];
//! [`PipelineApiAdapter`] is the handler backed by a [`kiln_core::Pipeline`].

mod adapter;
mod error;
mod handler;
mod http;

pub use adapter::PipelineApiAdapter;
pub use error::{ApiError, ErrorBody};
pub use handler::ApiHandler;
pub use http::{BuildResponse, HttpApi, RenderResponse};
