use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use kiln_core::PipelineError;
use kiln_model::BuildSpec;

use crate::{error::ApiError, handler::ApiHandler};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Routes:
    /// - POST /build-and-push - render, build and publish
    /// - POST /render - render and tag only
    /// - GET /healthz - liveness
    ///
    /// Other methods on these paths get 405 from the router.
    pub fn router(self) -> Router {
        Router::new()
            .route("/build-and-push", post(build_and_push::<H>))
            .route("/render", post(render::<H>))
            .route("/healthz", get(healthz))
            .with_state(self.handler)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResponse {
    pub message: String,
    pub image: String,
    pub image_tag: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenderResponse {
    pub dockerfile: String,
    pub image: String,
    pub image_tag: String,
}

/// Bodies are decoded here rather than with the `Json` extractor so a missing
/// `Content-Type` is accepted and decode errors share the pipeline's error shape.
fn decode(body: &[u8]) -> Result<BuildSpec, ApiError> {
    BuildSpec::from_json_slice(body).map_err(|e| {
        debug!("rejecting request body: {e}");
        ApiError::from(PipelineError::from(e))
    })
}

/// POST /build-and-push
async fn build_and_push<H>(
    State(handler): State<Arc<H>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let spec = decode(&body)?;
    let report = handler.build_and_push(spec).await?;

    Ok(Json(BuildResponse {
        message: report.message(),
        image: report.image.to_string(),
        image_tag: report.tag().to_string(),
    }))
}

/// POST /render
async fn render<H>(
    State(handler): State<Arc<H>>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let spec = decode(&body)?;
    let preview = handler.render(spec).await?;

    Ok(Json(RenderResponse {
        image_tag: preview.image.tag().to_string(),
        image: preview.image.to_string(),
        dockerfile: preview.recipe.into_text(),
    }))
}

/// GET /healthz
async fn healthz() -> &'static str {
    "ok"
}
