use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use kiln_core::PipelineError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Pipeline(e) => e.kind(),
            ApiError::Internal(_) => "internal",
        }
    }

    /// Bad input is 400, engine failures 502, everything else 500.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pipeline(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(e) if e.is_upstream() => StatusCode::BAD_GATEWAY,
            ApiError::Pipeline(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use kiln_model::ModelError;

    use super::*;

    #[test]
    fn status_follows_error_class() {
        let cases = [
            (
                ApiError::from(PipelineError::from(ModelError::MissingField("airflow_version"))),
                StatusCode::BAD_REQUEST,
                "malformed_request",
            ),
            (
                ApiError::from(PipelineError::from(std::io::Error::other("read-only"))),
                StatusCode::INTERNAL_SERVER_ERROR,
                "persistence_failure",
            ),
            (
                ApiError::from(PipelineError::Publish {
                    image: "r/a:t".into(),
                    reason: "exit".into(),
                    output: "denied".into(),
                }),
                StatusCode::BAD_GATEWAY,
                "publish_failure",
            ),
            (
                ApiError::Internal("task panicked".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
            ),
        ];

        for (err, status, kind) in cases {
            assert_eq!(err.status(), status, "{err}");
            assert_eq!(err.kind(), kind);
        }
    }

    #[test]
    fn pipeline_message_is_passed_through() {
        let err = ApiError::from(PipelineError::Build {
            image: "r/a:t".into(),
            reason: "process exited with non-zero code: 100".into(),
            output: "E: Unable to locate package nosuchpkg".into(),
        });
        assert!(err.to_string().starts_with("image build failed for r/a:t"));
        assert!(err.to_string().contains("nosuchpkg"));
    }
}
