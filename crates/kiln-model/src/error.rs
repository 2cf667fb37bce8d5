use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("invalid {field} entry {value:?}: {reason}")]
    InvalidEntry {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("invalid build tag: {0}")]
    InvalidTag(String),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::Malformed(e.to_string())
    }
}

pub type ModelResult<T> = Result<T, ModelError>;
