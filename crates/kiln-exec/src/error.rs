use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("invalid engine configuration: {0}")]
    InvalidEngineConfig(String),
}
