use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template formatting failed (template v{version})")]
    Format {
        version: u32,
        #[source]
        source: std::fmt::Error,
    },
}
