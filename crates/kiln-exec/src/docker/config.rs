use crate::{ExecError, OutputLogConfig};

/// Configuration of the docker CLI invocation.
#[derive(Debug, Clone)]
pub struct DockerEngineConfig {
    /// Program to execute (e.g. `"docker"`, `"podman"`, `"/usr/local/bin/docker"`).
    pub program: String,
    /// Extra arguments inserted into every `build` invocation before the context path.
    pub build_args: Vec<String>,
    /// Extra arguments inserted into every `push` invocation before the image.
    pub push_args: Vec<String>,
    /// How engine output is mirrored into the log.
    pub log: OutputLogConfig,
}

impl Default for DockerEngineConfig {
    fn default() -> Self {
        Self {
            program: "docker".to_string(),
            build_args: Vec::new(),
            push_args: Vec::new(),
            log: OutputLogConfig::default(),
        }
    }
}

impl DockerEngineConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn with_build_args(mut self, args: Vec<String>) -> Self {
        self.build_args = args;
        self
    }

    pub fn with_push_args(mut self, args: Vec<String>) -> Self {
        self.push_args = args;
        self
    }

    /// Validate the configuration.
    ///
    /// Rules:
    /// - `program` is not empty or whitespace-only.
    /// - no extra argument is empty.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.program.trim().is_empty() {
            return Err(ExecError::InvalidEngineConfig(
                "engine program is empty".into(),
            ));
        }
        if self
            .build_args
            .iter()
            .chain(&self.push_args)
            .any(|a| a.is_empty())
        {
            return Err(ExecError::InvalidEngineConfig(
                "engine arguments cannot be empty strings".into(),
            ));
        }
        if self.log.max_line_length == 0 {
            return Err(ExecError::InvalidEngineConfig(
                "log.max_line_length cannot be zero".into(),
            ));
        }
        Ok(())
    }
}
