//! Process-wide service configuration.
//!
//! Read once at startup and shared with the pipeline by reference.
use std::path::PathBuf;

use thiserror::Error;

use kiln_model::{BuildTag, DEFAULT_IMAGE_NAME, DEFAULT_REGISTRY, ImageRef};

/// Environment key for the registry address.
pub const ENV_REGISTRY_URL: &str = "REGISTRY_URL";
/// Environment key for the image repository name.
pub const ENV_IMAGE_NAME: &str = "IMAGE_NAME";
/// Environment key for the directory holding per-request build contexts.
pub const ENV_WORK_DIR: &str = "KILN_WORK_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Where images go and where build contexts live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Registry address, e.g. `localhost:5000`.
    pub registry: String,
    /// Repository name inside the registry.
    pub image_name: String,
    /// Parent directory for per-request build contexts.
    pub work_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            registry: DEFAULT_REGISTRY.to_string(),
            image_name: DEFAULT_IMAGE_NAME.to_string(),
            work_dir: std::env::temp_dir().join("kiln"),
        }
    }
}

impl ServiceConfig {
    /// Build the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Missing or blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let cfg = Self {
            registry: get(ENV_REGISTRY_URL).unwrap_or(defaults.registry),
            image_name: get(ENV_IMAGE_NAME).unwrap_or(defaults.image_name),
            work_dir: get(ENV_WORK_DIR)
                .map(PathBuf::from)
                .unwrap_or(defaults.work_dir),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate the configuration.
    ///
    /// Rules:
    /// - `registry` and `image_name` contain no whitespace.
    /// - `registry` carries no scheme and no trailing slash.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry.trim().is_empty() || self.registry.chars().any(char::is_whitespace) {
            return Err(ConfigError::Invalid {
                key: ENV_REGISTRY_URL,
                reason: format!("{:?} is not a registry address", self.registry),
            });
        }
        if self.registry.contains("://") || self.registry.ends_with('/') {
            return Err(ConfigError::Invalid {
                key: ENV_REGISTRY_URL,
                reason: format!("{:?} must be host[:port] without scheme", self.registry),
            });
        }
        if self.image_name.trim().is_empty() || self.image_name.chars().any(char::is_whitespace)
        {
            return Err(ConfigError::Invalid {
                key: ENV_IMAGE_NAME,
                reason: format!("{:?} is not a repository name", self.image_name),
            });
        }
        Ok(())
    }

    /// Compose the full image reference for a tag.
    pub fn image_ref(&self, tag: BuildTag) -> ImageRef {
        ImageRef::new(&self.registry, &self.image_name, tag)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.registry, "localhost:5000");
        assert_eq!(cfg.image_name, "airflow");
        assert!(cfg.work_dir.ends_with("kiln"));
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = ServiceConfig::from_lookup(lookup(&[
            ("REGISTRY_URL", "registry.internal:443"),
            ("IMAGE_NAME", "data/airflow"),
            ("KILN_WORK_DIR", "/var/lib/kiln"),
        ]))
        .unwrap();

        assert_eq!(cfg.registry, "registry.internal:443");
        assert_eq!(cfg.image_name, "data/airflow");
        assert_eq!(cfg.work_dir, PathBuf::from("/var/lib/kiln"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg =
            ServiceConfig::from_lookup(lookup(&[("REGISTRY_URL", "  "), ("IMAGE_NAME", "")]))
                .unwrap();
        assert_eq!(cfg.registry, "localhost:5000");
        assert_eq!(cfg.image_name, "airflow");
    }

    #[test]
    fn rejects_bad_registry_and_name() {
        let bad = [
            ("REGISTRY_URL", "http://localhost:5000"),
            ("REGISTRY_URL", "localhost:5000/"),
            ("REGISTRY_URL", "local host"),
            ("IMAGE_NAME", "air flow"),
        ];
        for (key, value) in bad {
            let err = ServiceConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            let ConfigError::Invalid { key: got, .. } = err;
            assert_eq!(got, key);
        }
    }

    #[test]
    fn image_ref_uses_configured_values() {
        let cfg = ServiceConfig {
            registry: "r.example:5000".into(),
            image_name: "airflow".into(),
            ..Default::default()
        };
        let tag = BuildTag::try_from("0123456789abcdef".to_string()).unwrap();
        assert_eq!(
            cfg.image_ref(tag).to_string(),
            "r.example:5000/airflow:0123456789abcdef"
        );
    }
}
