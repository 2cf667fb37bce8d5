use std::net::SocketAddr;

use kiln_core::{ConfigError, ServiceConfig};
use kiln_exec::docker::DockerEngineConfig;

/// Address the HTTP server binds to.
pub const ENV_LISTEN_ADDR: &str = "KILN_LISTEN_ADDR";
/// Docker-compatible CLI used for build and push.
pub const ENV_DOCKER_BIN: &str = "KILN_DOCKER_BIN";
/// Whitespace-separated extra arguments for every `build`.
pub const ENV_DOCKER_BUILD_ARGS: &str = "KILN_DOCKER_BUILD_ARGS";
/// Whitespace-separated extra arguments for every `push`.
pub const ENV_DOCKER_PUSH_ARGS: &str = "KILN_DOCKER_PUSH_ARGS";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Everything the daemon needs besides logging.
#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub listen_addr: SocketAddr,
    pub service: ServiceConfig,
    pub docker: DockerEngineConfig,
}

impl DaemonConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen = get(ENV_LISTEN_ADDR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: ENV_LISTEN_ADDR,
                reason: format!("{listen:?}: {e}"),
            })?;

        let service = ServiceConfig::from_lookup(&lookup)?;

        let mut docker = DockerEngineConfig::default();
        if let Some(program) = get(ENV_DOCKER_BIN) {
            docker.program = program.trim().to_string();
        }
        if let Some(args) = get(ENV_DOCKER_BUILD_ARGS) {
            docker.build_args = split_args(&args);
        }
        if let Some(args) = get(ENV_DOCKER_PUSH_ARGS) {
            docker.push_args = split_args(&args);
        }

        Ok(Self {
            listen_addr,
            service,
            docker,
        })
    }
}

fn split_args(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
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
    fn defaults_when_unset() {
        let cfg = DaemonConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.listen_addr.to_string(), DEFAULT_LISTEN_ADDR);
        assert_eq!(cfg.service.registry, "localhost:5000");
        assert_eq!(cfg.service.image_name, "airflow");
        assert_eq!(cfg.docker.program, "docker");
        assert!(cfg.docker.build_args.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let cfg = DaemonConfig::from_lookup(lookup(&[
            (ENV_LISTEN_ADDR, "127.0.0.1:9000"),
            ("REGISTRY_URL", "registry.internal:5000"),
            ("IMAGE_NAME", "airflow-custom"),
            (ENV_DOCKER_BIN, "podman"),
            (ENV_DOCKER_BUILD_ARGS, "--pull  --network host"),
            (ENV_DOCKER_PUSH_ARGS, "--quiet"),
        ]))
        .unwrap();

        assert_eq!(cfg.listen_addr.port(), 9000);
        assert_eq!(cfg.service.registry, "registry.internal:5000");
        assert_eq!(cfg.service.image_name, "airflow-custom");
        assert_eq!(cfg.docker.program, "podman");
        assert_eq!(cfg.docker.build_args, ["--pull", "--network", "host"]);
        assert_eq!(cfg.docker.push_args, ["--quiet"]);
    }

    #[test]
    fn rejects_bad_listen_addr() {
        let err = DaemonConfig::from_lookup(lookup(&[(ENV_LISTEN_ADDR, "localhost")])).unwrap_err();
        assert!(err.to_string().contains(ENV_LISTEN_ADDR));
    }
}
