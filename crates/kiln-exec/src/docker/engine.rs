use std::{ffi::OsString, path::Path};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::trace;

use kiln_core::{BuildContext, EngineResult, ImageEngine};
use kiln_model::ImageRef;

use crate::{ExecError, command::run_captured, docker::DockerEngineConfig};

/// [`ImageEngine`] backed by the docker CLI.
#[derive(Debug, Clone)]
pub struct DockerEngine {
    config: DockerEngineConfig,
}

impl DockerEngine {
    /// Create an engine after validating its configuration.
    pub fn new(config: DockerEngineConfig) -> Result<Self, ExecError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DockerEngineConfig {
        &self.config
    }

    /// Arguments of the build invocation.
    pub fn build_argv(&self, context: &Path, recipe: &Path, image: &ImageRef) -> Vec<OsString> {
        let mut argv: Vec<OsString> = vec![
            "build".into(),
            "-t".into(),
            image.to_string().into(),
            "-f".into(),
            recipe.as_os_str().to_owned(),
        ];
        argv.extend(self.config.build_args.iter().map(OsString::from));
        argv.push(context.as_os_str().to_owned());
        argv
    }

    /// Arguments of the push invocation.
    pub fn push_argv(&self, image: &ImageRef) -> Vec<OsString> {
        let mut argv: Vec<OsString> = vec!["push".into()];
        argv.extend(self.config.push_args.iter().map(OsString::from));
        argv.push(image.to_string().into());
        argv
    }

    fn command(&self, argv: Vec<OsString>) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(argv);
        cmd
    }
}

#[async_trait]
impl ImageEngine for DockerEngine {
    fn name(&self) -> &'static str {
        "docker"
    }

    async fn build(&self, context: &BuildContext, image: &ImageRef) -> EngineResult {
        let argv = self.build_argv(context.path(), context.recipe_path(), image);
        trace!(program = %self.config.program, ?argv, "docker build");

        let mut cmd = self.command(argv);
        cmd.current_dir(context.path());
        run_captured(cmd, "build", &self.config.log).await
    }

    async fn publish(&self, image: &ImageRef) -> EngineResult {
        let argv = self.push_argv(image);
        trace!(program = %self.config.program, ?argv, "docker push");

        run_captured(self.command(argv), "push", &self.config.log).await
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use kiln_model::BuildTag;

    use super::*;

    fn image() -> ImageRef {
        ImageRef::new(
            "localhost:5000",
            "airflow",
            BuildTag::try_from("8ab38a9b05d98966".to_string()).unwrap(),
        )
    }

    fn strings(argv: Vec<OsString>) -> Vec<String> {
        argv.into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn build_argv_tags_image_and_points_at_context() {
        let engine = DockerEngine::new(DockerEngineConfig::default()).unwrap();
        let ctx = PathBuf::from("/work/kiln-abc");
        let recipe = ctx.join("Dockerfile");

        assert_eq!(
            strings(engine.build_argv(&ctx, &recipe, &image())),
            vec![
                "build",
                "-t",
                "localhost:5000/airflow:8ab38a9b05d98966",
                "-f",
                "/work/kiln-abc/Dockerfile",
                "/work/kiln-abc",
            ]
        );
    }

    #[test]
    fn extra_args_are_inserted_before_positionals() {
        let engine = DockerEngine::new(
            DockerEngineConfig::default()
                .with_build_args(vec!["--pull".into()])
                .with_push_args(vec!["--quiet".into()]),
        )
        .unwrap();

        let build = strings(engine.build_argv(
            Path::new("/ctx"),
            Path::new("/ctx/Dockerfile"),
            &image(),
        ));
        assert_eq!(build[build.len() - 2], "--pull");
        assert_eq!(build.last().unwrap(), "/ctx");

        assert_eq!(
            strings(engine.push_argv(&image())),
            vec!["push", "--quiet", "localhost:5000/airflow:8ab38a9b05d98966"]
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(DockerEngine::new(DockerEngineConfig::new("")).is_err());
    }
}
