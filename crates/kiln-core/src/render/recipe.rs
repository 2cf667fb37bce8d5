use std::fmt::Write;

use kiln_model::BuildSpec;

use crate::render::RenderError;

/// Version of the recipe layout produced by [`render`].
///
/// Bump whenever the emitted text changes for an unchanged spec.
pub const RECIPE_TEMPLATE_VERSION: u32 = 1;

/// Repository of the upstream base image.
pub const BASE_REPOSITORY: &str = "apache/airflow";

/// File name of the recipe inside a build context.
pub const RECIPE_FILE: &str = "Dockerfile";

/// File name of the custom configuration inside a build context.
pub const AIRFLOW_CFG_FILE: &str = "airflow.cfg";

/// Auxiliary file that must sit next to the recipe in the build context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextAsset {
    /// File name relative to the context root.
    pub name: &'static str,
    pub contents: String,
}

/// Rendered build recipe plus the files it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    text: String,
    assets: Vec<ContextAsset>,
}

impl Recipe {
    /// Dockerfile text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn assets(&self) -> &[ContextAsset] {
        &self.assets
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

/// Render the recipe for a spec.
///
/// Layout:
/// 1. `FROM apache/airflow:<airflow_version>-python<python_version>`
/// 2. apt step listing `apt_deps` (always present, possibly with no packages)
/// 3. pip step installing `apache-airflow[<extras>]==<airflow_version>` followed by `pip_deps`
/// 4. optional `COPY airflow.cfg` when `airflow_cfg` is set
/// 5. `CMD ["airflow"]`
///
/// `base_image` is not consulted.
pub fn render(spec: &BuildSpec) -> Result<Recipe, RenderError> {
    let mut text = String::with_capacity(768);
    write_recipe(&mut text, spec).map_err(|source| RenderError::Format {
        version: RECIPE_TEMPLATE_VERSION,
        source,
    })?;

    let assets = spec
        .airflow_cfg()
        .map(|cfg| ContextAsset {
            name: AIRFLOW_CFG_FILE,
            contents: cfg.to_string(),
        })
        .into_iter()
        .collect();

    Ok(Recipe { text, assets })
}

fn write_recipe(out: &mut impl Write, spec: &BuildSpec) -> std::fmt::Result {
    let airflow = &spec.airflow_version;

    writeln!(
        out,
        "FROM {BASE_REPOSITORY}:{airflow}-python{}",
        spec.python_version
    )?;
    writeln!(out)?;
    writeln!(out, "USER root")?;
    writeln!(out)?;
    writeln!(out, "# Install apt dependencies")?;
    writeln!(
        out,
        "RUN apt-get update && apt-get install -y --no-install-recommends {} && \\",
        spec.apt_deps.join(" ")
    )?;
    writeln!(out, "    apt-get autoremove -yqq --purge && \\")?;
    writeln!(out, "    apt-get clean && \\")?;
    writeln!(out, "    rm -rf /var/lib/apt/lists/*")?;
    writeln!(out)?;
    writeln!(out, "USER airflow")?;
    writeln!(out)?;
    writeln!(out, "# Install Airflow with extras and additional pip dependencies")?;
    writeln!(
        out,
        "RUN pip install --no-cache-dir \"apache-airflow[{}]=={airflow}\" {}",
        spec.extras.join(","),
        spec.pip_deps.join(" ")
    )?;
    writeln!(out)?;

    if spec.airflow_cfg().is_some() {
        writeln!(out, "# Copy custom airflow.cfg")?;
        writeln!(out, "COPY {AIRFLOW_CFG_FILE} /opt/airflow/{AIRFLOW_CFG_FILE}")?;
        writeln!(out)?;
    }

    writeln!(out, "CMD [\"airflow\"]")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> BuildSpec {
        BuildSpec {
            airflow_version: "2.9.0".into(),
            python_version: "3.11".into(),
            base_image: None,
            extras: vec!["postgres".into(), "celery".into()],
            apt_deps: vec!["git".into()],
            pip_deps: vec!["requests".into()],
            airflow_cfg: None,
        }
    }

    fn line_starting<'a>(text: &'a str, prefix: &str) -> &'a str {
        text.lines()
            .find(|l| l.starts_with(prefix))
            .unwrap_or_else(|| panic!("no line starting with {prefix:?} in:\n{text}"))
    }

    /// Arguments of the apt install step, in order.
    fn apt_args(text: &str) -> Vec<&str> {
        let line = line_starting(text, "RUN apt-get update");
        let (_, rest) = line
            .split_once("--no-install-recommends ")
            .expect("apt flags");
        let (args, _) = rest.rsplit_once(" && \\").expect("apt continuation");
        args.split_whitespace().collect()
    }

    #[test]
    fn renders_reference_example() {
        let recipe = render(&spec()).unwrap();
        let text = recipe.text();

        assert!(text.starts_with("FROM apache/airflow:2.9.0-python3.11\n"));
        assert_eq!(apt_args(text), vec!["git"]);
        assert_eq!(
            line_starting(text, "RUN pip install"),
            "RUN pip install --no-cache-dir \"apache-airflow[postgres,celery]==2.9.0\" requests"
        );
        assert!(text.ends_with("CMD [\"airflow\"]\n"));
        assert!(recipe.assets().is_empty());
    }

    #[test]
    fn apt_step_lists_every_package_in_order() {
        let mut s = spec();
        s.apt_deps = vec![
            "libpq-dev".into(),
            "git".into(),
            "build-essential".into(),
            "curl".into(),
        ];
        let recipe = render(&s).unwrap();
        assert_eq!(
            apt_args(recipe.text()),
            vec!["libpq-dev", "git", "build-essential", "curl"]
        );
    }

    #[test]
    fn empty_sequences_keep_their_steps() {
        let mut s = spec();
        s.extras.clear();
        s.apt_deps.clear();
        s.pip_deps.clear();

        let recipe = render(&s).unwrap();
        let text = recipe.text();

        assert!(apt_args(text).is_empty());
        assert_eq!(
            line_starting(text, "RUN apt-get update"),
            "RUN apt-get update && apt-get install -y --no-install-recommends  && \\"
        );
        assert_eq!(
            line_starting(text, "RUN pip install").trim_end(),
            "RUN pip install --no-cache-dir \"apache-airflow[]==2.9.0\""
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render(&spec()).unwrap();
        let b = render(&spec()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn base_image_does_not_change_the_recipe() {
        let mut s = spec();
        s.base_image = Some("slim".into());
        assert_eq!(render(&s).unwrap().text(), render(&spec()).unwrap().text());
    }

    #[test]
    fn airflow_cfg_adds_copy_step_and_asset() {
        let mut s = spec();
        s.airflow_cfg = Some("[core]\nload_examples = False\n".into());

        let recipe = render(&s).unwrap();
        let text = recipe.text();

        let copy = text.find("COPY airflow.cfg /opt/airflow/airflow.cfg").expect("copy step");
        let cmd = text.find("CMD [\"airflow\"]").unwrap();
        assert!(copy < cmd);

        assert_eq!(
            recipe.assets(),
            &[ContextAsset {
                name: AIRFLOW_CFG_FILE,
                contents: "[core]\nload_examples = False\n".into(),
            }]
        );
    }

    #[test]
    fn blank_airflow_cfg_is_ignored() {
        let mut s = spec();
        s.airflow_cfg = Some("\n  \n".into());
        let recipe = render(&s).unwrap();
        assert!(!recipe.text().contains("COPY"));
        assert!(recipe.assets().is_empty());
    }
}
