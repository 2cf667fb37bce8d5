use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ModelError, ModelResult};

/// Characters that are never accepted inside a version or package entry.
///
/// Entries are substituted verbatim into shell lines of the recipe,
/// so anything the shell would interpret is rejected up front.
const SHELL_META: &[char] = &[
    '"', '\'', '`', '$', ';', '&', '|', '<', '>', '(', ')', '{', '}', '*', '?', '!', '#', '\\',
];

/// Extras are joined inside `apache-airflow[...]`, so the list syntax is off limits too.
const EXTRAS_META: &[char] = &['[', ']', ','];

/// Declarative description of the image a caller wants built.
///
/// Field declaration order is the canonical encoding order used for tag
/// computation; sequences are kept exactly as received.
///
/// The value is never mutated once decoded: the pipeline only ever borrows it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSpec {
    /// Airflow release, e.g. `"2.9.0"`. Used for the base image and the pip pin.
    pub airflow_version: String,
    /// Python release, e.g. `"3.11"`.
    pub python_version: String,
    /// Alternate base image reference.
    ///
    /// Accepted and hashed into the tag, but not substituted into the recipe.
    /// Absent and empty values share the same canonical encoding (`""`).
    #[serde(default, serialize_with = "empty_if_none")]
    pub base_image: Option<String>,
    /// Airflow extras enabled on the `apache-airflow` install.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub extras: Vec<String>,
    /// OS packages installed with apt.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub apt_deps: Vec<String>,
    /// Additional pip requirements installed next to airflow.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pip_deps: Vec<String>,
    /// Custom `airflow.cfg` contents copied into the image.
    ///
    /// Left out of the canonical encoding when blank, so specs without it keep
    /// the same tag they would have had before the field existed.
    #[serde(default, skip_serializing_if = "is_blank")]
    pub airflow_cfg: Option<String>,
}

impl BuildSpec {
    /// Decode a JSON payload and validate it.
    pub fn from_json_slice(payload: &[u8]) -> ModelResult<Self> {
        let spec: BuildSpec = serde_json::from_slice(payload)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Validate the form of every field.
    ///
    /// Rules:
    /// - `airflow_version` and `python_version` are not blank.
    /// - no entry is empty, contains whitespace, control characters or shell metacharacters.
    /// - extras additionally contain no `[`, `]` or `,`.
    ///
    /// Package existence is not checked.
    pub fn validate(&self) -> ModelResult<()> {
        if self.airflow_version.trim().is_empty() {
            return Err(ModelError::MissingField("airflow_version"));
        }
        if self.python_version.trim().is_empty() {
            return Err(ModelError::MissingField("python_version"));
        }
        check_entry("airflow_version", &self.airflow_version, &[])?;
        check_entry("python_version", &self.python_version, &[])?;

        for extra in &self.extras {
            check_entry("extras", extra, EXTRAS_META)?;
        }
        for dep in &self.apt_deps {
            check_entry("apt_deps", dep, &[])?;
        }
        for dep in &self.pip_deps {
            check_entry("pip_deps", dep, &[])?;
        }
        Ok(())
    }

    /// Base image override, if one was given and is not blank.
    pub fn base_image(&self) -> Option<&str> {
        non_blank(&self.base_image)
    }

    /// Custom airflow configuration, if one was given and is not blank.
    pub fn airflow_cfg(&self) -> Option<&str> {
        non_blank(&self.airflow_cfg)
    }
}

fn check_entry(field: &'static str, value: &str, extra: &[char]) -> ModelResult<()> {
    let reason = if value.is_empty() {
        Some("entry is empty")
    } else if value.chars().any(char::is_whitespace) {
        Some("entry contains whitespace")
    } else if value.chars().any(char::is_control) {
        Some("entry contains control characters")
    } else if value.contains(SHELL_META) {
        Some("entry contains shell metacharacters")
    } else if value.contains(extra) {
        Some("entry contains list syntax")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ModelError::InvalidEntry {
            field,
            value: value.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

fn non_blank(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

fn is_blank(v: &Option<String>) -> bool {
    non_blank(v).is_none()
}

fn empty_if_none<S>(v: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(v.as_deref().unwrap_or(""))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
