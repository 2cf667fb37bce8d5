use std::fmt;

use serde::{Serialize, Serializer};

use crate::BuildTag;

/// Fully qualified image reference: `<registry>/<name>:<tag>`.
///
/// This is the label handed to the build engine and later pushed to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    registry: String,
    name: String,
    tag: BuildTag,
}

impl ImageRef {
    pub fn new(registry: impl Into<String>, name: impl Into<String>, tag: BuildTag) -> Self {
        Self {
            registry: registry.into(),
            name: name.into(),
            tag,
        }
    }

    pub fn registry(&self) -> &str {
        &self.registry
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tag(&self) -> &BuildTag {
        &self.tag
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.registry, self.name, self.tag)
    }
}

impl Serialize for ImageRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
