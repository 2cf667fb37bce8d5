//! Per-request build contexts.
//!
//! Every pipeline run gets its own directory under the configured work dir,
//! so concurrent requests never share a recipe slot. The directory is removed
//! when the [`BuildContext`] is dropped.
use std::{
    io,
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use tracing::debug;

use crate::render::{RECIPE_FILE, Recipe};

/// Creates isolated build contexts under a root directory.
#[derive(Debug, Clone)]
pub struct ContextStore {
    root: PathBuf,
}

impl ContextStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write the recipe and its assets into a fresh context directory.
    pub async fn persist(&self, recipe: &Recipe) -> io::Result<BuildContext> {
        tokio::fs::create_dir_all(&self.root).await?;

        let dir = tempfile::Builder::new()
            .prefix("kiln-")
            .tempdir_in(&self.root)?;

        let recipe_path = dir.path().join(RECIPE_FILE);
        tokio::fs::write(&recipe_path, recipe.text()).await?;

        for asset in recipe.assets() {
            tokio::fs::write(dir.path().join(asset.name), &asset.contents).await?;
        }

        debug!(
            context = %dir.path().display(),
            assets = recipe.assets().len(),
            "build context written"
        );
        Ok(BuildContext { dir, recipe_path })
    }
}

/// Directory handed to the build engine.
///
/// Owns its directory: dropping the value deletes it.
#[derive(Debug)]
pub struct BuildContext {
    dir: TempDir,
    recipe_path: PathBuf,
}

impl BuildContext {
    /// Context root passed to the build engine.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Location of the recipe inside the context.
    pub fn recipe_path(&self) -> &Path {
        &self.recipe_path
    }
}
