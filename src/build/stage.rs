//! Isolated staging copies of the package tree.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::BuildError;
use crate::utils::fs::copy_tree;

/// A private copy of the package tree for one variant.
///
/// Every staging area is a fresh temporary directory, so two variants never
/// share one. The directory is removed when the value is dropped, whether
/// or not the build succeeded.
#[derive(Debug)]
pub struct Staging {
    dir: TempDir,
    tree: PathBuf,
}

impl Staging {
    /// Clone `source` into a new staging area named after `variant`.
    pub fn new(variant: &str, source: &Path) -> Result<Self, BuildError> {
        if !source.is_dir() {
            return Err(BuildError::MissingSource(source.to_path_buf()));
        }

        let dir = tempfile::Builder::new()
            .prefix(&format!("bindery-{variant}-"))
            .tempdir()
            .map_err(|source| BuildError::Stage {
                path: std::env::temp_dir(),
                source,
            })?;

        let tree = dir.path().join("package");
        copy_tree(source, &tree).map_err(|e| BuildError::Stage {
            path: source.to_path_buf(),
            source: e,
        })?;

        Ok(Self { dir, tree })
    }

    /// Root of the staged package tree.
    pub fn tree(&self) -> &Path {
        &self.tree
    }

    /// Staging directory; scratch files placed here are removed with it.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
