//! `[package]` section configuration.
//!
//! ```toml
//! [package]
//! source = "epub"                     # package tree root
//! content_dir = "OEBPS"               # under source
//! container_dir = "META-INF"          # under source
//! exclude_extensions = ["py", "pyc"]  # never archived
//! exclude_dirs = ["__pycache__", "unused_images"]
//! ```

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::archive::Exclusions;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Package tree layout and archive exclusions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Package tree root. Resolved against the project root on load.
    pub source: PathBuf,
    pub content_dir: PathBuf,
    pub container_dir: PathBuf,
    pub exclude_extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            source: "epub".into(),
            content_dir: "OEBPS".into(),
            container_dir: "META-INF".into(),
            exclude_extensions: vec!["py".into(), "pyc".into()],
            exclude_dirs: vec!["__pycache__".into(), "unused_images".into()],
        }
    }
}

impl PackageConfig {
    pub const CONTENT_DIR: FieldPath = FieldPath::new("package.content_dir");
    pub const CONTAINER_DIR: FieldPath = FieldPath::new("package.container_dir");

    /// Content directory inside the package tree at `root`.
    pub fn content_in(&self, root: &Path) -> PathBuf {
        root.join(&self.content_dir)
    }

    /// Content directory of the source tree.
    pub fn content_path(&self) -> PathBuf {
        self.content_in(&self.source)
    }

    /// `container.xml` inside the package tree at `root`.
    pub fn container_in(&self, root: &Path) -> PathBuf {
        root.join(&self.container_dir).join("container.xml")
    }

    pub fn exclusions(&self) -> Exclusions {
        Exclusions {
            extensions: self
                .exclude_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            dirs: self.exclude_dirs.clone(),
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, path) in [
            (Self::CONTENT_DIR, &self.content_dir),
            (Self::CONTAINER_DIR, &self.container_dir),
        ] {
            if !is_inner_relative(path) {
                diag.error(field, "must be a relative path inside `package.source`");
            }
        }
    }
}

/// Non-empty relative path made only of normal components.
fn is_inner_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)))
}
