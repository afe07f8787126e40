//! Per-variant build errors.

use std::{error::Error as _, io, path::PathBuf};
use thiserror::Error;

use crate::archive::PackageError;

/// Why a single variant failed to build.
///
/// A failed variant never stops the remaining ones.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("source tree `{0}` not found")]
    MissingSource(PathBuf),

    #[error("container descriptor `{0}` not found")]
    MissingContainer(PathBuf),

    #[error("failed to stage `{path}`")]
    Stage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to rewrite markup under `{path}`")]
    Transform {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("packaging failed")]
    Package(#[from] PackageError),

    #[error("failed to publish `{path}`")]
    Publish {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// The full cause chain, one cause per line.
    pub fn chain(&self) -> String {
        let mut lines = vec![self.to_string()];
        let mut source = self.source();
        while let Some(err) = source {
            lines.push(format!("caused by: {err}"));
            source = err.source();
        }
        lines.join("\n")
    }
}
