//! Packaging error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while assembling or verifying an archive.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("missing `mimetype` descriptor at `{0}`")]
    MissingDescriptor(PathBuf),

    #[error("`{path}` must contain `application/epub+zip`, found {found:?}")]
    InvalidDescriptor { path: PathBuf, found: String },

    #[error("IO error at `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("archive error")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed archive `{path}`: {reason}")]
    Malformed { path: PathBuf, reason: String },
}

impl PackageError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Attach a path to an `io::Result`.
pub trait IoContext<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T, PackageError>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, path: impl Into<PathBuf>) -> Result<T, PackageError> {
        self.map_err(|e| PackageError::io(path, e))
    }
}
