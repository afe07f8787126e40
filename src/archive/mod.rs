//! EPUB container assembly.
//!
//! Member layout of every archive written here:
//!
//! ```text
//! mimetype                 stored, always first
//! META-INF/container.xml   deflated
//! OEBPS/...                deflated, sorted by relative path
//! ```
//!
//! Members carry a fixed timestamp so identical trees give identical
//! member listings and headers.

mod error;
mod inspect;
mod writer;

use std::path::{Component, Path};

pub use error::{IoContext, PackageError};
pub use inspect::{list_members, verify_archive};
pub use writer::{ArchiveSummary, assemble};

use crate::utils::path::has_extension;

/// Name of the descriptor member.
pub const MIMETYPE_NAME: &str = "mimetype";
/// Exact content of the descriptor member.
pub const MIMETYPE: &str = "application/epub+zip";

/// Members left out of an archive.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    /// File extensions, without the dot (`py`, `pyc`).
    pub extensions: Vec<String>,
    /// Directory names excluded at any depth (`__pycache__`).
    pub dirs: Vec<String>,
}

impl Exclusions {
    /// Check a path relative to the package root.
    pub fn is_excluded(&self, rel: &Path) -> bool {
        if has_extension(rel, self.extensions.as_slice()) {
            return true;
        }

        let mut components = rel.components().collect::<Vec<_>>();
        components.pop();
        components.iter().any(|c| match c {
            Component::Normal(name) => self
                .dirs
                .iter()
                .any(|d| name.to_str().is_some_and(|n| n == d)),
            _ => false,
        })
    }
}
