//! Asset reference resolution.
//!
//! Classifies the images at the top level of a content directory as used or
//! unused, based on the references found in markup documents and style
//! sheets. Unused images can then be moved aside with [`relocate_unused`].

mod relocate;
mod scan;

pub use relocate::{Relocation, relocate_unused};
pub use scan::AssetResolver;

/// Used/unused split of the assets in one content directory.
///
/// Both lists hold file names as found on disk, sorted lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetReport {
    pub used: Vec<String>,
    pub unused: Vec<String>,
}

impl AssetReport {
    #[inline]
    pub fn total(&self) -> usize {
        self.used.len() + self.unused.len()
    }
}
