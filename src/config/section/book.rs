//! `[book]` section configuration.
//!
//! ```toml
//! [book]
//! title = "Liberating-Humanity"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Book metadata used for naming outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Substituted for `{title}` in variant file names.
    pub title: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            title: "book".into(),
        }
    }
}

impl BookConfig {
    pub const TITLE: FieldPath = FieldPath::new("book.title");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.title.trim().is_empty() {
            diag.error(Self::TITLE, "must not be empty");
        } else if self.title.contains(['/', '\\']) {
            diag.error_with_hint(
                Self::TITLE,
                "must not contain path separators",
                "the title becomes part of the archive file name",
            );
        }
    }
}
