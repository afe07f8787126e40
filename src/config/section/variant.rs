//! `[[variants]]` configuration.
//!
//! Each variant names the archive it produces and the transform passes run
//! over the staged markup before packaging:
//!
//! ```toml
//! [[variants]]
//! name = "standard"
//! file = "{title}.epub"
//! passes = ["normalize-paths"]
//!
//! [[variants]]
//! name = "kdp"
//! file = "{title}-KDP.epub"
//! passes = ["normalize-paths", "inject-marker"]
//! ```
//!
//! Without any `[[variants]]` table the two above are used.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::transform::Pass;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub name: String,
    /// Archive file name; `{title}` expands to `book.title`.
    pub file: String,
    #[serde(default)]
    pub passes: Vec<Pass>,
}

impl VariantConfig {
    pub fn new(name: &str, file: &str, passes: &[Pass]) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            passes: passes.to_vec(),
        }
    }

    /// Archive file name for a book titled `title`.
    pub fn file_name(&self, title: &str) -> String {
        self.file.replace("{title}", title)
    }
}

/// The standard and vendor-mode variants.
pub fn default_variants() -> Vec<VariantConfig> {
    vec![
        VariantConfig::new("standard", "{title}.epub", &[Pass::NormalizePaths]),
        VariantConfig::new(
            "kdp",
            "{title}-KDP.epub",
            &[Pass::NormalizePaths, Pass::InjectMarker],
        ),
    ]
}

/// Validate a variant list against the book title.
pub fn validate_variants(variants: &[VariantConfig], title: &str, diag: &mut ConfigDiagnostics) {
    if variants.is_empty() {
        diag.error(FieldPath::new("variants"), "at least one variant is required");
        return;
    }

    let mut names = HashSet::new();
    let mut files = HashSet::new();

    for (i, variant) in variants.iter().enumerate() {
        let name = variant.name.trim();
        if name.is_empty() {
            diag.error(FieldPath::indexed("variants", i, "name"), "must not be empty");
        } else if !names.insert(name) {
            diag.error(
                FieldPath::indexed("variants", i, "name"),
                format!("duplicate variant name `{name}`"),
            );
        }

        let file = variant.file_name(title);
        if !file.to_ascii_lowercase().ends_with(".epub") {
            diag.error_with_hint(
                FieldPath::indexed("variants", i, "file"),
                format!("`{file}` must end in `.epub`"),
                "e.g. `{title}.epub`",
            );
        } else if file.contains(['/', '\\']) {
            diag.error(
                FieldPath::indexed("variants", i, "file"),
                format!("`{file}` must be a plain file name"),
            );
        } else if !files.insert(file.clone()) {
            diag.error(
                FieldPath::indexed("variants", i, "file"),
                format!("`{file}` is produced by more than one variant"),
            );
        }

        let mut seen = HashSet::new();
        if variant.passes.iter().any(|p| !seen.insert(*p)) {
            diag.warn(
                FieldPath::indexed("variants", i, "passes"),
                "a pass is listed more than once",
            );
        }
    }
}
