//! Asset inventory and reference scanning (read-only).

use std::{
    collections::{BTreeMap, BTreeSet},
    fs, io,
    path::Path,
};

use crate::transform::{is_markup, paths::STYLE_EXTENSIONS, refs::ReferenceScanner};
use crate::utils::{fs::collect_files, path::has_extension};

use super::AssetReport;

/// Inventory and reference scanner for one extension set.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    scanner: ReferenceScanner,
    extensions: Vec<String>,
    exempt: BTreeSet<String>,
    unused_dir: String,
}

impl AssetResolver {
    /// - `extensions`: asset extensions to inventory and match references against
    /// - `exempt`: names always classified as used (case-insensitive)
    /// - `unused_dir`: relocation target, excluded from scanning
    pub fn new(
        extensions: &[impl AsRef<str>],
        exempt: &[impl AsRef<str>],
        unused_dir: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            scanner: ReferenceScanner::new(extensions)?,
            extensions: extensions.iter().map(|e| e.as_ref().to_string()).collect(),
            exempt: exempt.iter().map(|e| e.as_ref().to_lowercase()).collect(),
            unused_dir: unused_dir.to_string(),
        })
    }

    /// Assets at the top level of `content_dir`, keyed by lowercase name.
    ///
    /// Values are the names as found on disk. Subdirectories are not entered.
    pub fn inventory(&self, content_dir: &Path) -> io::Result<BTreeMap<String, String>> {
        let mut assets = BTreeMap::new();

        for entry in fs::read_dir(content_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if !has_extension(&path, self.extensions.as_slice()) {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                assets.insert(name.to_lowercase(), name.to_string());
            }
        }

        Ok(assets)
    }

    /// Lookup keys of every asset referenced from markup or style sheets
    /// anywhere under `content_dir`.
    pub fn references(&self, content_dir: &Path) -> io::Result<BTreeSet<String>> {
        let files = collect_files(content_dir, |rel| rel.starts_with(&self.unused_dir))?;
        let mut keys = BTreeSet::new();

        for path in files {
            if !is_markup(&path) && !has_extension(&path, STYLE_EXTENSIONS) {
                continue;
            }
            let bytes = fs::read(&path)?;
            keys.extend(self.scanner.keys(&String::from_utf8_lossy(&bytes)));
        }

        Ok(keys)
    }

    /// Inventory, scan and classify in one step.
    pub fn resolve(&self, content_dir: &Path) -> io::Result<AssetReport> {
        let assets = self.inventory(content_dir)?;
        let references = self.references(content_dir)?;
        Ok(classify(&assets, &references, &self.exempt))
    }
}

/// Split `assets` into used and unused.
///
/// An asset is used when its lowercase name is referenced or exempt.
pub fn classify(
    assets: &BTreeMap<String, String>,
    references: &BTreeSet<String>,
    exempt: &BTreeSet<String>,
) -> AssetReport {
    let mut report = AssetReport::default();

    for (key, name) in assets {
        if references.contains(key) || exempt.contains(key) {
            report.used.push(name.clone());
        } else {
            report.unused.push(name.clone());
        }
    }

    report.used.sort();
    report.unused.sort();
    report
}
