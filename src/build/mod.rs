//! Build orchestration.
//!
//! Each variant goes through the same phases, one variant at a time:
//! - **Stage** - clone the package tree into a private temporary directory
//! - **Transform** - run the variant's passes over every staged markup file
//! - **Assemble** - pack the staged tree and re-check the archive invariants
//! - **Publish** - copy the archive into every output location
//! - **Validate** - run the external validator (advisory)
//!
//! The staging directory is removed before the next variant starts.

mod error;
mod publish;
mod report;
mod stage;

pub use error::BuildError;
pub use publish::publish;
pub use report::print_summary;
pub use stage::Staging;

use std::path::PathBuf;

use crate::{
    archive::{ArchiveSummary, assemble, verify_archive},
    config::{ProjectConfig, VariantConfig},
    debug, log,
    transform::{DocumentChange, Pass, rewrite_tree},
    validator::Verdict,
};

/// Outcome of one variant.
#[derive(Debug)]
pub struct VariantReport {
    pub name: String,
    /// Archive file name.
    pub file: String,
    pub result: Result<VariantBuild, BuildError>,
}

impl VariantReport {
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A variant that built successfully.
#[derive(Debug)]
pub struct VariantBuild {
    pub transform: TransformTally,
    pub archive: ArchiveSummary,
    /// Published copies, in output location order.
    pub published: Vec<PathBuf>,
    /// `None` when validation is disabled.
    pub verdict: Option<Verdict>,
}

/// Markup rewrite totals for one variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformTally {
    /// Markup documents visited.
    pub documents: usize,
    /// Documents whose text changed.
    pub changed: usize,
    /// Summed change counts, per pass.
    pub per_pass: Vec<(Pass, usize)>,
}

impl TransformTally {
    pub fn from_changes(passes: &[Pass], changes: &[DocumentChange]) -> Self {
        Self {
            documents: changes.len(),
            changed: changes.iter().filter(|c| c.is_changed()).count(),
            per_pass: passes
                .iter()
                .map(|&pass| {
                    let total = changes.iter().map(|c| c.count_for(passes, pass)).sum();
                    (pass, total)
                })
                .collect(),
        }
    }
}

/// Build `variants` in order. A failed variant does not stop the rest.
pub fn build_variants(config: &ProjectConfig, variants: &[&VariantConfig]) -> Vec<VariantReport> {
    variants
        .iter()
        .map(|variant| {
            let file = variant.file_name(&config.book.title);
            log!("build"; "{} -> {}", variant.name, file);
            VariantReport {
                name: variant.name.clone(),
                result: build_variant(config, variant, &file),
                file,
            }
        })
        .collect()
}

/// Build a single variant into an archive named `file`.
pub fn build_variant(
    config: &ProjectConfig,
    variant: &VariantConfig,
    file: &str,
) -> Result<VariantBuild, BuildError> {
    let staging = Staging::new(&variant.name, &config.package.source)?;
    debug!("stage"; "{}", staging.path().display());

    if !config.package.container_in(staging.tree()).is_file() {
        return Err(BuildError::MissingContainer(
            config.package.container_in(&config.package.source),
        ));
    }

    let exclusions = config.exclusions();
    let content = config.package.content_in(staging.tree());
    let changes = rewrite_tree(
        &content,
        &variant.passes,
        &config.transform.marker,
        |rel| exclusions.is_excluded(rel),
    )
    .map_err(|source| BuildError::Transform {
        path: config.package.content_path(),
        source,
    })?;

    for change in changes.iter().filter(|c| c.is_changed()) {
        let rel = change.path.strip_prefix(&content).unwrap_or(&change.path);
        debug!("transform"; "{} {:?}", rel.display(), change.counts);
    }

    let archive = assemble(staging.tree(), &staging.path().join(file), &exclusions)?;
    verify_archive(&archive.path)?;

    let published = publish(&archive.path, file, &config.output.locations)?;

    let verdict = config.validator.validator(config.get_root()).map(|validator| {
        let target = published.first().unwrap_or(&archive.path);
        validator.validate(target)
    });

    Ok(VariantBuild {
        transform: TransformTally::from_changes(&variant.passes, &changes),
        archive,
        published,
        verdict,
    })
}
