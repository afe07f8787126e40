//! `bindery build`.

use anyhow::Result;

use crate::{
    build::{VariantReport, build_variants, print_summary},
    cli::BuildArgs,
    config::ProjectConfig,
    debug,
};

/// Build the selected variants and print the summary.
///
/// Returns `false` when at least one variant failed to build. Validator
/// verdicts never affect the result.
pub fn build(args: &BuildArgs, config: &ProjectConfig) -> Result<bool> {
    let variants = config.select_variants(&args.variants)?;
    debug!("build"; "source {}", config.package.source.display());

    let reports = build_variants(config, &variants);
    print_summary(&reports, config);

    Ok(reports.iter().all(VariantReport::is_ok))
}
