//! `bindery assets`: report, and optionally relocate, unused images.

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;

use crate::{
    asset::{AssetReport, Relocation, relocate_unused},
    config::ProjectConfig,
    debug, log,
    utils::plural_count,
};

/// List used and unused images, then move the unused ones if `relocate`.
///
/// The listing is always printed before anything is moved.
pub fn assets(relocate: bool, config: &ProjectConfig) -> Result<()> {
    let content = config.package.content_path();
    if !content.is_dir() {
        bail!("content directory `{}` not found", content.display());
    }

    let resolver = config
        .assets
        .resolver()
        .context("invalid `assets.image_extensions`")?;
    let report = resolver
        .resolve(&content)
        .with_context(|| format!("failed to scan `{}`", content.display()))?;

    print_report(&report);

    if !relocate || report.unused.is_empty() {
        return Ok(());
    }

    let moves = relocate_unused(&content, &config.assets.unused_dir, &report.unused)
        .with_context(|| format!("failed to relocate into `{}`", config.assets.unused_dir))?;

    for result in &moves {
        match result {
            Relocation::Moved { to, .. } => {
                debug!("assets"; "moved {}", config.root_relative(to).display());
            }
            Relocation::Missing(from) => {
                debug!("assets"; "already gone: {}", config.root_relative(from).display());
            }
        }
    }
    let moved = moves.iter().filter(|r| r.is_moved()).count();
    log!("assets"; "moved {} into {}", plural_count(moved, "image"), config.assets.unused_dir);

    Ok(())
}

fn print_report(report: &AssetReport) {
    debug!("assets"; "{} found", plural_count(report.total(), "image"));
    log!("assets"; "{} used", plural_count(report.used.len(), "image"));
    for name in &report.used {
        println!("  {name}");
    }

    log!("assets"; "{} unused", plural_count(report.unused.len(), "image"));
    for name in &report.unused {
        println!("  {}", name.yellow());
    }
}
