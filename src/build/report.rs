//! Per-variant build summary.

use owo_colors::OwoColorize;

use super::{VariantBuild, VariantReport};
use crate::{
    config::ProjectConfig,
    log,
    logger::{status_error, status_success, status_warning},
    utils::{format_mb, plural_count, plural_s},
    validator::Verdict,
};

/// Lines of validator output shown for a failed verdict.
const DIAGNOSTIC_LINES: usize = 20;

/// Print one block per variant, then a totals line.
pub fn print_summary(reports: &[VariantReport], config: &ProjectConfig) {
    println!();
    for report in reports {
        match &report.result {
            Ok(build) => print_built(report, build, config),
            Err(err) => status_error(&format!("{}: build failed", report.name), &err.chain()),
        }
    }

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    let built = reports.len() - failed;
    if failed == 0 {
        log!("build"; "{} built", plural_count(built, "variant"));
    } else {
        log!("error"; "{} built, {} failed", built, failed);
    }
}

fn print_built(report: &VariantReport, build: &VariantBuild, config: &ProjectConfig) {
    status_success(&built_line(report, build));
    for path in &build.published {
        println!("      {} {}", "->".dimmed(), config.root_relative(path).display());
    }

    let Some(verdict) = &build.verdict else {
        return;
    };
    let line = format!("validator {verdict} for {}", report.file);
    if verdict.is_passed() {
        status_success(&line);
    } else {
        status_warning(&line);
    }

    if let Verdict::Failed { diagnostics, .. } = verdict {
        for excerpt in diagnostic_excerpt(diagnostics) {
            println!("      {}", excerpt.dimmed());
        }
    }
}

/// `standard: Book.epub (0.42 MB, 12 members, 3 of 9 documents rewritten)`
fn built_line(report: &VariantReport, build: &VariantBuild) -> String {
    let mut line = format!(
        "{}: {} ({}, {}",
        report.name,
        report.file,
        format_mb(build.archive.bytes),
        plural_count(build.archive.members, "member"),
    );
    if !build.transform.per_pass.is_empty() {
        line.push_str(&format!(
            ", {} of {} rewritten",
            build.transform.changed,
            plural_count(build.transform.documents, "document"),
        ));
    }
    line.push(')');
    line
}

/// Leading lines of validator output, with a marker when truncated.
fn diagnostic_excerpt(diagnostics: &str) -> Vec<String> {
    let lines: Vec<&str> = diagnostics.lines().filter(|l| !l.trim().is_empty()).collect();
    let mut excerpt: Vec<String> = lines
        .iter()
        .take(DIAGNOSTIC_LINES)
        .map(|l| l.to_string())
        .collect();
    if lines.len() > DIAGNOSTIC_LINES {
        let more = lines.len() - DIAGNOSTIC_LINES;
        excerpt.push(format!("... {more} more line{}", plural_s(more)));
    }
    excerpt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::ArchiveSummary;
    use crate::build::{BuildError, TransformTally};
    use crate::transform::Pass;
    use std::path::PathBuf;

    fn sample(per_pass: Vec<(Pass, usize)>) -> (VariantReport, VariantBuild) {
        let build = VariantBuild {
            transform: TransformTally {
                documents: 9,
                changed: 3,
                per_pass,
            },
            archive: ArchiveSummary {
                path: PathBuf::from("/tmp/Book.epub"),
                members: 12,
                bytes: 1024 * 1024,
            },
            published: vec![],
            verdict: None,
        };
        let report = VariantReport {
            name: "standard".into(),
            file: "Book.epub".into(),
            result: Err(BuildError::MissingSource(PathBuf::from("epub"))),
        };
        (report, build)
    }

    #[test]
    fn test_built_line() {
        let (report, build) = sample(vec![(Pass::NormalizePaths, 4)]);
        assert_eq!(
            built_line(&report, &build),
            "standard: Book.epub (1.00 MB, 12 members, 3 of 9 documents rewritten)"
        );

        let (report, build) = sample(vec![]);
        assert_eq!(
            built_line(&report, &build),
            "standard: Book.epub (1.00 MB, 12 members)"
        );
    }

    #[test]
    fn test_diagnostic_excerpt_truncates() {
        let text = (0..25).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n\n");
        let excerpt = diagnostic_excerpt(&text);
        assert_eq!(excerpt.len(), DIAGNOSTIC_LINES + 1);
        assert_eq!(excerpt[0], "line 0");
        assert_eq!(excerpt.last().unwrap(), "... 5 more lines");

        assert_eq!(diagnostic_excerpt("one\ntwo"), vec!["one", "two"]);
    }
}
