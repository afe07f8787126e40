//! `bindery strip-nav`: remove the internal navigation block in place.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::{
    cli::common::collect_markup_files,
    config::ProjectConfig,
    log,
    transform::{Pass, rewrite_file},
};

/// Strip navigation from `paths` (default: the source content directory).
///
/// Returns the number of documents changed.
pub fn strip_nav(paths: &[PathBuf], config: &ProjectConfig) -> Result<usize> {
    let files = collect_markup_files(paths, &config.package.content_path())?;
    let mut stripped = 0;

    for file in &files {
        let change = rewrite_file(file, &[Pass::StripNavigation], &config.transform.marker)
            .with_context(|| format!("failed to rewrite `{}`", file.display()))?;

        let rel = config.root_relative(file);
        if change.is_changed() {
            stripped += 1;
            log!("nav"; "removed: {}", rel.display());
        } else {
            log!("nav"; "no navigation found: {}", rel.display());
        }
    }

    log!("nav"; "stripped {} of {} documents", stripped, files.len());
    Ok(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;
    use tempfile::TempDir;

    const WITH_NAV: &str = "<body>\n<p>text</p>\n<nav class=\"navigation\">\n<a href=\"ch2.xhtml\">Next</a>\n</nav>\n<script type=\"text/javascript\">go();</script>\n\n\n</body>";

    #[test]
    fn test_strip_nav_counts_changed_documents() {
        let dir = TempDir::new().unwrap();
        let content = dir.path().join("epub/OEBPS");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("a.xhtml"), WITH_NAV).unwrap();
        fs::write(content.join("b.xhtml"), "<body><p>plain</p></body>").unwrap();

        let mut config = test_parse_config("");
        config.resolve_paths(dir.path());

        assert_eq!(strip_nav(&[], &config).unwrap(), 1);
        let a = fs::read_to_string(content.join("a.xhtml")).unwrap();
        assert_eq!(a, "<body>\n<p>text</p>\n</body>");
        assert_eq!(
            fs::read_to_string(content.join("b.xhtml")).unwrap(),
            "<body><p>plain</p></body>"
        );

        // Idempotent on a second run
        assert_eq!(strip_nav(&[], &config).unwrap(), 0);
    }
}
