//! Text transform engine for markup documents.
//!
//! Each pass takes a document's text and returns a [`Rewrite`]: the
//! (possibly borrowed) output text and the number of changes made.
//! A pass that finds nothing to change returns the input untouched with
//! `count == 0`. All passes are idempotent.
//!
//! | Pass               | Module    | Effect                                      |
//! |--------------------|-----------|---------------------------------------------|
//! | `normalize-paths`  | `paths`   | `src="/a.jpg"` -> `src="a.jpg"`             |
//! | `inject-marker`    | `marker`  | vendor class token on the first `<body>`    |
//! | `strip-navigation` | `nav`     | drop internal nav block + its inline script |
//!
//! [`refs`] holds the asset reference scanner shared with the asset resolver.

pub mod marker;
pub mod nav;
pub mod paths;
pub mod refs;

use std::{
    borrow::Cow,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::utils::{fs::collect_files, path::has_extension};

/// Extensions of primary and secondary markup documents.
pub const MARKUP_EXTENSIONS: &[&str] = &["xhtml", "html", "htm"];

/// Check whether a path names a markup document.
#[inline]
pub fn is_markup(path: &Path) -> bool {
    has_extension(path, MARKUP_EXTENSIONS)
}

// ============================================================================
// Rewrite
// ============================================================================

/// Result of running one pass over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite<'a> {
    pub text: Cow<'a, str>,
    pub count: usize,
}

impl<'a> Rewrite<'a> {
    /// The pass found nothing to do.
    #[inline]
    pub fn unchanged(text: &'a str) -> Self {
        Self {
            text: Cow::Borrowed(text),
            count: 0,
        }
    }

    #[inline]
    pub fn changed(text: String, count: usize) -> Self {
        Self {
            text: Cow::Owned(text),
            count,
        }
    }

    #[inline]
    pub fn is_changed(&self) -> bool {
        self.count > 0
    }
}

// ============================================================================
// Pass
// ============================================================================

/// A named text rewriting pass, selectable per build variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pass {
    NormalizePaths,
    InjectMarker,
    StripNavigation,
}

impl Pass {
    /// Run this pass over `text`. `marker` is the vendor class token.
    pub fn apply<'a>(self, text: &'a str, marker: &str) -> Rewrite<'a> {
        match self {
            Self::NormalizePaths => paths::normalize_paths(text),
            Self::InjectMarker => marker::inject_marker(text, marker),
            Self::StripNavigation => nav::strip_navigation(text),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NormalizePaths => "normalize-paths",
            Self::InjectMarker => "inject-marker",
            Self::StripNavigation => "strip-navigation",
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run `passes` in order, threading the text through each one.
///
/// Returns the final text and the per-pass change counts.
pub fn apply_all<'a>(text: &'a str, passes: &[Pass], marker: &str) -> (Cow<'a, str>, Vec<usize>) {
    let mut current: Cow<'a, str> = Cow::Borrowed(text);
    let mut counts = Vec::with_capacity(passes.len());

    for pass in passes {
        let (next, count) = match &current {
            Cow::Borrowed(s) => {
                let rewrite = pass.apply(*s, marker);
                (rewrite.is_changed().then_some(rewrite.text), rewrite.count)
            }
            Cow::Owned(s) => {
                let rewrite = pass.apply(s, marker);
                let owned = rewrite
                    .is_changed()
                    .then(|| Cow::Owned(rewrite.text.into_owned()));
                (owned, rewrite.count)
            }
        };
        counts.push(count);
        if let Some(next) = next {
            current = next;
        }
    }

    (current, counts)
}

// ============================================================================
// Document rewriting on disk
// ============================================================================

/// Per-document outcome of rewriting a tree.
#[derive(Debug, Clone)]
pub struct DocumentChange {
    pub path: PathBuf,
    /// Change count per pass, in the order the passes ran.
    pub counts: Vec<usize>,
}

impl DocumentChange {
    pub fn is_changed(&self) -> bool {
        self.counts.iter().any(|c| *c > 0)
    }

    /// Change count for one pass, if it ran.
    pub fn count_for(&self, passes: &[Pass], pass: Pass) -> usize {
        passes
            .iter()
            .position(|p| *p == pass)
            .and_then(|i| self.counts.get(i).copied())
            .unwrap_or(0)
    }
}

/// Rewrite one document in place. The file is only written when changed.
pub fn rewrite_file(path: &Path, passes: &[Pass], marker: &str) -> io::Result<DocumentChange> {
    let text = fs::read_to_string(path)?;
    let (updated, counts) = apply_all(&text, passes, marker);

    if let Cow::Owned(updated) = &updated
        && updated != &text
    {
        fs::write(path, updated)?;
    }

    Ok(DocumentChange {
        path: path.to_path_buf(),
        counts,
    })
}

/// Rewrite every markup document under `dir` (sorted, recursive).
///
/// `skip` receives paths relative to `dir` and excludes them from the walk.
pub fn rewrite_tree<F>(
    dir: &Path,
    passes: &[Pass],
    marker: &str,
    skip: F,
) -> io::Result<Vec<DocumentChange>>
where
    F: Fn(&Path) -> bool,
{
    if passes.is_empty() || !dir.is_dir() {
        return Ok(Vec::new());
    }

    collect_files(dir, skip)?
        .into_iter()
        .filter(|p| is_markup(p))
        .map(|p| rewrite_file(&p, passes, marker))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: &str = "<html><body>\n<img src=\"/a.jpg\"/>\n</body></html>";

    #[test]
    fn test_pass_names_roundtrip_serde() {
        #[derive(Deserialize)]
        struct Holder {
            passes: Vec<Pass>,
        }
        let holder: Holder =
            toml::from_str(r#"passes = ["normalize-paths", "inject-marker", "strip-navigation"]"#)
                .unwrap();
        assert_eq!(
            holder.passes,
            vec![Pass::NormalizePaths, Pass::InjectMarker, Pass::StripNavigation]
        );
        assert_eq!(Pass::InjectMarker.to_string(), "inject-marker");
    }

    #[test]
    fn test_apply_all_threads_text() {
        let (out, counts) = apply_all(DOC, &[Pass::NormalizePaths, Pass::InjectMarker], "kdp-mode");
        assert_eq!(counts, vec![1, 1]);
        assert!(out.contains("src=\"a.jpg\""));
        assert!(out.contains("<body class=\"kdp-mode\">"));
    }

    #[test]
    fn test_apply_all_noop_borrows() {
        let text = "<p>no body here</p>";
        let (out, counts) = apply_all(text, &[Pass::NormalizePaths, Pass::StripNavigation], "m");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(counts, vec![0, 0]);
    }

    #[test]
    fn test_rewrite_tree_only_touches_markup() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("ch1.xhtml"), DOC).unwrap();
        fs::write(root.join("page.html"), "<body id=\"x\"></body>").unwrap();
        fs::write(root.join("style.css"), "body { src: \"/a.jpg\" }").unwrap();

        let changes = rewrite_tree(root, &[Pass::InjectMarker], "kdp-mode", |_| false).unwrap();

        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(DocumentChange::is_changed));
        assert_eq!(
            fs::read_to_string(root.join("page.html")).unwrap(),
            "<body class=\"kdp-mode\" id=\"x\"></body>"
        );
        assert_eq!(
            fs::read_to_string(root.join("style.css")).unwrap(),
            "body { src: \"/a.jpg\" }"
        );
    }

    #[test]
    fn test_rewrite_file_leaves_unchanged_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.xhtml");
        fs::write(&path, "<body class=\"kdp-mode\"></body>").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let change = rewrite_file(&path, &[Pass::InjectMarker], "kdp-mode").unwrap();

        assert!(!change.is_changed());
        assert_eq!(change.count_for(&[Pass::InjectMarker], Pass::InjectMarker), 0);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }
}
