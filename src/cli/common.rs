//! Common utilities shared across CLI commands.

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::transform::is_markup;
use crate::utils::fs::collect_files;

/// Collect markup documents based on CLI paths
///
/// - no paths: every markup document under `content_dir`
/// - `-`: paths read from stdin, one per line, in place of the `-`
/// - a directory: every markup document under it
/// - a file: taken as given
pub fn collect_markup_files(paths: &[PathBuf], content_dir: &Path) -> Result<Vec<PathBuf>> {
    let paths = expand_stdin(paths, read_paths_from_stdin)?;
    markup_in(paths, content_dir)
}

/// Replace every `-` with the paths `read_stdin` yields. Stdin is read once.
fn expand_stdin(
    paths: &[PathBuf],
    read_stdin: impl FnOnce() -> Result<Vec<PathBuf>>,
) -> Result<Vec<PathBuf>> {
    let mut read_stdin = Some(read_stdin);
    let mut expanded = Vec::with_capacity(paths.len());
    for path in paths {
        if path.as_os_str() != "-" {
            expanded.push(path.clone());
        } else if let Some(read) = read_stdin.take() {
            expanded.extend(read()?);
        }
    }
    Ok(expanded)
}

fn markup_in(paths: Vec<PathBuf>, content_dir: &Path) -> Result<Vec<PathBuf>> {
    if paths.is_empty() {
        return markup_under(content_dir);
    }

    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(markup_under(&path)?);
        } else if path.is_file() {
            files.push(path);
        } else {
            bail!("`{}` does not exist", path.display());
        }
    }

    files.dedup();
    Ok(files)
}

fn markup_under(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("content directory `{}` not found", dir.display());
    }
    let files = collect_files(dir, |_| false)
        .with_context(|| format!("failed to read `{}`", dir.display()))?;
    Ok(files.into_iter().filter(|p| is_markup(p)).collect())
}

/// Read file paths from stdin (one per line, blank lines ignored)
pub fn read_paths_from_stdin() -> Result<Vec<PathBuf>> {
    read_paths(io::stdin().lock())
}

fn read_paths(reader: impl BufRead) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read paths from stdin")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_paths_skips_blank_lines() {
        let input = b"OEBPS/ch1.xhtml\n\n  OEBPS/ch2.xhtml  \n" as &[u8];
        let paths = read_paths(input).unwrap();
        assert_eq!(
            paths,
            vec![PathBuf::from("OEBPS/ch1.xhtml"), PathBuf::from("OEBPS/ch2.xhtml")]
        );
    }

    #[test]
    fn test_dash_expanded_among_other_paths() {
        let stdin = || read_paths(b"b.xhtml\nc.xhtml\n" as &[u8]);
        let paths = [PathBuf::from("a.xhtml"), PathBuf::from("-"), PathBuf::from("d.xhtml")];

        let expanded = expand_stdin(&paths, stdin).unwrap();
        assert_eq!(
            expanded,
            ["a.xhtml", "b.xhtml", "c.xhtml", "d.xhtml"].map(PathBuf::from)
        );
    }

    #[test]
    fn test_dash_read_once() {
        let paths = [PathBuf::from("-"), PathBuf::from("-")];
        let expanded = expand_stdin(&paths, || Ok(vec![PathBuf::from("a.xhtml")])).unwrap();
        assert_eq!(expanded, vec![PathBuf::from("a.xhtml")]);

        let untouched = expand_stdin(&[PathBuf::from("a.xhtml")], || {
            panic!("stdin read without `-`")
        })
        .unwrap();
        assert_eq!(untouched, vec![PathBuf::from("a.xhtml")]);
    }

    #[test]
    fn test_collect_defaults_to_content_dir() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("text")).unwrap();
        fs::write(root.join("a.xhtml"), "").unwrap();
        fs::write(root.join("text/b.html"), "").unwrap();
        fs::write(root.join("style.css"), "").unwrap();

        let files = collect_markup_files(&[], root).unwrap();
        assert_eq!(files, vec![root.join("a.xhtml"), root.join("text/b.html")]);
    }

    #[test]
    fn test_collect_explicit_paths() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("text")).unwrap();
        fs::write(root.join("a.xhtml"), "").unwrap();
        fs::write(root.join("text/b.html"), "").unwrap();

        let files =
            collect_markup_files(&[root.join("a.xhtml"), root.join("text")], Path::new("/nope"))
                .unwrap();
        assert_eq!(files, vec![root.join("a.xhtml"), root.join("text/b.html")]);

        assert!(collect_markup_files(&[root.join("missing.xhtml")], root).is_err());
    }
}
