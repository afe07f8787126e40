//! Filesystem helpers for package trees.
//!
//! - `collect_files` - sorted recursive file listing with a skip predicate
//! - `copy_tree` - clone a directory tree, replacing the destination
//! - `publish_copy` - copy a file to its final path via a temporary sibling

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use jwalk::WalkDir;

/// File names never considered part of a package tree.
pub const IGNORED_FILE_NAME: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Collect all regular files under `dir`, sorted by path.
///
/// `skip` receives each file's path relative to `dir`; returning `true`
/// drops the file.
pub fn collect_files<F>(dir: &Path, skip: F) -> io::Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort(true).skip_hidden(false) {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let name = entry.file_name().to_str().unwrap_or_default();
        if IGNORED_FILE_NAME.contains(&name) {
            continue;
        }

        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        if skip(rel) {
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Clone `src` into `dst`, removing anything previously at `dst`.
pub fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    if dst.exists() {
        fs::remove_dir_all(dst)?;
    }
    fs::create_dir_all(dst)?;

    for entry in WalkDir::new(src).sort(true).skip_hidden(false) {
        let entry = entry.map_err(io::Error::other)?;
        let path = entry.path();
        let Ok(rel) = path.strip_prefix(src) else {
            continue;
        };
        if rel.as_os_str().is_empty() {
            continue;
        }

        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&path, &target)?;
        }
    }

    Ok(())
}

/// Copy `src` to `dest` without ever exposing a half-written `dest`.
///
/// Data goes to a temporary file in the destination directory, which is then
/// renamed over `dest`. Permissions and modification time follow `src`.
/// Returns the number of bytes copied.
pub fn publish_copy(src: &Path, dest: &Path) -> io::Result<u64> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".bindery-")
        .suffix(".partial")
        .tempfile_in(dir)?;

    let bytes = io::copy(&mut File::open(src)?, tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;

    let meta = fs::metadata(src)?;
    fs::set_permissions(tmp.path(), meta.permissions())?;
    if let Ok(modified) = meta.modified() {
        tmp.as_file().set_modified(modified)?;
    }

    tmp.persist(dest).map_err(|e| e.error)?;
    Ok(bytes)
}
