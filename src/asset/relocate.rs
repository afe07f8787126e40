//! Moving unused assets aside.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Outcome for one asset name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relocation {
    /// Renamed into the target directory.
    Moved { from: PathBuf, to: PathBuf },
    /// Source was already gone.
    Missing(PathBuf),
}

impl Relocation {
    #[inline]
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Move each of `names` from `content_dir` into `content_dir/unused_dir`.
///
/// The target directory is created if absent. Each move is a single rename;
/// a name whose source no longer exists is reported as [`Relocation::Missing`]
/// rather than an error, so running this twice is harmless.
pub fn relocate_unused(
    content_dir: &Path,
    unused_dir: &str,
    names: &[String],
) -> io::Result<Vec<Relocation>> {
    let target_dir = content_dir.join(unused_dir);
    fs::create_dir_all(&target_dir)?;

    let mut results = Vec::with_capacity(names.len());
    for name in names {
        let from = content_dir.join(name);
        let to = target_dir.join(name);

        match fs::rename(&from, &to) {
            Ok(()) => results.push(Relocation::Moved { from, to }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                results.push(Relocation::Missing(from));
            }
            Err(e) => return Err(e),
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_relocate_moves_and_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("c.gif"), b"GIF89a").unwrap();
        let names = vec!["c.gif".to_string()];

        let first = relocate_unused(root, "unused_images", &names).unwrap();
        assert!(first[0].is_moved());
        assert!(!root.join("c.gif").exists());
        assert_eq!(fs::read(root.join("unused_images/c.gif")).unwrap(), b"GIF89a");

        let second = relocate_unused(root, "unused_images", &names).unwrap();
        assert_eq!(second, vec![Relocation::Missing(root.join("c.gif"))]);
        assert!(root.join("unused_images/c.gif").exists());
    }

    #[test]
    fn test_relocate_creates_target_with_nothing_to_move() {
        let dir = TempDir::new().unwrap();
        let moved = relocate_unused(dir.path(), "unused_images", &[]).unwrap();
        assert!(moved.is_empty());
        assert!(dir.path().join("unused_images").is_dir());
    }
}
