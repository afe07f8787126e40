//! Output fan-out.

use std::path::{Path, PathBuf};

use super::BuildError;
use crate::debug;
use crate::utils::fs::publish_copy;

/// Copy `archive` as `file_name` into every location.
///
/// Each copy is written to a temporary sibling and renamed into place, so
/// readers of a previous archive never see a half-written file. Repeated
/// locations are published once. Returns the published paths in order.
pub fn publish(
    archive: &Path,
    file_name: &str,
    locations: &[PathBuf],
) -> Result<Vec<PathBuf>, BuildError> {
    let mut published: Vec<PathBuf> = Vec::with_capacity(locations.len());

    for location in locations {
        let dest = location.join(file_name);
        if published.contains(&dest) {
            continue;
        }

        let bytes = publish_copy(archive, &dest).map_err(|source| BuildError::Publish {
            path: dest.clone(),
            source,
        })?;
        debug!("publish"; "{} ({} bytes)", dest.display(), bytes);
        published.push(dest);
    }

    Ok(published)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_publish_to_every_location() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("built.epub");
        fs::write(&archive, b"PK archive bytes").unwrap();

        let locations = vec![
            dir.path().to_path_buf(),
            dir.path().join("dist"),
            dir.path().join("dist"),
        ];
        let published = publish(&archive, "Book.epub", &locations).unwrap();

        assert_eq!(
            published,
            vec![dir.path().join("Book.epub"), dir.path().join("dist/Book.epub")]
        );
        for path in &published {
            assert_eq!(fs::read(path).unwrap(), b"PK archive bytes");
        }
    }

    #[test]
    fn test_publish_replaces_previous_archive() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("built.epub");
        fs::write(&archive, b"new").unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("Book.epub"), b"old").unwrap();

        publish(&archive, "Book.epub", &[out.clone()]).unwrap();

        assert_eq!(fs::read(out.join("Book.epub")).unwrap(), b"new");
        let leftovers: Vec<_> = fs::read_dir(&out).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_publish_error_names_destination() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("built.epub");
        fs::write(&archive, b"x").unwrap();
        // A non-empty directory occupies the destination path
        fs::create_dir_all(dir.path().join("Book.epub/keep")).unwrap();

        let err = publish(&archive, "Book.epub", &[dir.path().to_path_buf()]).unwrap_err();
        let BuildError::Publish { path, .. } = err else {
            panic!("expected publish error");
        };
        assert_eq!(path, dir.path().join("Book.epub"));
    }
}
