//! Reading archives back.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use zip::{CompressionMethod, ZipArchive};

use super::{IoContext, MIMETYPE, MIMETYPE_NAME, PackageError};

/// One archive member, in archive order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub compression: CompressionMethod,
    pub size: u64,
    pub compressed_size: u64,
}

fn open(path: &Path) -> Result<ZipArchive<BufReader<File>>, PackageError> {
    let file = File::open(path).at(path)?;
    Ok(ZipArchive::new(BufReader::new(file))?)
}

/// List the members of the archive at `path`.
pub fn list_members(path: &Path) -> Result<Vec<Member>, PackageError> {
    let mut archive = open(path)?;
    let mut members = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let entry = archive.by_index_raw(i)?;
        members.push(Member {
            name: entry.name().to_string(),
            compression: entry.compression(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
        });
    }

    Ok(members)
}

/// Check the container invariants of a written archive.
///
/// - first member is `mimetype`, stored, holding exactly the EPUB media type
/// - no directory entries
///
/// Returns the member count.
pub fn verify_archive(path: &Path) -> Result<usize, PackageError> {
    let malformed = |reason: String| PackageError::Malformed {
        path: path.to_path_buf(),
        reason,
    };

    let mut archive = open(path)?;
    if archive.len() == 0 {
        return Err(malformed("archive has no members".into()));
    }

    {
        let mut first = archive.by_index(0)?;
        if first.name() != MIMETYPE_NAME {
            return Err(malformed(format!(
                "first member is `{}`, expected `{MIMETYPE_NAME}`",
                first.name()
            )));
        }
        if first.compression() != CompressionMethod::Stored {
            return Err(malformed(format!(
                "`{MIMETYPE_NAME}` is compressed with {:?}",
                first.compression()
            )));
        }
        let mut content = String::new();
        first.read_to_string(&mut content).at(path)?;
        if content != MIMETYPE {
            return Err(malformed(format!("`{MIMETYPE_NAME}` holds {content:?}")));
        }
    }

    for i in 1..archive.len() {
        let entry = archive.by_index_raw(i)?;
        if entry.is_dir() {
            return Err(malformed(format!("directory entry `{}`", entry.name())));
        }
        if entry.name() == MIMETYPE_NAME {
            return Err(malformed(format!("duplicate `{MIMETYPE_NAME}`")));
        }
    }

    Ok(archive.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, io::Write};
    use tempfile::TempDir;
    use zip::{ZipWriter, write::SimpleFileOptions};

    fn write_zip(path: &Path, entries: &[(&str, CompressionMethod, &str)]) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        for (name, method, body) in entries {
            let opts = SimpleFileOptions::default().compression_method(*method);
            zip.start_file(*name, opts).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_verify_accepts_well_formed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ok.epub");
        write_zip(
            &path,
            &[
                ("mimetype", CompressionMethod::Stored, MIMETYPE),
                ("OEBPS/a.xhtml", CompressionMethod::Deflated, "<body/>"),
            ],
        );
        assert_eq!(verify_archive(&path).unwrap(), 2);
    }

    #[test]
    fn test_verify_rejects_misplaced_mimetype() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.epub");
        write_zip(
            &path,
            &[
                ("OEBPS/a.xhtml", CompressionMethod::Deflated, "<body/>"),
                ("mimetype", CompressionMethod::Stored, MIMETYPE),
            ],
        );
        assert!(matches!(
            verify_archive(&path),
            Err(PackageError::Malformed { .. })
        ));
    }

    #[test]
    fn test_verify_rejects_compressed_mimetype() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.epub");
        write_zip(&path, &[("mimetype", CompressionMethod::Deflated, MIMETYPE)]);
        assert!(matches!(
            verify_archive(&path),
            Err(PackageError::Malformed { .. })
        ));
    }

    #[test]
    fn test_not_a_zip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.epub");
        fs::write(&path, "not a zip").unwrap();
        assert!(matches!(list_members(&path), Err(PackageError::Zip(_))));
    }
}
