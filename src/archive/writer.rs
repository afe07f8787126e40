//! Archive writer.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use zip::{CompressionMethod, DateTime, ZipWriter, write::SimpleFileOptions};

use super::{Exclusions, IoContext, MIMETYPE, MIMETYPE_NAME, PackageError};
use crate::utils::{fs::collect_files, path::member_name};

/// What [`assemble`] wrote.
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Member count, including `mimetype`.
    pub members: usize,
    /// Archive size on disk.
    pub bytes: u64,
}

/// Pack the package tree at `root` into an EPUB archive at `output`.
///
/// The descriptor is checked before anything is created. The archive is
/// written to a temporary file next to `output` and renamed into place only
/// once complete, so a failed run never leaves a partial archive behind.
pub fn assemble(
    root: &Path,
    output: &Path,
    exclusions: &Exclusions,
) -> Result<ArchiveSummary, PackageError> {
    check_descriptor(root)?;

    let mut files: Vec<(String, PathBuf)> = collect_files(root, |rel| {
        rel == Path::new(MIMETYPE_NAME) || exclusions.is_excluded(rel)
    })
    .at(root)?
    .into_iter()
    .filter_map(|path| Some((member_name(root, &path)?, path)))
    .collect();
    files.sort_by(|a, b| a.0.cmp(&b.0));

    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir).at(dir)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".bindery-")
        .suffix(".partial")
        .tempfile_in(dir)
        .at(dir)?;

    let members = write_members(tmp.as_file_mut(), root, &files)?;
    tmp.as_file().sync_all().at(tmp.path())?;

    let file = tmp.persist(output).map_err(|e| PackageError::io(output, e.error))?;
    let bytes = file.metadata().at(output)?.len();

    crate::debug!("archive"; "{} members -> {}", members, output.display());

    Ok(ArchiveSummary {
        path: output.to_path_buf(),
        members,
        bytes,
    })
}

/// Require `root/mimetype` to exist and hold exactly the EPUB media type.
fn check_descriptor(root: &Path) -> Result<(), PackageError> {
    let path = root.join(MIMETYPE_NAME);
    if !path.is_file() {
        return Err(PackageError::MissingDescriptor(path));
    }

    let content = fs::read(&path).at(&path)?;
    if content != MIMETYPE.as_bytes() {
        return Err(PackageError::InvalidDescriptor {
            path,
            found: String::from_utf8_lossy(&content).into_owned(),
        });
    }
    Ok(())
}

/// Write `mimetype` followed by `files` (member name, source path), in order.
/// Returns the member count.
fn write_members<W: Write + io::Seek>(
    writer: W,
    root: &Path,
    files: &[(String, PathBuf)],
) -> Result<usize, PackageError> {
    let mut zip = ZipWriter::new(writer);

    let stored = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(DateTime::default());
    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    // Must be first and uncompressed
    zip.start_file(MIMETYPE_NAME, stored)?;
    zip.write_all(MIMETYPE.as_bytes()).at(root.join(MIMETYPE_NAME))?;
    let mut members = 1;

    for (name, path) in files {
        zip.start_file(name.as_str(), deflated)?;
        let mut src = File::open(path).at(path)?;
        io::copy(&mut src, &mut zip).at(path)?;
        members += 1;
    }

    zip.finish()?;
    Ok(members)
}
