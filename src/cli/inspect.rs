//! `bindery inspect`: structural check of an existing archive.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::{
    archive::{list_members, verify_archive},
    logger::status_success,
    utils::plural_count,
};

/// Members listed after a successful check.
const SHOWN_MEMBERS: usize = 10;

pub fn inspect(archive: &Path) -> Result<()> {
    let count = verify_archive(archive)
        .with_context(|| format!("`{}` failed the container check", archive.display()))?;
    let members = list_members(archive)?;

    status_success(&format!(
        "{}: {}, `mimetype` first and stored",
        archive.display(),
        plural_count(count, "member")
    ));

    for member in members.iter().take(SHOWN_MEMBERS) {
        println!(
            "      {:<40} {}",
            member.name,
            format!("{:?}", member.compression).dimmed()
        );
    }
    if members.len() > SHOWN_MEMBERS {
        println!("      ... {} more", members.len() - SHOWN_MEMBERS);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{Exclusions, MIMETYPE, assemble};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_inspect_built_archive() {
        let dir = TempDir::new().unwrap();
        let tree = dir.path().join("epub");
        fs::create_dir_all(tree.join("OEBPS")).unwrap();
        fs::write(tree.join("mimetype"), MIMETYPE).unwrap();
        for i in 0..12 {
            fs::write(tree.join(format!("OEBPS/ch{i:02}.xhtml")), "<body/>").unwrap();
        }
        let out = dir.path().join("Book.epub");
        assemble(&tree, &out, &Exclusions::default()).unwrap();

        inspect(&out).unwrap();
    }

    #[test]
    fn test_inspect_rejects_non_archive() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Book.epub");
        fs::write(&path, "not a zip").unwrap();

        let err = inspect(&path).unwrap_err();
        assert!(err.to_string().contains("failed the container check"));
    }
}
