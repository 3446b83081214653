use crate::errors::{BadkitError, Result};
use std::collections::HashSet;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Where a member's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSource {
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// One planned member of the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Forward-slash path inside the archive.
    pub name: String,
    pub source: MemberSource,
}

impl ArchiveEntry {
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ArchiveEntry {
            name: name.into(),
            source: MemberSource::File(path.into()),
        }
    }

    pub fn bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        ArchiveEntry {
            name: name.into(),
            source: MemberSource::Bytes(data.into()),
        }
    }
}

/// Drops entries whose archive name was already planned, keeping the first.
pub fn dedup_entries(entries: Vec<ArchiveEntry>) -> Vec<ArchiveEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.name.clone()))
        .collect()
}

/// Writes `entries` in order to a new ZIP file at `out_zip`.
///
/// ### Parameters
/// - `out_zip`: the archive to create. Its parent must exist.
/// - `entries`: members in the order they should appear.
pub fn write_archive(out_zip: &Path, entries: &[ArchiveEntry]) -> Result<()> {
    let file = fs::File::create(out_zip).map_err(|e| {
        BadkitError::Archive(format!("Failed to create {}: {}", out_zip.display(), e))
    })?;
    let mut zip = zip::ZipWriter::new(file);
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for entry in entries {
        zip.start_file(entry.name.as_str(), options)?;
        match &entry.source {
            MemberSource::Bytes(data) => zip.write_all(data)?,
            MemberSource::File(path) => {
                let mut data = Vec::new();
                fs::File::open(path)
                    .and_then(|mut f| f.read_to_end(&mut data))
                    .map_err(|e| {
                        BadkitError::Archive(format!("Failed to read {}: {}", path.display(), e))
                    })?;
                zip.write_all(&data)?;
            }
        }
    }

    zip.finish()?;
    Ok(())
}

/// Member names of an existing archive, in stored order.
pub fn list_members(path: &Path) -> Result<Vec<String>> {
    let file = fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut names = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        names.push(archive.by_index(i)?.name().to_string());
    }
    Ok(names)
}

/// Reads one member of an existing archive.
pub fn read_member(path: &Path, name: &str) -> Result<Vec<u8>> {
    let file = fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file)?;
    let mut member = archive.by_name(name)?;
    let mut data = Vec::new();
    member.read_to_end(&mut data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_reads_back_members() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("operator.py");
        fs::write(&src, "class Op: pass\n").unwrap();
        let out = dir.path().join("bundle.zip");

        let entries = dedup_entries(vec![
            ArchiveEntry::bytes("__init__.py", "print('hi')\n"),
            ArchiveEntry::file("unit/operator.py", &src),
            ArchiveEntry::file("unit/operator.py", &src),
        ]);
        write_archive(&out, &entries).unwrap();

        assert_eq!(
            list_members(&out).unwrap(),
            vec!["__init__.py", "unit/operator.py"]
        );
        assert_eq!(
            read_member(&out, "unit/operator.py").unwrap(),
            b"class Op: pass\n"
        );
    }

    #[test]
    fn unreadable_source_is_an_archive_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("bundle.zip");
        let err = write_archive(
            &out,
            &[ArchiveEntry::file("x.py", dir.path().join("missing.py"))],
        )
        .unwrap_err();
        assert!(matches!(err, BadkitError::Archive(_)));
    }
}
