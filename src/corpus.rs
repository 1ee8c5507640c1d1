//! Running the finder over files on disk.
//!
//! Paths may name files or directories; directories are walked recursively
//! for files with a configured extension. Files are scanned in parallel with
//! `rayon` since the finder shares nothing mutable between calls.

use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use crate::bible::{Finder, Reference};
use crate::config::Config;
use crate::error::{Error, Result};

/// References found in one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// The scanned file.
    pub path: PathBuf,
    /// Citations found in it, in the finder's order.
    pub references: Vec<Reference>,
}

/// Expand `paths` into a sorted, de-duplicated list of files to scan.
///
/// Files named directly are always kept; files found by walking a directory
/// are kept only when `config` accepts their extension.
pub fn collect_files(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        let metadata = fs_err::metadata(path).map_err(|e| Error::io(e, path.clone()))?;
        if !metadata.is_dir() {
            files.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry?;
            if entry.file_type().is_file() && has_accepted_extension(entry.path(), config) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn has_accepted_extension(path: &Path, config: &Config) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| config.accepts_extension(e))
}

/// Scan each file with `finder`, in parallel. Reports keep the order of `files`.
pub fn scan_files(files: &[PathBuf], finder: &Finder) -> Result<Vec<FileReport>> {
    let started = Instant::now();

    let reports = files
        .par_iter()
        .map(|path| -> Result<FileReport> {
            let text = fs_err::read_to_string(path).map_err(|e| Error::io(e, path.clone()))?;
            Ok(FileReport {
                path: path.clone(),
                references: finder.find(&text),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let total: usize = reports.iter().map(|r| r.references.len()).sum();
    tracing::info!(
        "Found {total} references in {} files in {:?}",
        reports.len(),
        started.elapsed()
    );
    Ok(reports)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_extension_filter() {
        let config = Config::default();
        assert!(has_accepted_extension(Path::new("sermons/advent.TXT"), &config));
        assert!(!has_accepted_extension(Path::new("sermons/advent.pdf"), &config));
        assert!(!has_accepted_extension(Path::new("sermons/README"), &config));
    }

    #[test]
    fn test_missing_path_is_an_io_error() {
        let err = collect_files(
            &[PathBuf::from("/tmp/nonexistent_scripture_refs_corpus")],
            &Config::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io { path: Some(_), .. }));
    }
}
