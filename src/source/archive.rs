//! Zip archive traversal.

use crate::error::{CollectError, Result};
use crate::source::{RawBlob, io_error};

use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zip::ZipArchive;

/// Read every file entry whose name matches `pattern`, sorted by entry name.
///
/// Directory entries are skipped. Entry text must be UTF-8.
pub fn read_entries(path: &Path, pattern: &Regex) -> Result<Vec<RawBlob>> {
    let file = File::open(path).map_err(|source| io_error(path, source))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|source| CollectError::ArchiveFormatError {
            path: path.to_path_buf(),
            source,
        })?;

    let mut matching: Vec<(String, usize)> = Vec::new();
    for idx in 0..archive.len() {
        let entry = archive
            .by_index(idx)
            .map_err(|source| CollectError::ArchiveFormatError {
                path: path.to_path_buf(),
                source,
            })?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        if pattern.is_match(&name) {
            matching.push((name, idx));
        } else {
            log::debug!("{}: skipping entry {}", path.display(), name);
        }
    }

    if matching.is_empty() {
        return Err(CollectError::EmptyArchive {
            path: path.to_path_buf(),
            pattern: pattern.as_str().to_string(),
        });
    }

    // Lexicographic by entry name, whatever order the archive was written in.
    matching.sort();

    let mut blobs = Vec::with_capacity(matching.len());
    for (name, idx) in matching {
        let mut entry = archive
            .by_index(idx)
            .map_err(|source| CollectError::ArchiveFormatError {
                path: path.to_path_buf(),
                source,
            })?;
        let origin = format!("{}:{}", path.display(), name);
        let mut text = String::new();
        if let Err(source) = entry.read_to_string(&mut text) {
            return Err(CollectError::EntryRead { origin, source });
        }

        blobs.push(RawBlob { origin, text });
    }

    Ok(blobs)
}
