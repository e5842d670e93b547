//! Scenario sources: one locator in, an ordered list of raw grid texts out.
//!
//! A locator is either a single grid file or a zip archive with one grid
//! entry per sub-run. Callers only use [`Locator::resolve`]; the variant
//! decides how the blobs are produced.

pub mod archive;

use crate::error::{CollectError, Result};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorKind {
    File,
    Archive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    File(PathBuf),
    Archive(PathBuf),
}

/// One grid's worth of text plus where it came from.
#[derive(Debug, Clone)]
pub struct RawBlob {
    /// `path` for plain files, `path:entry` for archive entries.
    pub origin: String,
    pub text: String,
}

impl Locator {
    pub fn new(kind: LocatorKind, path: PathBuf) -> Self {
        match kind {
            LocatorKind::File => Locator::File(path),
            LocatorKind::Archive => Locator::Archive(path),
        }
    }

    /// Infer the kind from the extension: `.zip` is an archive, anything
    /// else a plain grid file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_zip = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("zip"))
            .unwrap_or(false);
        if is_zip {
            Locator::Archive(path)
        } else {
            Locator::File(path)
        }
    }

    pub fn kind(&self) -> LocatorKind {
        match self {
            Locator::File(_) => LocatorKind::File,
            Locator::Archive(_) => LocatorKind::Archive,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Locator::File(p) | Locator::Archive(p) => p,
        }
    }

    /// Produce the locator's blobs in a deterministic order.
    ///
    /// `entry_pattern` filters archive entry names; it does not apply to a
    /// plain file, which always yields exactly one blob.
    pub fn resolve(&self, entry_pattern: &Regex) -> Result<Vec<RawBlob>> {
        let path = self.path();
        if !path.exists() {
            return Err(CollectError::LocatorNotFound {
                path: path.to_path_buf(),
            });
        }

        let blobs = match self {
            Locator::File(p) => vec![RawBlob {
                origin: p.display().to_string(),
                text: read_text(p)?,
            }],
            Locator::Archive(p) => archive::read_entries(p, entry_pattern)?,
        };
        log::debug!("{}: resolved {} blob(s)", self, blobs.len());
        Ok(blobs)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| io_error(path, source))
}

pub(crate) fn io_error(path: &Path, source: io::Error) -> CollectError {
    if source.kind() == io::ErrorKind::NotFound {
        CollectError::LocatorNotFound {
            path: path.to_path_buf(),
        }
    } else {
        CollectError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ENTRY_PATTERN;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn pattern() -> Regex {
        Regex::new(DEFAULT_ENTRY_PATTERN).unwrap()
    }

    #[test]
    fn kind_follows_extension() {
        assert_eq!(Locator::from_path("a/b.ZIP").kind(), LocatorKind::Archive);
        assert_eq!(Locator::from_path("a/b.csv").kind(), LocatorKind::File);
        assert_eq!(Locator::from_path("a/b").kind(), LocatorKind::File);
    }

    #[test]
    fn plain_file_yields_one_blob() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.csv");
        fs::write(&path, "1,2\n3,4\n").unwrap();

        let blobs = Locator::from_path(&path).resolve(&pattern()).unwrap();
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].text, "1,2\n3,4\n");
        assert_eq!(blobs[0].origin, path.display().to_string());
    }

    #[test]
    fn plain_file_ignores_entry_pattern() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.out");
        fs::write(&path, "7").unwrap();

        let blobs = Locator::from_path(&path).resolve(&pattern()).unwrap();
        assert_eq!(blobs.len(), 1);
    }

    #[test]
    fn missing_path_is_locator_not_found() {
        let dir = TempDir::new().unwrap();
        for loc in [
            Locator::from_path(dir.path().join("nope.csv")),
            Locator::from_path(dir.path().join("nope.zip")),
        ] {
            let err = loc.resolve(&pattern()).unwrap_err();
            assert!(matches!(err, CollectError::LocatorNotFound { .. }));
        }
    }
}
