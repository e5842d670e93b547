//! Error taxonomy for the collection pipeline.
//!
//! Every variant names the path, archive entry or line it came from so the
//! caller can point at the offending input. Per-scenario failures are wrapped
//! in [`CollectError::InScenario`]; use [`CollectError::root`] to match on the
//! underlying cause.

use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, CollectError>;

/// Grid axis referenced by a shape error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Rows => f.write_str("rows"),
            Axis::Columns => f.write_str("columns"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CollectError {
    #[error("locator not found: {}", .path.display())]
    LocatorNotFound { path: PathBuf },

    #[error("read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Read or decode failure on one archive entry; `origin` is `path:entry`.
    #[error("read archive entry {origin}")]
    EntryRead {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot open {} as a zip archive", .path.display())]
    ArchiveFormatError {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive {} has no entries matching {pattern:?}", .path.display())]
    EmptyArchive { path: PathBuf, pattern: String },

    #[error("malformed number {token:?} in {origin} at line {line}, column {column}")]
    MalformedNumber {
        origin: String,
        line: usize,
        column: usize,
        token: String,
    },

    #[error("shape mismatch in {origin}: expected {expected} {axis}, found {found}{}", line_suffix(.line))]
    ShapeMismatch {
        origin: String,
        axis: Axis,
        expected: usize,
        found: usize,
        line: Option<usize>,
    },

    #[error("scenario {locator} produced no grids")]
    EmptyScenario { locator: String },

    #[error("crop out of bounds: {0}")]
    CropOutOfBounds(String),

    #[error("normalization reference {index} is out of range for {scenarios} scenario(s)")]
    IndexOutOfRange { index: usize, scenarios: usize },

    #[error("series length mismatch: scenario {index} has {found} values, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("scenario {index} ({label})")]
    InScenario {
        index: usize,
        label: String,
        #[source]
        source: Box<CollectError>,
    },
}

impl CollectError {
    /// Innermost error, skipping scenario wrappers.
    pub fn root(&self) -> &CollectError {
        match self {
            CollectError::InScenario { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn in_scenario(self, index: usize, label: &str) -> Self {
        CollectError::InScenario {
            index,
            label: label.to_string(),
            source: Box::new(self),
        }
    }
}

fn line_suffix(line: &Option<usize>) -> String {
    match line {
        Some(l) => format!(" (line {})", l),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_unwraps_nested_scenarios() {
        let err = CollectError::EmptyScenario {
            locator: "a.zip".to_string(),
        }
        .in_scenario(2, "baseline");

        assert!(matches!(err.root(), CollectError::EmptyScenario { .. }));
        assert_eq!(err.to_string(), "scenario 2 (baseline)");
    }

    #[test]
    fn io_causes_are_not_repeated_in_the_message() {
        let err = CollectError::Io {
            path: PathBuf::from("runs/a.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "read runs/a.csv");
        assert_eq!(
            format!("{:#}", anyhow::Error::from(err)),
            "read runs/a.csv: denied"
        );
    }

    #[test]
    fn shape_mismatch_mentions_line_when_known() {
        let err = CollectError::ShapeMismatch {
            origin: "run.csv".to_string(),
            axis: Axis::Columns,
            expected: 4,
            found: 3,
            line: Some(2),
        };
        assert_eq!(
            err.to_string(),
            "shape mismatch in run.csv: expected 4 columns, found 3 (line 2)"
        );
    }
}
