//! Scenario entries as they appear in the config file.

use crate::source::{Locator, LocatorKind};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioSpec {
    pub path: PathBuf,

    /// Display label. Defaults to the file stem.
    #[serde(default)]
    pub label: Option<String>,

    /// Forces the locator kind; inferred from the extension when absent.
    #[serde(default)]
    pub kind: Option<LocatorKind>,
}

impl ScenarioSpec {
    pub fn locator(&self) -> Locator {
        match self.kind {
            Some(kind) => Locator::new(kind, self.path.clone()),
            None => Locator::from_path(self.path.clone()),
        }
    }

    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| default_label(&self.path))
    }
}

/// File stem of `path`, or the full path when it has none.
pub fn default_label(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
