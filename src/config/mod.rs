//! Run configuration.
//!
//! Two representations:
//! - [`Settings`]: raw JSON input (serde-friendly, every field optional)
//! - [`Config`]: validated, immutable parameter set shared by every stage
//!
//! JSON shape (all keys optional):
//! {
//!   "size": 500,
//!   "norm_id": 0,              // -1 for absolute values
//!   "radius": [200, 200],
//!   "dropx": 0, "dropy": 0,
//!   "repeat_shift": 10,        // omit to disable sampling
//!   "repeat_center": [199, 199],
//!   "entry_pattern": "(?i)\\.(csv|txt|dat)$",
//!   "parallel": false,
//!   "scenarios": [{ "path": "runs/a.zip", "label": "baseline" }]
//! }

pub mod scenario;

pub use scenario::ScenarioSpec;

use crate::error::{CollectError, Result};
use crate::grid::crop::{CropWindow, crop_window};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SIZE: usize = 500;
pub const DEFAULT_RADIUS: (usize, usize) = (200, 200);
pub const DEFAULT_ENTRY_PATTERN: &str = r"(?i)\.(csv|txt|dat)$";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub size: Option<usize>,

    #[serde(default)]
    pub norm_id: Option<i64>,

    #[serde(default)]
    pub radius: Option<(usize, usize)>,

    #[serde(default)]
    pub dropx: Option<usize>,

    #[serde(default)]
    pub dropy: Option<usize>,

    #[serde(default)]
    pub repeat_shift: Option<usize>,

    #[serde(default)]
    pub repeat_center: Option<(usize, usize)>,

    #[serde(default)]
    pub entry_pattern: Option<String>,

    #[serde(default)]
    pub parallel: Option<bool>,

    #[serde(default)]
    pub scenarios: Vec<ScenarioSpec>,
}

/// How the collected series are rescaled against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    Absolute,
    Reference(usize),
}

impl Normalization {
    /// Map the legacy `norm_id` convention (-1 = absolute) onto the enum.
    pub fn from_norm_id(norm_id: i64) -> Result<Self> {
        match norm_id {
            -1 => Ok(Normalization::Absolute),
            n if n >= 0 => Ok(Normalization::Reference(n as usize)),
            n => Err(CollectError::InvalidConfig(format!(
                "norm_id must be -1 or a scenario index, got {}",
                n
            ))),
        }
    }
}

/// Periodic decimation parameters. Anchor is in cropped-window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sampling {
    pub shift: usize,
    pub center: (usize, usize),
}

/// Validated configuration. Built once by [`Settings::validate_and_build`]
/// and only ever borrowed afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    size: usize,
    normalization: Normalization,
    radius: (usize, usize),
    drop: (usize, usize),
    sampling: Option<Sampling>,
    entry_pattern: Regex,
    parallel: bool,
}

impl Config {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    pub fn radius(&self) -> (usize, usize) {
        self.radius
    }

    /// `(dropx, dropy)`.
    pub fn drop(&self) -> (usize, usize) {
        self.drop
    }

    pub fn sampling(&self) -> Option<Sampling> {
        self.sampling
    }

    pub fn entry_pattern(&self) -> &Regex {
        &self.entry_pattern
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Serializable snapshot for reports.
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            size: self.size,
            normalization: self.normalization,
            radius: self.radius,
            drop: self.drop,
            sampling: self.sampling,
            entry_pattern: self.entry_pattern.as_str().to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            size: DEFAULT_SIZE,
            normalization: Normalization::Reference(0),
            radius: DEFAULT_RADIUS,
            drop: (0, 0),
            sampling: None,
            entry_pattern: default_entry_pattern(),
            parallel: false,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub size: usize,
    pub normalization: Normalization,
    pub radius: (usize, usize),
    pub drop: (usize, usize),
    pub sampling: Option<Sampling>,
    pub entry_pattern: String,
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parse config file {}", path.display()))?;
        Ok(settings)
    }

    /// Overlay `other` on top of `self`: every value set in `other` wins.
    pub fn merged_with(mut self, other: Settings) -> Settings {
        overlay(&mut self.size, other.size);
        overlay(&mut self.norm_id, other.norm_id);
        overlay(&mut self.radius, other.radius);
        overlay(&mut self.dropx, other.dropx);
        overlay(&mut self.dropy, other.dropy);
        overlay(&mut self.repeat_shift, other.repeat_shift);
        overlay(&mut self.repeat_center, other.repeat_center);
        overlay(&mut self.entry_pattern, other.entry_pattern);
        overlay(&mut self.parallel, other.parallel);
        if !other.scenarios.is_empty() {
            self.scenarios = other.scenarios;
        }
        self
    }

    /// Apply defaults and check every parameter against the grid size.
    ///
    /// Crop bounds are checked here as well as in the cropper, so a bad
    /// radius fails before any file is opened.
    pub fn validate_and_build(&self) -> Result<Config> {
        let size = self.size.unwrap_or(DEFAULT_SIZE);
        if size == 0 {
            return Err(CollectError::InvalidConfig(
                "size must be positive".to_string(),
            ));
        }

        let normalization = Normalization::from_norm_id(self.norm_id.unwrap_or(0))?;
        let radius = self.radius.unwrap_or(DEFAULT_RADIUS);
        let drop = (self.dropx.unwrap_or(0), self.dropy.unwrap_or(0));

        let window = crop_window(size, size, radius, drop)?;

        let sampling = match self.repeat_shift {
            None => {
                if self.repeat_center.is_some() {
                    crate::diagnostics::warn("repeat_center is ignored without repeat_shift");
                }
                None
            }
            Some(0) => {
                return Err(CollectError::InvalidConfig(
                    "repeat_shift must be a positive stride".to_string(),
                ));
            }
            Some(shift) => {
                let center = self
                    .repeat_center
                    .unwrap_or_else(|| window.default_anchor());
                check_anchor(center, &window)?;
                Some(Sampling { shift, center })
            }
        };

        let entry_pattern = match &self.entry_pattern {
            Some(p) => Regex::new(p).map_err(|e| {
                CollectError::InvalidConfig(format!("bad entry_pattern {:?}: {}", p, e))
            })?,
            None => default_entry_pattern(),
        };

        Ok(Config {
            size,
            normalization,
            radius,
            drop,
            sampling,
            entry_pattern,
            parallel: self.parallel.unwrap_or(false),
        })
    }
}

fn overlay<T>(base: &mut Option<T>, top: Option<T>) {
    if top.is_some() {
        *base = top;
    }
}

fn check_anchor(center: (usize, usize), window: &CropWindow) -> Result<()> {
    let (cx, cy) = center;
    if cx >= window.cols || cy >= window.rows {
        return Err(CollectError::InvalidConfig(format!(
            "repeat_center ({}, {}) lies outside the {}x{} cropped window",
            cx, cy, window.cols, window.rows
        )));
    }
    Ok(())
}

fn default_entry_pattern() -> Regex {
    Regex::new(DEFAULT_ENTRY_PATTERN).expect("default entry pattern compiles")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Settings::default().validate_and_build().unwrap();
        assert_eq!(cfg.size(), 500);
        assert_eq!(cfg.normalization(), Normalization::Reference(0));
        assert_eq!(cfg.radius(), (200, 200));
        assert_eq!(cfg.drop(), (0, 0));
        assert_eq!(cfg.sampling(), None);
        assert!(!cfg.parallel());
        assert!(cfg.entry_pattern().is_match("run_01.CSV"));
        assert!(!cfg.entry_pattern().is_match("README.md"));
    }

    #[test]
    fn parses_json_settings() {
        let settings: Settings = serde_json::from_str(
            r#"{ "size": 8, "norm_id": -1, "radius": [3, 2], "dropx": 1,
                 "repeat_shift": 2, "scenarios": [{ "path": "a.csv" }] }"#,
        )
        .unwrap();
        let cfg = settings.validate_and_build().unwrap();

        assert_eq!(cfg.normalization(), Normalization::Absolute);
        assert_eq!(cfg.radius(), (3, 2));
        assert_eq!(cfg.drop(), (1, 0));
        // Cropped window is 5 columns x 4 rows.
        assert_eq!(
            cfg.sampling(),
            Some(Sampling {
                shift: 2,
                center: (2, 1)
            })
        );
        assert_eq!(settings.scenarios.len(), 1);
    }

    #[test]
    fn rejects_unknown_keys() {
        let res: std::result::Result<Settings, _> = serde_json::from_str(r#"{ "sise": 4 }"#);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_radius_larger_than_grid() {
        let settings = Settings {
            size: Some(10),
            radius: Some((6, 2)),
            ..Settings::default()
        };
        let err = settings.validate_and_build().unwrap_err();
        assert!(matches!(err, CollectError::CropOutOfBounds(_)));
    }

    #[test]
    fn rejects_radius_that_overflows_window_width() {
        let settings = Settings {
            size: Some(4),
            radius: Some((usize::MAX / 2 + 1, 1)),
            ..Settings::default()
        };
        let err = settings.validate_and_build().unwrap_err();
        assert!(matches!(err, CollectError::CropOutOfBounds(_)));
    }

    #[test]
    fn rejects_bad_norm_id_and_stride() {
        let settings = Settings {
            size: Some(4),
            radius: Some((2, 2)),
            norm_id: Some(-3),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate_and_build(),
            Err(CollectError::InvalidConfig(_))
        ));

        let settings = Settings {
            size: Some(4),
            radius: Some((2, 2)),
            repeat_shift: Some(0),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate_and_build(),
            Err(CollectError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_anchor_outside_window() {
        let settings = Settings {
            size: Some(6),
            radius: Some((2, 2)),
            repeat_shift: Some(2),
            repeat_center: Some((4, 0)),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate_and_build(),
            Err(CollectError::InvalidConfig(_))
        ));
    }

    #[test]
    fn later_settings_override_earlier() {
        let file = Settings {
            size: Some(8),
            norm_id: Some(1),
            ..Settings::default()
        };
        let cli = Settings {
            norm_id: Some(-1),
            ..Settings::default()
        };
        let merged = file.merged_with(cli);
        assert_eq!(merged.size, Some(8));
        assert_eq!(merged.norm_id, Some(-1));
    }
}
