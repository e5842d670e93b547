//! Collection pipeline for particle-transport density maps.
//!
//! Turns one or more raw grid files per scenario (plain files or zip
//! archives of sub-runs) into one comparable numeric series per scenario:
//! sum the sub-runs, crop a centered region, optionally keep every k-th
//! cell, then normalize every scenario against a reference scenario.
//!
//! ```no_run
//! use densitymap::config::Settings;
//! use densitymap::model::collect;
//! use densitymap::source::Locator;
//!
//! let config = Settings::default().validate_and_build()?;
//! let out = collect(&[Locator::from_path("runs/open.zip")], &config)?;
//! for (label, summary) in out.labels().iter().zip(out.summaries()) {
//!     println!("{label}: {} ± {}", summary.mean, summary.stderr);
//! }
//! # Ok::<(), densitymap::error::CollectError>(())
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod model;
pub mod render;
pub mod source;

pub use config::{Config, Settings};
pub use error::CollectError;
pub use model::{Collection, Series, collect, collect_scenarios};
pub use source::Locator;
