//! Collection pipeline: locators in, one comparable series per scenario out.
//!
//! Per scenario (independent, optionally in parallel):
//! resolve -> parse each blob -> sum -> crop -> sample -> flatten.
//! Then, once every scenario is materialized: normalize -> summarize.

pub mod normalize;
pub mod summary;

pub use normalize::normalize;
pub use summary::{Summary, summarize};

use crate::config::{Config, ConfigSummary, ScenarioSpec, scenario::default_label};
use crate::error::Result;
use crate::grid::{self, Grid};
use crate::source::Locator;

use rayon::prelude::*;
use serde::Serialize;

/// Flattened, row-major values of one scenario.
pub type Series = Vec<f64>;

/// One scenario to collect.
#[derive(Debug, Clone)]
pub struct ScenarioInput {
    pub locator: Locator,
    pub label: String,
}

impl From<Locator> for ScenarioInput {
    fn from(locator: Locator) -> Self {
        let label = default_label(locator.path());
        ScenarioInput { locator, label }
    }
}

impl From<&ScenarioSpec> for ScenarioInput {
    fn from(spec: &ScenarioSpec) -> Self {
        ScenarioInput {
            locator: spec.locator(),
            label: spec.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSeries {
    pub label: String,
    pub locator: String,
    /// Number of grids pooled into this scenario.
    pub blobs: usize,
    /// `(rows, cols)` of the final grid before flattening.
    pub shape: (usize, usize),
    pub summary: Summary,
    pub series: Series,
}

#[derive(Debug, Clone, Serialize)]
pub struct Collection {
    pub config: ConfigSummary,
    pub scenarios: Vec<ScenarioSeries>,
}

impl Collection {
    pub fn series(&self) -> Vec<&[f64]> {
        self.scenarios.iter().map(|s| s.series.as_slice()).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn summaries(&self) -> Vec<Summary> {
        self.scenarios.iter().map(|s| s.summary).collect()
    }
}

/// Collect one series per locator, labelled by file stem.
pub fn collect(locators: &[Locator], config: &Config) -> Result<Collection> {
    let inputs: Vec<ScenarioInput> = locators.iter().cloned().map(ScenarioInput::from).collect();
    collect_scenarios(&inputs, config)
}

/// Collect labelled scenarios. Fails as a whole on the first error (by
/// scenario order); no partial results are returned.
pub fn collect_scenarios(inputs: &[ScenarioInput], config: &Config) -> Result<Collection> {
    let reduced: Vec<Reduced> = if config.parallel() {
        // Gather everything, then report the lowest-index failure so the
        // outcome matches the sequential run.
        inputs
            .par_iter()
            .enumerate()
            .map(|(index, input)| reduce_scenario(index, input, config))
            .collect::<Vec<Result<Reduced>>>()
            .into_iter()
            .collect::<Result<_>>()?
    } else {
        inputs
            .iter()
            .enumerate()
            .map(|(index, input)| reduce_scenario(index, input, config))
            .collect::<Result<_>>()?
    };

    let (meta, series): (Vec<_>, Vec<_>) = reduced
        .into_iter()
        .map(|r| ((r.blobs, r.shape), r.series))
        .unzip();
    let series = normalize(series, config.normalization())?;

    let scenarios = inputs
        .iter()
        .zip(meta)
        .zip(series)
        .map(|((input, (blobs, shape)), series)| ScenarioSeries {
            label: input.label.clone(),
            locator: input.locator.to_string(),
            blobs,
            shape,
            summary: summarize(&series),
            series,
        })
        .collect();

    Ok(Collection {
        config: config.summary(),
        scenarios,
    })
}

struct Reduced {
    blobs: usize,
    shape: (usize, usize),
    series: Series,
}

fn reduce_scenario(index: usize, input: &ScenarioInput, config: &Config) -> Result<Reduced> {
    reduce_grid(input, config)
        .map(|(blobs, grid)| Reduced {
            blobs,
            shape: grid.shape(),
            series: grid.into_series(),
        })
        .map_err(|e| e.in_scenario(index, &input.label))
}

fn reduce_grid(input: &ScenarioInput, config: &Config) -> Result<(usize, Grid)> {
    let blobs = input.locator.resolve(config.entry_pattern())?;
    let count = blobs.len();
    log::info!(
        "scenario '{}': {} grid(s) from {}",
        input.label,
        count,
        input.locator
    );

    let size = config.size();
    let grids: Vec<Grid> = if config.parallel() {
        blobs
            .par_iter()
            .map(|b| grid::parse_grid(b, size))
            .collect::<Vec<Result<Grid>>>()
            .into_iter()
            .collect::<Result<_>>()?
    } else {
        blobs
            .iter()
            .map(|b| grid::parse_grid(b, size))
            .collect::<Result<_>>()?
    };

    let summed = grid::sum_grids(&input.locator.to_string(), grids)?;
    let cropped = grid::crop(summed, config.radius(), config.drop())?;
    let sampled = match config.sampling() {
        Some(sampling) => grid::sample(cropped, sampling)?,
        None => cropped,
    };

    Ok((count, sampled))
}
