//! Pool repeated sub-runs of one scenario into a single grid.

use crate::error::{Axis, CollectError, Result};
use crate::grid::Grid;

/// Elementwise sum of `grids`. A single grid is returned as is.
///
/// `locator` only labels errors.
pub fn sum_grids(locator: &str, grids: Vec<Grid>) -> Result<Grid> {
    let mut iter = grids.into_iter();
    let mut total = iter.next().ok_or_else(|| CollectError::EmptyScenario {
        locator: locator.to_string(),
    })?;

    for grid in iter {
        if grid.rows != total.rows {
            return Err(shape_mismatch(locator, Axis::Rows, total.rows, grid.rows));
        }
        if grid.cols != total.cols {
            return Err(shape_mismatch(locator, Axis::Columns, total.cols, grid.cols));
        }
        for (acc, v) in total.data.iter_mut().zip(grid.data) {
            *acc += v;
        }
    }

    Ok(total)
}

fn shape_mismatch(locator: &str, axis: Axis, expected: usize, found: usize) -> CollectError {
    CollectError::ShapeMismatch {
        origin: locator.to_string(),
        axis,
        expected,
        found,
        line: None,
    }
}
