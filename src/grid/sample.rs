//! Periodic decimation: keep every `shift`-th cell on both axes, anchored so
//! that `center` is one of the kept cells.

use crate::config::Sampling;
use crate::error::{CollectError, Result};
use crate::grid::Grid;

pub fn sample(grid: Grid, sampling: Sampling) -> Result<Grid> {
    let Sampling { shift, center } = sampling;
    let (cx, cy) = center;

    if shift == 0 {
        return Err(CollectError::InvalidConfig(
            "repeat_shift must be a positive stride".to_string(),
        ));
    }
    if cx >= grid.cols || cy >= grid.rows {
        return Err(CollectError::InvalidConfig(format!(
            "repeat_center ({}, {}) lies outside the {}x{} grid",
            cx, cy, grid.cols, grid.rows
        )));
    }

    let xs: Vec<usize> = (cx % shift..grid.cols).step_by(shift).collect();
    let ys: Vec<usize> = (cy % shift..grid.rows).step_by(shift).collect();

    let mut data = Vec::with_capacity(xs.len() * ys.len());
    for &y in &ys {
        let row = grid.row(y);
        data.extend(xs.iter().map(|&x| row[x]));
    }
    log::debug!(
        "sampled {}x{} grid every {} cells around ({}, {}): {}x{} kept",
        grid.cols,
        grid.rows,
        shift,
        cx,
        cy,
        xs.len(),
        ys.len()
    );

    Ok(Grid {
        rows: ys.len(),
        cols: xs.len(),
        data,
    })
}
