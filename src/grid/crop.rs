//! Centered crop with right/bottom trimming.
//!
//! Window placement along one axis of length `n` with radius `r`:
//! start = (n - 2r) / 2 (integer division), so for an odd remainder the
//! window sits one cell toward the lower index. Drops are applied after
//! centering: `dropx` columns off the right edge, `dropy` rows off the
//! bottom edge.

use crate::error::{CollectError, Result};
use crate::grid::Grid;

/// Placement of a crop window inside a `rows x cols` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropWindow {
    pub x0: usize,
    pub y0: usize,
    pub cols: usize,
    pub rows: usize,
}

impl CropWindow {
    /// Geometric center of the window in its own coordinates, rounded
    /// toward the lower index.
    pub fn default_anchor(&self) -> (usize, usize) {
        (self.cols.saturating_sub(1) / 2, self.rows.saturating_sub(1) / 2)
    }
}

/// Compute the window for `radius = (rx, ry)` and `drop = (dropx, dropy)`.
pub fn crop_window(
    rows: usize,
    cols: usize,
    radius: (usize, usize),
    drop: (usize, usize),
) -> Result<CropWindow> {
    let (rx, ry) = radius;
    let (dropx, dropy) = drop;

    if rx == 0 || ry == 0 {
        return Err(CollectError::CropOutOfBounds(format!(
            "radius ({}, {}) must be positive",
            rx, ry
        )));
    }

    let (width, height) = match (rx.checked_mul(2), ry.checked_mul(2)) {
        (Some(w), Some(h)) => (w, h),
        _ => {
            return Err(CollectError::CropOutOfBounds(format!(
                "radius ({}, {}) does not fit a {}x{} grid",
                rx, ry, cols, rows
            )));
        }
    };
    if width > cols || height > rows {
        return Err(CollectError::CropOutOfBounds(format!(
            "radius ({}, {}) needs a {}x{} window but the grid is {}x{}",
            rx, ry, width, height, cols, rows
        )));
    }
    if dropx >= width || dropy >= height {
        return Err(CollectError::CropOutOfBounds(format!(
            "drop ({}, {}) leaves nothing of the {}x{} window",
            dropx, dropy, width, height
        )));
    }

    Ok(CropWindow {
        x0: (cols - width) / 2,
        y0: (rows - height) / 2,
        cols: width - dropx,
        rows: height - dropy,
    })
}

/// Extract the centered window, then trim the drops.
pub fn crop(grid: Grid, radius: (usize, usize), drop: (usize, usize)) -> Result<Grid> {
    let w = crop_window(grid.rows, grid.cols, radius, drop)?;

    if w.x0 == 0 && w.y0 == 0 && w.cols == grid.cols && w.rows == grid.rows {
        return Ok(grid);
    }

    let mut data = Vec::with_capacity(w.rows * w.cols);
    for y in w.y0..w.y0 + w.rows {
        data.extend_from_slice(&grid.row(y)[w.x0..w.x0 + w.cols]);
    }
    log::debug!(
        "cropped {}x{} grid to {}x{} at ({}, {})",
        grid.cols,
        grid.rows,
        w.cols,
        w.rows,
        w.x0,
        w.y0
    );

    Ok(Grid {
        rows: w.rows,
        cols: w.cols,
        data,
    })
}
