//! Dense row-major grids and the per-scenario grid stages.
//!
//! Stage order inside one scenario:
//! parse (per blob) -> sum -> crop -> sample (optional) -> flatten.

pub mod crop;
pub mod parse;
pub mod sample;
pub mod sum;

pub use crop::crop;
pub use parse::parse_grid;
pub use sample::sample;
pub use sum::sum_grids;

/// Row-major matrix of cell values. `x` is the column, `y` the row.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Grid {
    /// Build from row-major `data`. Returns `None` if the length is not
    /// `rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == rows * cols).then_some(Grid { rows, cols, data })
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Grid {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Build by evaluating `f(x, y)` for every cell.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for y in 0..rows {
            for x in 0..cols {
                data.push(f(x, y));
            }
        }
        Grid { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.cols && y < self.rows).then(|| self.data[y * self.cols + x])
    }

    pub fn row(&self, y: usize) -> &[f64] {
        &self.data[y * self.cols..(y + 1) * self.cols]
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    /// Row-major flatten, consuming the grid.
    pub fn into_series(self) -> Vec<f64> {
        self.data
    }
}
