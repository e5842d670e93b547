//! Per-scenario descriptive statistics.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    /// Sample standard deviation over sqrt(count). NaN below two values.
    pub stderr: f64,
    pub count: usize,
}

pub fn summarize(values: &[f64]) -> Summary {
    let count = values.len();
    if count == 0 {
        return Summary {
            mean: f64::NAN,
            stderr: f64::NAN,
            count,
        };
    }

    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let stderr = if count < 2 {
        f64::NAN
    } else {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1.0)).sqrt() / n.sqrt()
    };

    Summary {
        mean,
        stderr,
        count,
    }
}
