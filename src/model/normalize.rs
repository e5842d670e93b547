//! Cross-scenario normalization.

use crate::config::Normalization;
use crate::diagnostics;
use crate::error::{CollectError, Result};
use crate::model::Series;

/// Rescale every series against the reference scenario, or pass them through.
///
/// A zero reference cell is not an error: the quotient becomes NaN (0/0) or
/// infinite (x/0) in that position and a warning is logged.
pub fn normalize(series: Vec<Series>, normalization: Normalization) -> Result<Vec<Series>> {
    let reference = match normalization {
        Normalization::Absolute => return Ok(series),
        Normalization::Reference(index) => index,
    };

    let Some(divisor) = series.get(reference).cloned() else {
        return Err(CollectError::IndexOutOfRange {
            index: reference,
            scenarios: series.len(),
        });
    };

    for (index, s) in series.iter().enumerate() {
        if s.len() != divisor.len() {
            return Err(CollectError::LengthMismatch {
                index,
                expected: divisor.len(),
                found: s.len(),
            });
        }
    }

    let zeros = divisor.iter().filter(|&&d| d == 0.0).count();
    if zeros > 0 {
        diagnostics::warn(format!(
            "normalization reference {} has {} zero cell(s); those positions become NaN or infinite",
            reference, zeros
        ));
    }

    Ok(series
        .into_iter()
        .map(|s| s.iter().zip(&divisor).map(|(v, d)| v / d).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absolute_is_identity() {
        let input = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            normalize(input.clone(), Normalization::Absolute).unwrap(),
            input
        );
    }

    #[test]
    fn reference_becomes_ones() {
        let input = vec![vec![2.0, 4.0, 8.0], vec![1.0, 1.0, 2.0]];
        let out = normalize(input, Normalization::Reference(1)).unwrap();
        assert_eq!(out[1], vec![1.0, 1.0, 1.0]);
        assert_eq!(out[0], vec![2.0, 4.0, 4.0]);
    }

    #[test]
    fn zero_reference_cell_propagates() {
        let input = vec![vec![0.0, 3.0, 1.0], vec![0.0, 0.0, 1.0]];
        let out = normalize(input, Normalization::Reference(1)).unwrap();
        assert!(out[0][0].is_nan());
        assert!(out[0][1].is_infinite());
        assert_eq!(out[0][2], 1.0);
    }

    #[test]
    fn bad_index_and_lengths() {
        let err = normalize(vec![vec![1.0]], Normalization::Reference(1)).unwrap_err();
        assert!(matches!(
            err,
            CollectError::IndexOutOfRange {
                index: 1,
                scenarios: 1
            }
        ));

        let err =
            normalize(vec![vec![1.0], vec![1.0, 2.0]], Normalization::Reference(0)).unwrap_err();
        assert!(matches!(
            err,
            CollectError::LengthMismatch {
                index: 1,
                expected: 1,
                found: 2
            }
        ));
    }
}
