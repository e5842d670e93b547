//! Text grid parsing.
//!
//! Expected layout: one grid row per line, fields separated by commas,
//! semicolons, tabs or runs of spaces.
//!
//! Example (size = 3, as written by the simulation's CSV dump):
//! 0,1.5,2,
//! 3,4,5,
//! 6,7,8,
//!
//! Trailing empty fields on a line and trailing blank lines are dropped
//! before the shape is checked.

use crate::error::{Axis, CollectError, Result};
use crate::grid::Grid;
use crate::source::RawBlob;

use regex::Regex;
use std::sync::LazyLock;

static FIELD_SEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[,;]\s*|\s+").expect("separator pattern compiles"));

/// Parse one blob into a `size x size` grid.
pub fn parse_grid(blob: &RawBlob, size: usize) -> Result<Grid> {
    let origin = blob.origin.as_str();

    let mut lines: Vec<(usize, &str)> = blob
        .text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .collect();
    while lines.last().is_some_and(|(_, l)| l.is_empty()) {
        lines.pop();
    }

    if lines.len() != size {
        return Err(CollectError::ShapeMismatch {
            origin: origin.to_string(),
            axis: Axis::Rows,
            expected: size,
            found: lines.len(),
            line: None,
        });
    }

    let mut data = Vec::with_capacity(size * size);
    for (lno, line) in lines {
        let mut fields: Vec<&str> = FIELD_SEP.split(line).collect();
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }

        if fields.len() != size {
            return Err(CollectError::ShapeMismatch {
                origin: origin.to_string(),
                axis: Axis::Columns,
                expected: size,
                found: fields.len(),
                line: Some(lno),
            });
        }

        for (col, field) in fields.into_iter().enumerate() {
            let value = field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| CollectError::MalformedNumber {
                    origin: origin.to_string(),
                    line: lno,
                    column: col + 1,
                    token: field.to_string(),
                })?;
            data.push(value);
        }
    }

    log::debug!("{}: parsed {}x{} grid", origin, size, size);

    Ok(Grid {
        rows: size,
        cols: size,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blob(text: &str) -> RawBlob {
        RawBlob {
            origin: "test.csv".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn parses_csv_with_trailing_comma_and_blank_line() {
        let g = parse_grid(&blob("1,2,\n3,4.5,\n\n"), 2).unwrap();
        assert_eq!(g.into_series(), vec![1.0, 2.0, 3.0, 4.5]);
    }

    #[test]
    fn accepts_whitespace_and_semicolons() {
        let g = parse_grid(&blob("  1  2\t3\n4;5; 6\n7 , 8 ,9\n"), 3).unwrap();
        assert_eq!(
            g.into_series(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]
        );
    }

    #[test]
    fn accepts_scientific_notation() {
        let g = parse_grid(&blob("1e3,2.5E-1\n0,0\n"), 2).unwrap();
        assert_eq!(g.get(0, 0), Some(1000.0));
        assert_eq!(g.get(1, 0), Some(0.25));
    }

    #[test]
    fn wrong_row_count_is_shape_mismatch() {
        let err = parse_grid(&blob("1,2\n3,4\n5,6\n"), 2).unwrap_err();
        match err {
            CollectError::ShapeMismatch {
                axis,
                expected,
                found,
                ..
            } => {
                assert_eq!(axis, Axis::Rows);
                assert_eq!((expected, found), (2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_row_reports_line() {
        let err = parse_grid(&blob("1,2\n3\n"), 2).unwrap_err();
        match err {
            CollectError::ShapeMismatch { axis, line, .. } => {
                assert_eq!(axis, Axis::Columns);
                assert_eq!(line, Some(2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_is_malformed() {
        let err = parse_grid(&blob("1,x\n3,4\n"), 2).unwrap_err();
        match err {
            CollectError::MalformedNumber {
                line, column, token, ..
            } => {
                assert_eq!((line, column), (1, 2));
                assert_eq!(token, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn interior_empty_field_is_malformed() {
        let err = parse_grid(&blob("1,,2\n3,4,5\n6,7,8\n"), 3).unwrap_err();
        assert!(matches!(err, CollectError::MalformedNumber { column: 2, .. }));
    }

    #[test]
    fn non_finite_is_malformed() {
        let err = parse_grid(&blob("1,NaN\n3,4\n"), 2).unwrap_err();
        assert!(matches!(err, CollectError::MalformedNumber { .. }));
    }
}
