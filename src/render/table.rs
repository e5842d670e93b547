//! Tabular summary export (label, mean, standard error).

use crate::model::Collection;

use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub label: String,
    pub mean: f64,
    pub stderr: f64,
    pub count: usize,
}

pub fn summary_rows(data: &Collection) -> Vec<SummaryRow> {
    data.scenarios
        .iter()
        .map(|s| SummaryRow {
            label: s.label.clone(),
            mean: s.summary.mean,
            stderr: s.summary.stderr,
            count: s.summary.count,
        })
        .collect()
}

/// Write `label,mean,stderr,count` rows with a header line.
pub fn write_summary_csv<W: Write>(writer: W, rows: &[SummaryRow]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
