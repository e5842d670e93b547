use crate::model::Collection;

/// One aligned `label  mean ± stderr  (n values)` line per scenario.
pub fn summary_lines(data: &Collection) -> Vec<String> {
    let width = data
        .scenarios
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);

    data.scenarios
        .iter()
        .map(|s| {
            format!(
                "{:<width$}  {:.6} ± {:.6}  ({} values)",
                s.label,
                s.summary.mean,
                s.summary.stderr,
                s.summary.count,
                width = width
            )
        })
        .collect()
}
