//! Downstream renderings of a collection: CSV summary table, JSON report,
//! console lines.

pub mod console;
pub mod json;
pub mod table;

pub use console::summary_lines;
pub use json::render_report;
pub use table::{SummaryRow, summary_rows, write_summary_csv};
