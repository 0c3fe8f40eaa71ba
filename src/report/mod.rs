mod chart;
mod table;

pub use chart::{risk_chart, ChartView, Y_AXIS_LABEL};
use table::escape_html;
pub use table::{format_value, ResultTable};

use crate::lookup::QueryResult;
use crate::utils::Result;
use barplot::generate_image;
use std::io::Write;
use std::path::Path;

/// Prints the result table followed by the score summary.
pub fn write_result<W: Write>(out: &mut W, result: &QueryResult) -> std::io::Result<()> {
    let table = ResultTable::from_result(result);
    writeln!(out, "{}", table.to_text())?;
    writeln!(out)?;
    writeln!(out, "{}", score_summary(result))
}

pub fn score_summary(result: &QueryResult) -> String {
    format!(
        "PRS score for {} ({} variants): {:.4} [{}]",
        result.resolved_gene_name,
        result.matched_records.len(),
        result.prs_score,
        result.bucket
    )
}

/// Writes a standalone HTML page holding the result table.
pub fn write_html_report(result: &QueryResult, path: &Path) -> Result<()> {
    let table = ResultTable::from_result(result);
    let title = escape_html(&format!("Variants for {}", result.resolved_gene_name));
    let html = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n<body>\n{}\n<p>{}</p>\n</body>\n</html>\n",
        table.to_html(),
        escape_html(&score_summary(result)),
    );
    std::fs::write(path, html).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Renders the chart for `result` to `path`, or returns the placeholder text
/// when there is nothing to draw. Any previous image at `path` is replaced.
pub fn render_chart(result: &QueryResult, path: &Path) -> Result<Option<String>> {
    match risk_chart(result) {
        ChartView::Plot(plot) => {
            generate_image(&plot, path)?;
            log::info!("Wrote chart to {}", path.display());
            Ok(None)
        }
        ChartView::Placeholder(message) => Ok(Some(message)),
    }
}
