use crate::cli::QueryArgs;
use crate::lookup::resolve_query;
use crate::report::{render_chart, risk_chart, write_html_report, write_result, ChartView};
use crate::store::{load_failure_message, load_into, DataStore};
use crate::utils::Result;
use std::io::Write;

pub fn query(args: QueryArgs) -> Result<()> {
    let store = DataStore::new();
    load_into(&store, &args.data).map_err(|e| load_failure_message(&args.data, &e))?;

    let result = resolve_query(&args.query, &store).map_err(|e| e.to_string())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, &result).map_err(|e| e.to_string())?;

    if let Some(html_path) = &args.html_path {
        write_html_report(&result, html_path)?;
        log::info!("Wrote table to {}", html_path.display());
    }

    let placeholder = match &args.chart_path {
        Some(chart_path) => render_chart(&result, chart_path)?,
        None => match risk_chart(&result) {
            ChartView::Placeholder(placeholder) => Some(placeholder),
            ChartView::Plot(_) => None,
        },
    };
    if let Some(placeholder) = placeholder {
        writeln!(out, "{}", placeholder).map_err(|e| e.to_string())?;
    }

    Ok(())
}
