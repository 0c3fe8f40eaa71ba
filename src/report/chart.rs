use crate::lookup::{bucket_values, Bucket, QueryResult};
use barplot::{Bar, BarPlot};

pub const Y_AXIS_LABEL: &str = "Total PRS Score";

/// What the chart area shows for a result.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Plot(BarPlot),
    Placeholder(String),
}

pub fn risk_chart(result: &QueryResult) -> ChartView {
    let gene_name = &result.resolved_gene_name;
    let values = bucket_values(result.prs_score, result.bucket);
    let bars: Vec<Bar> = Bucket::ALL
        .iter()
        .zip(values)
        .map(|(bucket, value)| Bar::new(bucket.label(), value, bucket.color()))
        .collect();
    let plot = BarPlot::new(
        format!("PRS Distribution for {}", gene_name),
        Y_AXIS_LABEL,
        bars,
    );

    if plot.has_data() {
        ChartView::Plot(plot)
    } else {
        ChartView::Placeholder(format!("No PRS data available for {}", gene_name))
    }
}
