use comfy_table::{Cell, Color, Table};

use crate::output::format::{
    NumberFormat, change_color, create_styled_table, format_metric, format_percent, header_cell,
    metric_label, right_cell, styled_cell,
};
use crate::report::{Bucket, Comparison, Delta, ReportKind};

#[derive(Debug, Clone, Copy)]
pub(crate) struct ComparisonTableOptions {
    pub(crate) use_color: bool,
    pub(crate) number_format: NumberFormat,
}

fn delta_cell(delta: &Delta, opts: &ComparisonTableOptions, bold: bool) -> Cell {
    let text = format!(
        "{} ({})",
        format_metric(delta.total, opts.number_format),
        format_percent(delta.accumulate, opts.number_format)
    );
    right_cell(&text, change_color(delta.accumulate, opts.use_color), bold)
}

fn bucket_row(bucket: &Bucket, opts: &ComparisonTableOptions) -> Vec<Cell> {
    let mut row = vec![Cell::new(&bucket.key)];
    row.extend(bucket.deltas.iter().map(|d| delta_cell(d, opts, false)));
    row
}

fn build_table(kind: ReportKind, comparison: &Comparison, opts: &ComparisonTableOptions) -> Table {
    let c = opts.use_color;
    let cyan = if c { Some(Color::Cyan) } else { None };

    let mut table = create_styled_table();
    let mut header = vec![header_cell(kind.label(), c)];
    header.extend(comparison.metrics.iter().map(|m| header_cell(metric_label(m), c)));
    table.set_header(header);

    for bucket in &comparison.buckets {
        table.add_row(bucket_row(bucket, opts));
    }

    let mut previous = vec![styled_cell("PREVIOUS", None, false)];
    previous.extend(
        comparison
            .previous
            .values
            .iter()
            .map(|v| right_cell(&format_metric(*v, opts.number_format), None, false)),
    );
    table.add_row(previous);

    let mut total = vec![styled_cell("TOTAL", cyan, true)];
    total.extend(comparison.totals.iter().map(|d| delta_cell(d, opts, true)));
    table.add_row(total);

    table
}

fn title(kind: ReportKind, comparison: &Comparison) -> String {
    let name = match kind {
        ReportKind::Channel => "Channel Performance",
        ReportKind::Video => "Video Performance",
    };
    format!(
        "{name}: {} (vs {})",
        comparison.current_range, comparison.previous_range
    )
}

pub(crate) fn render_comparison_table(
    kind: ReportKind,
    comparison: &Comparison,
    opts: ComparisonTableOptions,
) -> String {
    let table = build_table(kind, comparison, &opts);
    let mut out = format!("\n  {}\n\n{table}\n", title(kind, comparison));
    if comparison.buckets.is_empty() {
        out.push_str("\n  No rows returned for this period\n");
    }
    out
}
