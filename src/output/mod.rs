mod format;
mod json;
mod table;

pub(crate) use format::NumberFormat;
pub(crate) use json::{output_comparison_json, output_token_json};
pub(crate) use table::{ComparisonTableOptions, render_comparison_table};
