//! Report response and comparison result types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::window::DateRange;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct ColumnHeader {
    pub(crate) name: String,
}

/// Tabular report rows: `[dimension, metric_1, metric_2, ...]`
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ReportResponse {
    pub(crate) column_headers: Vec<ColumnHeader>,
    pub(crate) rows: Vec<Vec<Value>>,
}

impl ReportResponse {
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        Self {
            column_headers: Vec::new(),
            rows,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn column_names(&self) -> Vec<&str> {
        self.column_headers.iter().map(|h| h.name.as_str()).collect()
    }
}

/// Dimension value of a row as a bucket key
pub(crate) fn dimension_key(row: &[Value]) -> String {
    match row.first() {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Value of metric `index` in a row; missing, null and non-numeric cells read as zero
pub(crate) fn metric_value(row: &[Value], index: usize) -> f64 {
    match row.get(index + 1) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Per-metric sums over one period, in query metric order
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PeriodTotals {
    pub(crate) metrics: Vec<String>,
    pub(crate) values: Vec<f64>,
}

impl PeriodTotals {
    pub(crate) fn zeroed(metrics: &[String]) -> Self {
        Self {
            metrics: metrics.to_vec(),
            values: vec![0.0; metrics.len()],
        }
    }

    #[cfg(test)]
    pub(crate) fn get(&self, metric: &str) -> Option<f64> {
        self.metrics
            .iter()
            .position(|m| m == metric)
            .map(|i| self.values[i])
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.metrics
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Current value and its percentage change against the comparison period
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub(crate) struct Delta {
    pub(crate) total: f64,
    pub(crate) accumulate: f64,
}

/// One dimension value (a day, a video) with a delta per metric
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Bucket {
    pub(crate) key: String,
    pub(crate) deltas: Vec<Delta>,
}

/// Week-over-week result of one report
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Comparison {
    pub(crate) metrics: Vec<String>,
    pub(crate) dimension: String,
    pub(crate) current_range: DateRange,
    pub(crate) previous_range: DateRange,
    pub(crate) current: PeriodTotals,
    pub(crate) previous: PeriodTotals,
    /// Period totals with their (unguarded) change, per metric
    pub(crate) totals: Vec<Delta>,
    pub(crate) buckets: Vec<Bucket>,
}
