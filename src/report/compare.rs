//! Week-over-week comparison of two report periods
//!
//! The current period is fetched first and summarized into per-metric
//! totals and per-bucket values. The comparison period (the same range
//! shifted back one week) is fetched second, and each of its rows
//! updates the `accumulate` of one current bucket.

use super::client::ReportClient;
use super::query::ReportQuery;
use super::types::{Bucket, Comparison, Delta, PeriodTotals, ReportResponse, dimension_key, metric_value};
use super::window::DateRange;
use crate::auth::AccessToken;
use crate::error::ReportError;

/// How comparison rows are matched to current buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Alignment {
    /// Same dimension value; unmatched comparison rows are skipped
    Key,
    /// Nth comparison row against the Nth current bucket, keys ignored
    Position,
}

/// Signed percentage change from `previous` to `current`.
///
/// Not guarded: a zero `previous` yields an infinite or NaN result.
pub(crate) fn percent_change(current: f64, previous: f64) -> f64 {
    (current - previous) / previous * 100.0
}

/// Zero and empty values read as 1
fn zero_guard(value: f64) -> f64 {
    if value == 0.0 || value.is_nan() { 1.0 } else { value }
}

/// Percentage change with zeros replaced by 1 on both sides
pub(crate) fn guarded_percent_change(current: f64, previous: f64) -> f64 {
    percent_change(zero_guard(current), zero_guard(previous))
}

/// Sum every metric column across all rows
pub(crate) fn period_totals(response: &ReportResponse, metrics: &[String]) -> PeriodTotals {
    let mut totals = PeriodTotals::zeroed(metrics);
    for row in &response.rows {
        for (index, value) in totals.values.iter_mut().enumerate() {
            *value += metric_value(row, index);
        }
    }
    totals
}

/// Totals plus one bucket per distinct dimension value, in first-seen order.
///
/// A repeated dimension value replaces the earlier bucket's values in place.
pub(crate) fn summarize(response: &ReportResponse, metrics: &[String]) -> (PeriodTotals, Vec<Bucket>) {
    let mut buckets: Vec<Bucket> = Vec::new();
    for row in &response.rows {
        let key = dimension_key(row);
        let deltas = (0..metrics.len())
            .map(|index| Delta {
                total: metric_value(row, index),
                accumulate: 0.0,
            })
            .collect();
        match buckets.iter_mut().find(|b| b.key == key) {
            Some(existing) => existing.deltas = deltas,
            None => buckets.push(Bucket { key, deltas }),
        }
    }
    (period_totals(response, metrics), buckets)
}

/// A matched bucket keeps the guarded total, so a zero current value reads as 1
fn update_bucket(bucket: &mut Bucket, row: &[serde_json::Value]) {
    for (index, delta) in bucket.deltas.iter_mut().enumerate() {
        delta.total = zero_guard(delta.total);
        delta.accumulate = guarded_percent_change(delta.total, metric_value(row, index));
    }
}

/// Fill each bucket's `accumulate` from the comparison period rows
pub(crate) fn apply_comparison(buckets: &mut [Bucket], previous: &ReportResponse, alignment: Alignment) {
    match alignment {
        Alignment::Position => {
            for (bucket, row) in buckets.iter_mut().zip(&previous.rows) {
                update_bucket(bucket, row);
            }
        }
        Alignment::Key => {
            for row in &previous.rows {
                let key = dimension_key(row);
                match buckets.iter_mut().find(|b| b.key == key) {
                    Some(bucket) => update_bucket(bucket, row),
                    None => tracing::debug!(key = %key, "no current bucket for comparison row"),
                }
            }
        }
    }
}

pub(crate) struct Comparator<'a> {
    client: ReportClient<'a>,
}

impl<'a> Comparator<'a> {
    pub(crate) fn new(client: ReportClient<'a>) -> Self {
        Self { client }
    }

    /// Run `query` over `range` and over the week before it, then diff the two.
    ///
    /// Either fetch failing aborts the whole comparison.
    pub(crate) fn compare(
        &self,
        query: &ReportQuery,
        range: DateRange,
        alignment: Alignment,
        token: &AccessToken,
    ) -> Result<Comparison, ReportError> {
        let metrics = query.metrics().to_vec();
        let dimension = query.dimensions().join(",");
        let mut query = query.clone();

        query.set_date_range(range);
        let current_rows = self.client.execute(&query, token)?;
        if current_rows.is_empty() {
            tracing::debug!(range = %range, "current period returned no rows");
        }
        let (current, mut buckets) = summarize(&current_rows, &metrics);

        let previous_range = range.comparison();
        query.set_date_range(previous_range);
        let previous_rows = self.client.execute(&query, token)?;
        let previous = period_totals(&previous_rows, &metrics);

        apply_comparison(&mut buckets, &previous_rows, alignment);

        let totals = current
            .values
            .iter()
            .zip(&previous.values)
            .map(|(&now, &before)| Delta {
                total: now,
                accumulate: percent_change(now, before),
            })
            .collect();

        tracing::debug!(
            current = %range,
            previous = %previous_range,
            buckets = buckets.len(),
            "comparison complete"
        );

        Ok(Comparison {
            metrics,
            dimension,
            current_range: range,
            previous_range,
            current,
            previous,
            totals,
            buckets,
        })
    }
}
