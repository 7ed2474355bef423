use serde_json::{Map, Value, json};

use crate::auth::AccessToken;
use crate::consts::DATE_FORMAT;
use crate::output::format::json_number;
use crate::report::{Comparison, DateRange, Delta};

fn range_json(range: DateRange) -> Value {
    json!({
        "startDate": range.start.format(DATE_FORMAT).to_string(),
        "endDate": range.end.format(DATE_FORMAT).to_string(),
    })
}

fn delta_json(delta: &Delta) -> Value {
    json!({
        "total": json_number(delta.total),
        "accumulate": json_number(delta.accumulate),
    })
}

/// `{"period", "comparisonPeriod", "data": {metric: {bucket: delta}}, "count": {metric: delta}}`
pub(crate) fn comparison_json(comparison: &Comparison) -> Value {
    let mut data = Map::new();
    let mut count = Map::new();

    for (index, metric) in comparison.metrics.iter().enumerate() {
        let buckets: Map<String, Value> = comparison
            .buckets
            .iter()
            .filter_map(|bucket| {
                bucket
                    .deltas
                    .get(index)
                    .map(|delta| (bucket.key.clone(), delta_json(delta)))
            })
            .collect();
        data.insert(metric.clone(), Value::Object(buckets));

        if let Some(total) = comparison.totals.get(index) {
            count.insert(metric.clone(), delta_json(total));
        }
    }

    json!({
        "period": range_json(comparison.current_range),
        "comparisonPeriod": range_json(comparison.previous_range),
        "data": data,
        "count": count,
    })
}

pub(crate) fn output_comparison_json(comparison: &Comparison) -> String {
    serde_json::to_string_pretty(&comparison_json(comparison)).unwrap_or_else(|e| {
        tracing::error!("failed to serialize report: {e}");
        "{}".to_string()
    })
}

pub(crate) fn output_token_json(token: &AccessToken) -> String {
    let value = json!({ "access_token": token.as_str() });
    serde_json::to_string_pretty(&value).unwrap_or_else(|e| {
        tracing::error!("failed to serialize token: {e}");
        "{}".to_string()
    })
}
