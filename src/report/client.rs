use serde::Deserialize;
use serde_json::Value;

use super::query::ReportQuery;
use super::types::{ColumnHeader, ReportResponse};
use crate::auth::AccessToken;
use crate::error::ReportError;
use crate::http::HttpTransport;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReport {
    #[serde(default)]
    column_headers: Vec<ColumnHeader>,
    #[serde(default)]
    rows: Option<Vec<Vec<Value>>>,
}

fn error_message(error: &Value) -> String {
    match error.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

/// Decode a report body; the service reports application errors inside a JSON `error`
pub(crate) fn parse_report(body: &str) -> Result<ReportResponse, ReportError> {
    let json: Value = serde_json::from_str(body)
        .map_err(|_| ReportError::InvalidResponse("invalid JSON".to_string()))?;
    let Some(object) = json.as_object() else {
        return Err(ReportError::InvalidResponse("invalid JSON".to_string()));
    };
    if let Some(error) = object.get("error") {
        return Err(ReportError::InvalidResponse(error_message(error)));
    }

    let raw: RawReport = serde_json::from_value(json)
        .map_err(|e| ReportError::InvalidResponse(format!("unexpected report shape: {e}")))?;
    Ok(ReportResponse {
        column_headers: raw.column_headers,
        rows: raw.rows.unwrap_or_default(),
    })
}

pub(crate) struct ReportClient<'a> {
    transport: &'a dyn HttpTransport,
}

impl<'a> ReportClient<'a> {
    pub(crate) fn new(transport: &'a dyn HttpTransport) -> Self {
        Self { transport }
    }

    pub(crate) fn execute(
        &self,
        query: &ReportQuery,
        token: &AccessToken,
    ) -> Result<ReportResponse, ReportError> {
        let url = query.build(token.as_str())?;
        tracing::debug!(
            ids = query.ids(),
            start = ?query.start_date(),
            end = ?query.end_date(),
            metrics = %query.metrics().join(","),
            dimensions = %query.dimensions().join(","),
            sort = %query.sorts().join(","),
            max_results = query.max_results(),
            "querying report"
        );

        let response = self.transport.get(&url)?;
        let report = parse_report(&response.body)?;
        tracing::debug!(
            status = response.status,
            rows = report.rows.len(),
            columns = %report.column_names().join(","),
            "report received"
        );
        Ok(report)
    }
}
