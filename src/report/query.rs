//! Report request descriptor
//!
//! List setters replace the previous contents, `add_*` appends. `build`
//! serializes everything into the request URL.

use chrono::NaiveDate;

use super::window::DateRange;
use crate::consts::{DATE_FORMAT, DEFAULT_MAX_RESULTS, REPORTS_URL};
use crate::error::QueryError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReportQuery {
    ids: String,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    metrics: Vec<String>,
    dimensions: Vec<String>,
    sorts: Vec<String>,
    filters: Vec<String>,
    segment: Option<String>,
    start_index: u32,
    max_results: u32,
    pretty_print: bool,
    callback: Option<String>,
}

fn collect<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl ReportQuery {
    pub(crate) fn new(ids: impl Into<String>) -> Self {
        Self {
            ids: ids.into(),
            start_date: None,
            end_date: None,
            metrics: Vec::new(),
            dimensions: Vec::new(),
            sorts: Vec::new(),
            filters: Vec::new(),
            segment: None,
            start_index: 1,
            max_results: DEFAULT_MAX_RESULTS,
            pretty_print: false,
            callback: None,
        }
    }

    pub(crate) fn ids(&self) -> &str {
        &self.ids
    }

    pub(crate) fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub(crate) fn set_start_date(&mut self, date: Option<NaiveDate>) -> &mut Self {
        self.start_date = date;
        self
    }

    pub(crate) fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub(crate) fn set_end_date(&mut self, date: Option<NaiveDate>) -> &mut Self {
        self.end_date = date;
        self
    }

    pub(crate) fn set_date_range(&mut self, range: DateRange) -> &mut Self {
        self.set_start_date(Some(range.start))
            .set_end_date(Some(range.end))
    }

    pub(crate) fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub(crate) fn set_metrics<I, S>(&mut self, metrics: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = collect(metrics);
        self
    }

    pub(crate) fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub(crate) fn set_dimensions<I, S>(&mut self, dimensions: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions = collect(dimensions);
        self
    }

    pub(crate) fn sorts(&self) -> &[String] {
        &self.sorts
    }

    pub(crate) fn set_sorts<I, S>(&mut self, sorts: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sorts = collect(sorts);
        self
    }

    pub(crate) fn set_filters<I, S>(&mut self, filters: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters = collect(filters);
        self
    }

    pub(crate) fn set_segment(&mut self, segment: Option<String>) -> &mut Self {
        self.segment = segment;
        self
    }

    pub(crate) fn set_start_index(&mut self, start_index: u32) -> &mut Self {
        self.start_index = start_index;
        self
    }

    pub(crate) fn max_results(&self) -> u32 {
        self.max_results
    }

    pub(crate) fn set_max_results(&mut self, max_results: u32) -> &mut Self {
        self.max_results = max_results;
        self
    }

    pub(crate) fn set_pretty_print(&mut self, pretty_print: bool) -> &mut Self {
        self.pretty_print = pretty_print;
        self
    }

    pub(crate) fn set_callback(&mut self, callback: Option<String>) -> &mut Self {
        self.callback = callback;
        self
    }

    /// Request URL for this query, authorised with `access_token`
    pub(crate) fn build(&self, access_token: &str) -> Result<String, QueryError> {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Err(QueryError::MissingDateRange);
        };

        let mut params: Vec<(&str, String)> = vec![
            ("dimensions", self.dimensions.join(",")),
            ("endDate", end.format(DATE_FORMAT).to_string()),
            ("ids", self.ids.clone()),
            ("maxResults", self.max_results.to_string()),
            ("metrics", self.metrics.join(",")),
            ("startDate", start.format(DATE_FORMAT).to_string()),
            ("access_token", access_token.to_string()),
            ("startIndex", self.start_index.to_string()),
        ];

        if let Some(segment) = self.segment.as_ref().filter(|s| !s.is_empty()) {
            params.push(("segment", segment.clone()));
        }
        if !self.filters.is_empty() {
            params.push(("filters", self.filters.join(",")));
        }
        if !self.sorts.is_empty() {
            params.push(("sort", self.sorts.join(",")));
        }
        if self.pretty_print {
            params.push(("prettyPrint", "true".to_string()));
        }
        if let Some(callback) = self.callback.as_ref().filter(|s| !s.is_empty()) {
            params.push(("callback", callback.clone()));
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        Ok(format!("{REPORTS_URL}?{query}"))
    }
}

// Builder surface not driven by the two weekly reports
#[allow(dead_code)]
impl ReportQuery {
    pub(crate) fn set_ids(&mut self, ids: impl Into<String>) -> &mut Self {
        self.ids = ids.into();
        self
    }

    pub(crate) fn add_metric(&mut self, metric: impl Into<String>) -> &mut Self {
        self.metrics.push(metric.into());
        self
    }

    pub(crate) fn add_dimension(&mut self, dimension: impl Into<String>) -> &mut Self {
        self.dimensions.push(dimension.into());
        self
    }

    pub(crate) fn add_sort(&mut self, sort: impl Into<String>) -> &mut Self {
        self.sorts.push(sort.into());
        self
    }

    pub(crate) fn add_filter(&mut self, filter: impl Into<String>) -> &mut Self {
        self.filters.push(filter.into());
        self
    }

    pub(crate) fn filters(&self) -> &[String] {
        &self.filters
    }

    pub(crate) fn start_index(&self) -> u32 {
        self.start_index
    }
}
