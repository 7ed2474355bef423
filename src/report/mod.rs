//! Report queries, execution and week-over-week comparison

mod client;
mod compare;
mod query;
mod types;
mod window;

use clap::ValueEnum;

pub(crate) use client::ReportClient;
pub(crate) use compare::{Alignment, Comparator};
pub(crate) use query::ReportQuery;
pub(crate) use types::{Bucket, Comparison, Delta};
pub(crate) use window::DateRange;

use crate::consts::{DEFAULT_CHANNEL, REPORT_MAX_RESULTS};
use crate::error::AppError;

const CHANNEL_METRICS: &[&str] = &[
    "views",
    "comments",
    "likes",
    "dislikes",
    "estimatedMinutesWatched",
    "subscribersGained",
    "subscribersLost",
];

const VIDEO_METRICS: &[&str] = &[
    "estimatedMinutesWatched",
    "views",
    "likes",
    "subscribersGained",
];

const VIDEO_DEFAULT_SORT: &str = "-estimatedMinutesWatched";

/// The two supported report shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportKind {
    /// Channel totals per day
    Channel,
    /// Top videos by watch time
    Video,
}

impl ReportKind {
    pub(crate) fn metrics(self) -> &'static [&'static str] {
        match self {
            ReportKind::Channel => CHANNEL_METRICS,
            ReportKind::Video => VIDEO_METRICS,
        }
    }

    pub(crate) fn dimension(self) -> &'static str {
        match self {
            ReportKind::Channel => "day",
            ReportKind::Video => "video",
        }
    }

    /// Days are dates that differ between the two weeks, so they pair by position
    pub(crate) fn alignment(self) -> Alignment {
        match self {
            ReportKind::Channel => Alignment::Position,
            ReportKind::Video => Alignment::Key,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            ReportKind::Channel => "Day",
            ReportKind::Video => "Video",
        }
    }

    /// Validated sort expression; channel reports are never sorted
    pub(crate) fn sort(self, requested: Option<&str>) -> Result<Option<String>, AppError> {
        match self {
            ReportKind::Channel => Ok(None),
            ReportKind::Video => {
                let Some(sort) = requested.map(str::trim).filter(|s| !s.is_empty()) else {
                    return Ok(Some(VIDEO_DEFAULT_SORT.to_string()));
                };
                let metric = sort.strip_prefix('-').unwrap_or(sort);
                if VIDEO_METRICS.contains(&metric) {
                    Ok(Some(sort.to_string()))
                } else {
                    Err(AppError::InvalidSort {
                        input: sort.to_string(),
                        allowed: VIDEO_METRICS.join(", "),
                    })
                }
            }
        }
    }

    /// Query template for this report, without a date range
    pub(crate) fn query(self, channel_id: Option<&str>, sort: Option<&str>) -> Result<ReportQuery, AppError> {
        let sort = self.sort(sort)?;
        let channel = channel_id
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CHANNEL);

        let mut query = ReportQuery::new(format!("channel=={channel}"));
        query
            .set_metrics(self.metrics().iter().copied())
            .set_dimensions([self.dimension()])
            .set_max_results(REPORT_MAX_RESULTS);
        if let Some(sort) = sort {
            query.set_sorts([sort]);
        }
        Ok(query)
    }
}
