//! CLI subcommand definitions

use clap::{Args, Subcommand};

use crate::report::ReportKind;

/// Report window; both dates are needed, otherwise last week is used
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PeriodArgs {
    /// First day of the current period (YYYYMMDD or YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub(crate) start_date: Option<String>,

    /// Last day of the current period (YYYYMMDD or YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub(crate) end_date: Option<String>,
}

/// Extra request parameters for printed URLs
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct QueryArgs {
    /// Filter expression such as "country==US" (repeatable)
    #[arg(long = "filter", value_name = "FILTER")]
    pub(crate) filters: Vec<String>,

    /// Segment id
    #[arg(long)]
    pub(crate) segment: Option<String>,

    /// 1-based index of the first row
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) start_index: Option<u32>,

    /// Ask the service for indented JSON
    #[arg(long)]
    pub(crate) pretty_print: bool,

    /// JSONP callback name
    #[arg(long)]
    pub(crate) callback: Option<String>,
}

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch an access token through the service account
    Token {
        /// Print the token without writing the token file
        #[arg(long)]
        no_save: bool,
    },
    /// Channel metrics per day against the week before (default)
    Channel(PeriodArgs),
    /// Top videos by watch time against the week before
    Video {
        #[command(flatten)]
        period: PeriodArgs,

        /// Sort metric, "-" prefix for descending (default: -estimatedMinutesWatched)
        #[arg(long, allow_hyphen_values = true)]
        sort: Option<String>,
    },
    /// Print the current-period request URL without sending it
    Url {
        #[arg(value_enum)]
        report: ReportKind,

        #[command(flatten)]
        period: PeriodArgs,

        /// Sort metric (video report only)
        #[arg(long, allow_hyphen_values = true)]
        sort: Option<String>,

        #[command(flatten)]
        query: QueryArgs,
    },
}

/// Normalized command
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Token {
        save: bool,
    },
    Report {
        kind: ReportKind,
        period: PeriodArgs,
        sort: Option<String>,
    },
    Url {
        kind: ReportKind,
        period: PeriodArgs,
        sort: Option<String>,
        query: QueryArgs,
    },
}

/// Map the parsed subcommand to an action; no subcommand runs the channel report
pub(crate) fn parse_command(cmd: &Option<Commands>) -> Action {
    match cmd {
        Some(Commands::Token { no_save }) => Action::Token { save: !no_save },
        Some(Commands::Channel(period)) => Action::Report {
            kind: ReportKind::Channel,
            period: period.clone(),
            sort: None,
        },
        Some(Commands::Video { period, sort }) => Action::Report {
            kind: ReportKind::Video,
            period: period.clone(),
            sort: sort.clone(),
        },
        Some(Commands::Url {
            report,
            period,
            sort,
            query,
        }) => Action::Url {
            kind: *report,
            period: period.clone(),
            sort: sort.clone(),
            query: query.clone(),
        },
        None => Action::Report {
            kind: ReportKind::Channel,
            period: PeriodArgs::default(),
            sort: None,
        },
    }
}
