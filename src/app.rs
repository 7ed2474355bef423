use chrono::Utc;

use crate::auth::{AccessToken, ServiceAccount, TokenStore, request_access_token};
use crate::cli::{Action, Cli, PeriodArgs, QueryArgs, parse_command};
use crate::consts::TOKEN_URL;
use crate::error::AppError;
use crate::http::HttpTransport;
use crate::output::{
    ComparisonTableOptions, NumberFormat, output_comparison_json, output_token_json,
    render_comparison_table,
};
use crate::report::{Comparator, DateRange, ReportClient, ReportKind, ReportQuery};
use crate::utils::{Timezone, resolve_range};

/// Stands in for the token in printed URLs when none is at hand
const TOKEN_PLACEHOLDER: &str = "ACCESS_TOKEN";

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) transport: &'a dyn HttpTransport,
    pub(crate) timezone: Timezone,
    pub(crate) number_format: NumberFormat,
}

impl CommandContext<'_> {
    fn token_store(&self) -> Option<TokenStore> {
        self.cli
            .token_file
            .clone()
            .or_else(TokenStore::default_path)
            .map(TokenStore::new)
    }

    fn service_account(&self) -> Result<ServiceAccount, AppError> {
        let client_id = self
            .cli
            .client_id
            .clone()
            .filter(|c| !c.trim().is_empty())
            .ok_or(AppError::MissingSetting {
                setting: "client_id",
                flag: "client-id",
            })?;
        let key_file = self.cli.key_file.clone().ok_or(AppError::MissingSetting {
            setting: "key_file",
            flag: "key-file",
        })?;
        Ok(ServiceAccount {
            client_id,
            key_file,
            token_url: self
                .cli
                .token_url
                .clone()
                .unwrap_or_else(|| TOKEN_URL.to_string()),
        })
    }

    fn explicit_token(&self) -> Option<AccessToken> {
        self.cli
            .access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(AccessToken::new)
    }

    /// Exchange a new assertion and optionally persist the token
    fn fetch_token(&self, save: bool) -> Result<AccessToken, AppError> {
        let account = self.service_account()?;
        let token = request_access_token(self.transport, &account, Utc::now())?;
        if save {
            match self.token_store() {
                Some(store) => {
                    store.save(&token)?;
                    tracing::debug!(path = %store.path().display(), "saved access token");
                }
                None => tracing::warn!("no home directory; access token not saved"),
            }
        }
        Ok(token)
    }

    /// `--access-token`, else the stored token (unless `--refresh`), else a fresh exchange
    fn resolve_token(&self) -> Result<AccessToken, AppError> {
        if let Some(token) = self.explicit_token() {
            return Ok(token);
        }
        if !self.cli.refresh
            && let Some(store) = self.token_store()
            && let Some(token) = store.load()?
        {
            tracing::debug!(path = %store.path().display(), "using stored access token");
            return Ok(token);
        }
        self.fetch_token(true)
    }

    fn report_inputs(
        &self,
        kind: ReportKind,
        period: &PeriodArgs,
        sort: Option<&str>,
    ) -> Result<(ReportQuery, DateRange), AppError> {
        let query = kind.query(self.cli.channel_id.as_deref(), sort)?;
        let range = resolve_range(
            period.start_date.as_deref(),
            period.end_date.as_deref(),
            self.timezone.today(),
        )?;
        Ok((query, range))
    }
}

fn handle_token(ctx: &CommandContext<'_>, save: bool) -> Result<String, AppError> {
    let token = ctx.fetch_token(save)?;
    Ok(output_token_json(&token))
}

fn handle_report(
    ctx: &CommandContext<'_>,
    kind: ReportKind,
    period: &PeriodArgs,
    sort: Option<&str>,
) -> Result<String, AppError> {
    // Bad dates or sorts should fail before any credential is touched
    let (query, range) = ctx.report_inputs(kind, period, sort)?;
    let token = ctx.resolve_token()?;

    let comparator = Comparator::new(ReportClient::new(ctx.transport));
    let comparison = comparator.compare(&query, range, kind.alignment(), &token)?;

    if ctx.cli.json {
        Ok(output_comparison_json(&comparison))
    } else {
        Ok(render_comparison_table(
            kind,
            &comparison,
            ComparisonTableOptions {
                use_color: ctx.cli.use_color(),
                number_format: ctx.number_format,
            },
        ))
    }
}

fn apply_query_args(query: &mut ReportQuery, args: &QueryArgs) {
    query.set_filters(&args.filters);
    if let Some(start_index) = args.start_index {
        query.set_start_index(start_index);
    }
    query
        .set_segment(args.segment.clone())
        .set_pretty_print(args.pretty_print)
        .set_callback(args.callback.clone());
}

fn handle_url(
    ctx: &CommandContext<'_>,
    kind: ReportKind,
    period: &PeriodArgs,
    sort: Option<&str>,
    args: &QueryArgs,
) -> Result<String, AppError> {
    let (mut query, range) = ctx.report_inputs(kind, period, sort)?;
    query.set_date_range(range);
    apply_query_args(&mut query, args);

    let token = match ctx.explicit_token() {
        Some(token) => Some(token),
        None => match ctx.token_store() {
            Some(store) => store.load()?,
            None => None,
        },
    };
    let token = token.as_ref().map_or(TOKEN_PLACEHOLDER, AccessToken::as_str);
    query
        .build(token)
        .map_err(|e| AppError::Report(e.into()))
}

/// Run the parsed command and return what should be printed
pub(crate) fn run(cli: &Cli, transport: &dyn HttpTransport) -> Result<String, AppError> {
    let ctx = CommandContext {
        cli,
        transport,
        timezone: Timezone::parse(cli.timezone.as_deref())?,
        number_format: NumberFormat::from_locale(cli.locale.as_deref())?,
    };

    match parse_command(&cli.command) {
        Action::Token { save } => handle_token(&ctx, save),
        Action::Report { kind, period, sort } => handle_report(&ctx, kind, &period, sort.as_deref()),
        Action::Url {
            kind,
            period,
            sort,
            query,
        } => handle_url(&ctx, kind, &period, sort.as_deref(), &query),
    }
}
