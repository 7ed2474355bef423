//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode};

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser)]
#[command(name = "ytstats")]
#[command(about = "YouTube Analytics week-over-week reports", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Config file (default: ~/.config/ytstats/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Timezone deciding which week is "last week" (e.g., "Asia/Jakarta", "UTC")
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Locale for number formatting (e.g., "en", "zh", "de")
    #[arg(long, global = true, value_name = "LOCALE")]
    pub(crate) locale: Option<String>,

    /// Service-account e-mail
    #[arg(long, global = true, value_name = "EMAIL")]
    pub(crate) client_id: Option<String>,

    /// Service-account PKCS #12 key file
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) key_file: Option<PathBuf>,

    /// Channel to report on (default: the authorised channel)
    #[arg(long, global = true, value_name = "ID")]
    pub(crate) channel_id: Option<String>,

    /// Where the access token is stored (default: ~/.cache/ytstats/token.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) token_file: Option<PathBuf>,

    /// Use this access token instead of the stored or exchanged one
    #[arg(long, global = true, value_name = "TOKEN")]
    pub(crate) access_token: Option<String>,

    /// Ignore the stored token and fetch a fresh one
    #[arg(long, global = true)]
    pub(crate) refresh: bool,

    /// Token endpoint, from the config file only
    #[arg(skip)]
    pub(crate) token_url: Option<String>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.json && config.json {
            self.json = true;
        }

        // Only override color if CLI is at its default
        if let Some(color) = config.color
            && matches!(self.color, ColorMode::Auto)
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }

        // String options: only apply if CLI didn't set them
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.locale.is_none() {
            self.locale = config.locale.clone();
        }
        if self.client_id.is_none() {
            self.client_id = config.client_id.clone();
        }
        if self.key_file.is_none() {
            self.key_file = config.key_file.clone();
        }
        if self.channel_id.is_none() {
            self.channel_id = config.channel_id.clone();
        }
        if self.token_file.is_none() {
            self.token_file = config.token_file.clone();
        }
        if self.token_url.is_none() {
            self.token_url = config.token_url.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("ytstats").chain(args.iter().copied())).unwrap()
    }

    fn config(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn config_fills_unset_options() {
        let cli = parse(&[]).with_config(&config(
            r#"
                client_id = "svc@example.iam.gserviceaccount.com"
                key_file = "/keys/svc.p12"
                channel_id = "UC1"
                token_url = "https://oauth.example.test/token"
                json = true
                color = "always"
            "#,
        ));
        assert_eq!(cli.client_id.as_deref(), Some("svc@example.iam.gserviceaccount.com"));
        assert_eq!(cli.key_file, Some(PathBuf::from("/keys/svc.p12")));
        assert_eq!(cli.channel_id.as_deref(), Some("UC1"));
        assert_eq!(cli.token_url.as_deref(), Some("https://oauth.example.test/token"));
        assert!(cli.json);
        assert_eq!(cli.color, ColorMode::Always);
    }

    #[test]
    fn cli_flags_win_over_config() {
        let cli = parse(&["--channel-id", "UC2", "--color", "never", "--timezone", "UTC"])
            .with_config(&config(
                r#"
                    channel_id = "UC1"
                    color = "always"
                    timezone = "Asia/Jakarta"
                "#,
            ));
        assert_eq!(cli.channel_id.as_deref(), Some("UC2"));
        assert_eq!(cli.color, ColorMode::Never);
        assert_eq!(cli.timezone.as_deref(), Some("UTC"));
    }

    #[test]
    fn no_color_beats_always() {
        let cli = parse(&["--color", "always", "--no-color"]);
        assert!(!cli.use_color());
        assert!(parse(&["--color", "always"]).use_color());
    }

    #[test]
    fn global_flags_accepted_after_subcommand() {
        let cli = parse(&["video", "--json", "--refresh"]);
        assert!(cli.json);
        assert!(cli.refresh);
    }
}
