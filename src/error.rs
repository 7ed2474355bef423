use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Failures while loading or using the service-account PKCS #12 bundle
#[derive(Debug, Error)]
pub(crate) enum CredentialError {
    #[error("The PKCS #12 credential \"{}\" does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read PKCS #12 credential \"{}\": {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("RSA signing support is not available in this build (enable the \"signing\" feature)")]
    MissingExtension,

    #[error("Failed to parse the PKCS #12 credential: {0}")]
    UnreadableBundle(String),

    #[error("The PKCS #12 credential contains no private key")]
    NoPrivateKey,

    #[error("Failed to load the PKCS #12 private key: {0}")]
    KeyLoadFailed(String),

    #[error("Failed to sign the assertion: {0}")]
    SignFailed(String),
}

#[derive(Debug, Error)]
#[error("Request to {url} failed: {message}")]
pub(crate) struct TransportError {
    pub(crate) url: String,
    pub(crate) message: String,
}

/// Failures of the service-account token exchange
#[derive(Debug, Error)]
pub(crate) enum AuthError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("Failed to encode assertion: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to retrieve access token ({0})")]
    TokenExchangeFailed(String),

    #[error("Token endpoint returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum QueryError {
    #[error("Report query requires both a start date and an end date")]
    MissingDateRange,
}

/// Failures of a report request
#[derive(Debug, Error)]
pub(crate) enum ReportError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("An error occurred when querying the YouTube Analytics service ({0})")]
    InvalidResponse(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("Invalid sort \"{input}\" (expected one of: {allowed}, optionally prefixed with '-')")]
    InvalidSort { input: String, allowed: String },

    #[error("Missing {setting}: pass --{flag} or set `{setting}` in the config file")]
    MissingSetting {
        setting: &'static str,
        flag: &'static str,
    },

    #[error("Failed to load config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Failed to access token file {}: {message}", path.display())]
    TokenFile { path: PathBuf, message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_error_display_date() {
        let e = AppError::InvalidDate {
            input: "abc".to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"Invalid date "abc" (expected YYYYMMDD or YYYY-MM-DD)"#
        );
    }

    #[test]
    fn app_error_display_missing_setting() {
        let e = AppError::MissingSetting {
            setting: "client_id",
            flag: "client-id",
        };
        assert_eq!(
            e.to_string(),
            "Missing client_id: pass --client-id or set `client_id` in the config file"
        );
    }

    #[test]
    fn credential_not_found_names_path() {
        let e = CredentialError::NotFound {
            path: PathBuf::from("/tmp/missing.p12"),
        };
        assert_eq!(
            e.to_string(),
            "The PKCS #12 credential \"/tmp/missing.p12\" does not exist"
        );
    }

    #[test]
    fn token_exchange_failure_keeps_provider_text() {
        let e = AuthError::TokenExchangeFailed("invalid_grant".to_string());
        assert_eq!(e.to_string(), "Failed to retrieve access token (invalid_grant)");
    }

    #[test]
    fn report_error_wraps_upstream_message() {
        let e = ReportError::InvalidResponse("quota exceeded".to_string());
        assert!(e.to_string().contains("quota exceeded"));
    }

    #[test]
    fn app_error_from_report_error_is_transparent() {
        let report: ReportError = QueryError::MissingDateRange.into();
        let app: AppError = report.into();
        assert_eq!(
            app.to_string(),
            "Report query requires both a start date and an end date"
        );
    }

    #[test]
    fn transport_error_names_url() {
        let e = TransportError {
            url: "https://example.test/token".to_string(),
            message: "connection refused".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Request to https://example.test/token failed: connection refused"
        );
    }
}
