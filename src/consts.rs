/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// OAuth 2.0 token endpoint for the service-account assertion grant
pub(crate) const TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";

/// YouTube Analytics reporting endpoint
pub(crate) const REPORTS_URL: &str = "https://youtubeanalytics.googleapis.com/v2/reports";

/// Read-only YouTube Analytics scope requested in the assertion
pub(crate) const ANALYTICS_SCOPE: &str = "https://www.googleapis.com/auth/yt-analytics.readonly";

/// `assertion_type` form value for the JWT bearer grant
pub(crate) const JWT_BEARER_ASSERTION_TYPE: &str = "http://oauth.net/grant_type/jwt/1.0/bearer";

/// Service-account PKCS #12 bundles are always exported with this passphrase
pub(crate) const PKCS12_PASSPHRASE: &str = "notasecret";

/// Assertion lifetime (exp - iat)
pub(crate) const ASSERTION_LIFETIME_SECS: i64 = 60 * 60;

/// Channel scope used when no channel id is configured
pub(crate) const DEFAULT_CHANNEL: &str = "MINE";

/// Default row cap of a fresh query
pub(crate) const DEFAULT_MAX_RESULTS: u32 = 10_000;

/// Row cap used by the two weekly reports
pub(crate) const REPORT_MAX_RESULTS: u32 = 10;

/// The comparison period sits exactly one week before the current one
pub(crate) const COMPARISON_SHIFT_DAYS: i64 = 7;
