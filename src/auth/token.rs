use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::assertion::build_assertion;
use super::signer::Credential;
use crate::consts::{ANALYTICS_SCOPE, JWT_BEARER_ASSERTION_TYPE};
use crate::error::AuthError;
use crate::http::HttpTransport;

/// Opaque OAuth access token
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct AccessToken(String);

impl AccessToken {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Everything needed to mint a token for a service account
#[derive(Debug, Clone)]
pub(crate) struct ServiceAccount {
    pub(crate) client_id: String,
    pub(crate) key_file: PathBuf,
    pub(crate) token_url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<serde_json::Value>,
    error_description: Option<String>,
}

fn error_reason(error: &serde_json::Value, description: Option<&str>) -> String {
    let error = match error {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match description {
        Some(d) if !d.is_empty() => format!("{error}: {d}"),
        _ => error,
    }
}

pub(crate) fn exchange_token(
    transport: &dyn HttpTransport,
    assertion: &str,
    token_url: &str,
) -> Result<AccessToken, AuthError> {
    let response = transport.post_form(
        token_url,
        &[
            ("grant_type", "assertion"),
            ("assertion_type", JWT_BEARER_ASSERTION_TYPE),
            ("assertion", assertion),
        ],
    )?;
    tracing::debug!(status = response.status, "token endpoint responded");

    let parsed: TokenResponse = serde_json::from_str(&response.body)
        .map_err(|e| AuthError::InvalidResponse(format!("invalid JSON: {e}")))?;

    if let Some(error) = &parsed.error {
        return Err(AuthError::TokenExchangeFailed(error_reason(
            error,
            parsed.error_description.as_deref(),
        )));
    }

    parsed
        .access_token
        .map(AccessToken::new)
        .ok_or_else(|| AuthError::InvalidResponse("missing access_token".to_string()))
}

/// Load the bundle, sign a fresh assertion and exchange it
pub(crate) fn request_access_token(
    transport: &dyn HttpTransport,
    account: &ServiceAccount,
    now: DateTime<Utc>,
) -> Result<AccessToken, AuthError> {
    let assertion = {
        let credential = Credential::load(account.client_id.as_str(), &account.key_file)?;
        build_assertion(&credential, ANALYTICS_SCOPE, &account.token_url, now)?
    };
    tracing::debug!(
        client_id = %account.client_id,
        expires_at = %assertion.expires_at,
        "built service-account assertion"
    );
    exchange_token(transport, &assertion.encoded(), &account.token_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{FakeTransport, Recorded};

    const URL: &str = "https://oauth.example.test/token";

    #[test]
    fn posts_jwt_bearer_form() {
        let fake = FakeTransport::with_bodies(&[r#"{"access_token":"ya29.token","expires_in":3600}"#]);
        let token = exchange_token(&fake, "a.b.c", URL).unwrap();
        assert_eq!(token.as_str(), "ya29.token");

        let requests = fake.requests.borrow();
        let Recorded::Post(url, form) = &requests[0] else {
            panic!("expected a POST, got {:?}", requests[0]);
        };
        assert_eq!(url, URL);
        assert_eq!(
            form,
            &vec![
                ("grant_type".to_string(), "assertion".to_string()),
                (
                    "assertion_type".to_string(),
                    "http://oauth.net/grant_type/jwt/1.0/bearer".to_string()
                ),
                ("assertion".to_string(), "a.b.c".to_string()),
            ]
        );
    }

    #[test]
    fn provider_error_is_propagated() {
        let fake = FakeTransport::with_bodies(&[r#"{"error":"invalid_grant"}"#]);
        let err = exchange_token(&fake, "a.b.c", URL).unwrap_err();
        assert!(matches!(&err, AuthError::TokenExchangeFailed(reason) if reason == "invalid_grant"));
    }

    #[test]
    fn provider_error_includes_description() {
        let fake = FakeTransport::with_bodies(&[
            r#"{"error":"invalid_grant","error_description":"Invalid JWT Signature."}"#,
        ]);
        let err = exchange_token(&fake, "a.b.c", URL).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to retrieve access token (invalid_grant: Invalid JWT Signature.)"
        );
    }

    #[test]
    fn non_json_body_is_invalid_response() {
        let fake = FakeTransport::with_bodies(&["<html>502</html>"]);
        let err = exchange_token(&fake, "a.b.c", URL).unwrap_err();
        assert!(matches!(err, AuthError::InvalidResponse(_)));
    }

    #[test]
    fn missing_access_token_is_invalid_response() {
        let fake = FakeTransport::with_bodies(&[r#"{"token_type":"Bearer"}"#]);
        let err = exchange_token(&fake, "a.b.c", URL).unwrap_err();
        assert!(err.to_string().contains("missing access_token"));
    }

    #[test]
    fn transport_failure_surfaces() {
        let fake = FakeTransport::default();
        fake.push_failure("connection refused");
        let err = exchange_token(&fake, "a.b.c", URL).unwrap_err();
        assert!(matches!(err, AuthError::Transport(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("secret");
        assert_eq!(format!("{token:?}"), "AccessToken(<redacted>)");
    }

    #[test]
    fn missing_key_file_fails_before_any_request() {
        let fake = FakeTransport::default();
        let account = ServiceAccount {
            client_id: "sa@example.test".to_string(),
            key_file: PathBuf::from("/definitely/missing/key.p12"),
            token_url: URL.to_string(),
        };
        let err = request_access_token(&fake, &account, Utc::now()).unwrap_err();
        assert!(err.to_string().contains("/definitely/missing/key.p12"));
        assert!(fake.requests.borrow().is_empty());
    }

    #[cfg(feature = "signing")]
    #[test]
    fn full_flow_sends_signed_assertion() {
        use crate::auth::signer::fixtures::{CLIENT_ID, path};

        let fake = FakeTransport::with_bodies(&[r#"{"access_token":"fresh"}"#]);
        let account = ServiceAccount {
            client_id: CLIENT_ID.to_string(),
            key_file: path("service-account.p12"),
            token_url: URL.to_string(),
        };
        let token = request_access_token(&fake, &account, Utc::now()).unwrap();
        assert_eq!(token.as_str(), "fresh");

        let requests = fake.requests.borrow();
        let Recorded::Post(_, form) = &requests[0] else {
            panic!("expected a POST");
        };
        let assertion = &form[2].1;
        assert_eq!(assertion.split('.').count(), 3);
    }
}
