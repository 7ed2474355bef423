use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::signer::{Credential, sign};
use crate::consts::ASSERTION_LIFETIME_SECS;
use crate::error::AuthError;

#[derive(Serialize)]
struct Header {
    alg: &'static str,
    typ: &'static str,
}

#[derive(Serialize)]
struct ClaimSet<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

/// Signed bearer assertion: `header.claims.signature`, each part base64
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assertion {
    pub(crate) header: String,
    pub(crate) claims: String,
    pub(crate) signature: String,
    pub(crate) expires_at: DateTime<Utc>,
}

impl Assertion {
    pub(crate) fn encoded(&self) -> String {
        format!("{}.{}.{}", self.header, self.claims, self.signature)
    }
}

/// Header and claim-set segments for `now`, before signing
fn unsigned_parts(
    client_id: &str,
    scope: &str,
    audience: &str,
    now: DateTime<Utc>,
) -> Result<(String, String, DateTime<Utc>), AuthError> {
    let expires_at = now + Duration::seconds(ASSERTION_LIFETIME_SECS);
    let header = serde_json::to_vec(&Header {
        alg: "RS256",
        typ: "JWT",
    })?;
    let claims = serde_json::to_vec(&ClaimSet {
        iss: client_id,
        scope,
        aud: audience,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    })?;
    Ok((STANDARD.encode(header), STANDARD.encode(claims), expires_at))
}

pub(crate) fn build_assertion(
    credential: &Credential,
    scope: &str,
    audience: &str,
    now: DateTime<Utc>,
) -> Result<Assertion, AuthError> {
    let (header, claims, expires_at) = unsigned_parts(credential.client_id(), scope, audience, now)?;
    let signing_input = format!("{header}.{claims}");
    let signature = sign(signing_input.as_bytes(), credential)?;

    Ok(Assertion {
        header,
        claims,
        signature: STANDARD.encode(signature),
        expires_at,
    })
}
