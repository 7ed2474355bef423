//! Service-account authentication: PKCS #12 signing, assertion, token exchange

mod assertion;
mod signer;
mod store;
mod token;

pub(crate) use store::TokenStore;
pub(crate) use token::{AccessToken, ServiceAccount, request_access_token};

#[cfg(test)]
pub(crate) use signer::fixtures as signer_fixtures;
