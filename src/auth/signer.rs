//! RSA-SHA256 signing with a service-account PKCS #12 bundle
//!
//! The private key is parsed inside [`sign`] and dropped (and zeroized) before
//! it returns; only the encrypted bundle outlives the call.

use std::fs;
use std::path::Path;

use crate::error::CredentialError;

/// Client identifier plus the raw PKCS #12 bundle it signs with
pub(crate) struct Credential {
    client_id: String,
    bundle: Vec<u8>,
}

impl Credential {
    pub(crate) fn load(client_id: impl Into<String>, path: &Path) -> Result<Self, CredentialError> {
        if !path.exists() {
            return Err(CredentialError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let bundle = fs::read(path).map_err(|source| CredentialError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bundle(client_id, bundle))
    }

    pub(crate) fn from_bundle(client_id: impl Into<String>, bundle: Vec<u8>) -> Self {
        Self {
            client_id: client_id.into(),
            bundle,
        }
    }

    pub(crate) fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("client_id", &self.client_id)
            .field("bundle", &format_args!("<{} bytes>", self.bundle.len()))
            .finish()
    }
}

#[cfg(feature = "signing")]
mod rsa_sha256 {
    use p12::PFX;
    use rsa::RsaPrivateKey;
    use rsa::pkcs1v15::SigningKey;
    use rsa::pkcs8::DecodePrivateKey;
    use rsa::signature::{SignatureEncoding, Signer};
    use sha2::Sha256;

    use super::Credential;
    use crate::consts::PKCS12_PASSPHRASE;
    use crate::error::CredentialError;

    fn private_key(credential: &Credential) -> Result<RsaPrivateKey, CredentialError> {
        let pfx = PFX::parse(&credential.bundle)
            .map_err(|e| CredentialError::UnreadableBundle(e.to_string()))?;
        if !pfx.verify_mac(PKCS12_PASSPHRASE) {
            return Err(CredentialError::UnreadableBundle(
                "MAC verification failed with the service-account passphrase".to_string(),
            ));
        }

        let key_bags = pfx
            .key_bags(PKCS12_PASSPHRASE)
            .map_err(|e| CredentialError::UnreadableBundle(e.to_string()))?;
        let der = key_bags
            .into_iter()
            .find(|der| !der.is_empty())
            .ok_or(CredentialError::NoPrivateKey)?;

        RsaPrivateKey::from_pkcs8_der(&der)
            .map_err(|e| CredentialError::KeyLoadFailed(e.to_string()))
    }

    pub(crate) fn sign(payload: &[u8], credential: &Credential) -> Result<Vec<u8>, CredentialError> {
        let signing_key = SigningKey::<Sha256>::new(private_key(credential)?);
        let signature = signing_key
            .try_sign(payload)
            .map_err(|e| CredentialError::SignFailed(e.to_string()))?;
        Ok(signature.to_vec())
    }
}

#[cfg(feature = "signing")]
pub(crate) use rsa_sha256::sign;

#[cfg(not(feature = "signing"))]
pub(crate) fn sign(_payload: &[u8], _credential: &Credential) -> Result<Vec<u8>, CredentialError> {
    Err(CredentialError::MissingExtension)
}
