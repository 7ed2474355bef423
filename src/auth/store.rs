//! Persisted access token (`{"access_token": "..."}`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::token::AccessToken;
use crate::error::AppError;

#[derive(Serialize, Deserialize)]
struct StoredToken {
    access_token: String,
}

pub(crate) struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn default_path() -> Option<PathBuf> {
        let home = dirs::home_dir()?;
        Some(home.join(".cache").join("ytstats").join("token.json"))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, message: impl std::fmt::Display) -> AppError {
        AppError::TokenFile {
            path: self.path.clone(),
            message: message.to_string(),
        }
    }

    /// `Ok(None)` when no token has been stored yet
    pub(crate) fn load(&self) -> Result<Option<AccessToken>, AppError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(|e| self.error(e))?;
        let stored: StoredToken = serde_json::from_str(&content).map_err(|e| self.error(e))?;
        if stored.access_token.is_empty() {
            return Ok(None);
        }
        Ok(Some(AccessToken::new(stored.access_token)))
    }

    pub(crate) fn save(&self, token: &AccessToken) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }
        let stored = StoredToken {
            access_token: token.as_str().to_string(),
        };
        let json = serde_json::to_string(&stored).map_err(|e| self.error(e))?;
        fs::write(&self.path, json).map_err(|e| self.error(e))
    }
}
