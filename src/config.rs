use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    /// Service-account e-mail used as the assertion issuer
    #[serde(default)]
    pub(crate) client_id: Option<String>,
    /// PKCS #12 bundle downloaded for the service account
    #[serde(default)]
    pub(crate) key_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) channel_id: Option<String>,
    #[serde(default)]
    pub(crate) token_file: Option<PathBuf>,
    #[serde(default)]
    pub(crate) token_url: Option<String>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    #[serde(default)]
    pub(crate) json: bool,
}

fn parse(path: &Path, content: &str) -> Result<Config, AppError> {
    toml::from_str::<Config>(content).map_err(|e| AppError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl Config {
    /// Load `explicit` if given (it must exist and parse), else the first
    /// parseable file among the standard locations, else defaults
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self, AppError> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path).map_err(|e| AppError::Config {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            let config = parse(path, &content)?;
            tracing::debug!(path = %path.display(), "loaded config");
            return Ok(config);
        }

        Ok(Self::search(&Self::get_config_paths()))
    }

    fn search(paths: &[PathBuf]) -> Self {
        for path in paths {
            if path.exists()
                && let Ok(content) = fs::read_to_string(path)
            {
                match parse(path, &content) {
                    Ok(config) => {
                        tracing::debug!(path = %path.display(), "loaded config");
                        return config;
                    }
                    Err(e) => tracing::warn!("ignoring config: {e}"),
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/ytstats/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("ytstats").join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("ytstats").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.ytstats.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".ytstats.toml"));
        }

        paths
    }
}
