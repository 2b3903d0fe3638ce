//! Process configuration.
//!
//! Secrets come from the environment (a `.env` file is loaded by `main`
//! before this runs). Non-secret settings have defaults and can be
//! overridden from the command line.

use std::path::PathBuf;

use thiserror::Error;

use crate::consts::{BOT_TOKEN_VAR, DEFAULT_DB_PATH, DEFAULT_DISPLAY_LANG, OMDB_API_KEY_VAR};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set (add it to the environment or .env)")]
    MissingSecret(&'static str),
}

/// Everything the bot needs to start serving.
#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub omdb_api_key: String,
    pub db_path: PathBuf,
    pub display_lang: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("omdb_api_key", &"<redacted>")
            .field("db_path", &self.db_path)
            .field("display_lang", &self.display_lang)
            .finish()
    }
}

impl Config {
    /// Read secrets from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingSecret(key))
        };

        Ok(Self {
            bot_token: secret(BOT_TOKEN_VAR)?,
            omdb_api_key: secret(OMDB_API_KEY_VAR)?,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            display_lang: DEFAULT_DISPLAY_LANG.to_string(),
        })
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = path.into();
        self
    }

    pub fn with_display_lang(mut self, lang: impl Into<String>) -> Self {
        self.display_lang = lang.into();
        self
    }
}
