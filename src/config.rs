use std::env::VarError;
use std::path::PathBuf;

use crate::error::{AppError, Result};

pub const DEFAULT_REDIRECT_URI: &str = "http://example.com";
pub const TOKEN_CACHE_PATH: &str = "token.txt";
pub const PLAYLIST_SCOPE: &str = "playlist-modify-private";

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// Read for parity with older `.env` files; nothing consumes it.
    pub username: Option<String>,
    pub token_cache_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name))
    }

    /// Build a config from an arbitrary variable source.
    ///
    /// Unset variables become empty strings so that `get_missing_config` can
    /// report every gap at once instead of failing on the first one.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let read = |name: &str| -> Result<Option<String>> {
            match lookup(name) {
                Ok(value) => Ok(Some(value)),
                Err(VarError::NotPresent) => Ok(None),
                Err(VarError::NotUnicode(_)) => {
                    Err(AppError::Config(format!("{} is not valid unicode", name)))
                }
            }
        };

        let client_id = read("CLIENT_ID")?.unwrap_or_default();
        let client_secret = read("CLIENT_SECRET")?.unwrap_or_default();
        let redirect_uri =
            read("REDIRECT_URI")?.unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());
        let username = read("USERNAME")?;

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
            username,
            token_cache_path: PathBuf::from(TOKEN_CACHE_PATH),
        })
    }

    pub fn get_missing_config(&self) -> Vec<String> {
        let mut missing = Vec::new();

        if self.client_id.is_empty() {
            missing.push("CLIENT_ID".to_string());
        }
        if self.client_secret.is_empty() {
            missing.push("CLIENT_SECRET".to_string());
        }
        if self.redirect_uri.is_empty() {
            missing.push("REDIRECT_URI".to_string());
        }

        missing
    }

    /// Reject a config with any mandatory value missing or empty.
    pub fn validate(self) -> Result<Self> {
        let missing = self.get_missing_config();
        if missing.is_empty() {
            Ok(self)
        } else {
            Err(AppError::Config(format!(
                "Missing required Spotify API credentials: {}",
                missing.join(", ")
            )))
        }
    }
}
