//! Configuration management for spotmix.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! Nothing is ever written back; tokens live only in memory for one run.

use std::{env, path::PathBuf};

use crate::error::{Error, Res};

pub const DEFAULT_REDIRECT_BASE: &str = "http://localhost";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com";

/// Loads environment variables from the `.env` file in the local data directory.
///
/// The directory is created if needed so that the user knows where to put
/// the file:
/// - Linux: `~/.local/share/spotmix/.env`
/// - macOS: `~/Library/Application Support/spotmix/.env`
/// - Windows: `%LOCALAPPDATA%/spotmix/.env`
///
/// A missing `.env` file is fine as long as the variables are exported in the
/// environment; a malformed one is reported.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotmix/.env");
    path
}

fn required(key: &str) -> Res<String> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!("{} must be set", key))),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Client ID of the Spotify application (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Res<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Client secret of the Spotify application (`SPOTIFY_API_AUTH_CLIENT_SECRET`).
///
/// Sent only to the token endpoint; never printed.
pub fn spotify_client_secret() -> Res<String> {
    required("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Scheme and host the callback listener is reachable at, without port
/// (`SPOTIFY_REDIRECT_BASE`, e.g. `http://localhost`).
pub fn redirect_base() -> String {
    optional("SPOTIFY_REDIRECT_BASE", DEFAULT_REDIRECT_BASE)
        .trim_end_matches('/')
        .to_string()
}

/// Port of the callback listener (`SERVER_PORT`).
pub fn server_port() -> Res<u16> {
    match env::var("SERVER_PORT") {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse::<u16>()
            .map_err(|e| Error::Config(format!("SERVER_PORT '{}' is not a port: {}", v, e))),
        _ => Ok(DEFAULT_SERVER_PORT),
    }
}

/// Base URL of the accounts service hosting `/authorize` and `/api/token`.
pub fn spotify_accounts_url() -> String {
    optional("SPOTIFY_ACCOUNTS_URL", DEFAULT_ACCOUNTS_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Base URL of the Web API, without the `/v1` suffix.
pub fn spotify_api_url() -> String {
    optional("SPOTIFY_API_URL", DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}
