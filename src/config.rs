//! Configuration management for stationfy.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file. Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the current working directory
//! 3. `.env` in the local data directory (`stationfy/.env`)
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::pipeline::SearchFailure;

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_SCOPE: &str = "playlist-modify-public";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_LASTFM_STATION_URL: &str = "https://www.last.fm/player/station/user";

/// Loads environment variables from `.env` files.
///
/// Creates the local data directory if it doesn't exist, then reads
/// `stationfy/.env` from it. A `.env` in the working directory is read first
/// so it wins over the data directory copy. Missing files are not an error;
/// every value can also come straight from the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/stationfy/.env`
/// - macOS: `~/Library/Application Support/stationfy/.env`
/// - Windows: `%LOCALAPPDATA%/stationfy/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("stationfy/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::dotenv().ok();
    dotenv::from_path(path).ok();
    Ok(())
}

/// Address the local OAuth callback server binds to (`SERVER_ADDRESS`).
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves `SPOTIFY_API_AUTH_CLIENT_ID`, the client ID obtained when
/// registering the application with Spotify's developer platform. The PKCE
/// flow needs no client secret.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Must match both the redirect URI registered in the Spotify application
/// settings and the `/callback` route of [`server_addr`].
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string())
}

/// Returns the scope requested during authorization.
///
/// Playlist creation needs at least `playlist-modify-public`.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string())
}

pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.to_string())
}

pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string())
}

/// Base of the Last.fm station endpoint; username and category are appended.
pub fn lastfm_station_url() -> String {
    env::var("LASTFM_STATION_URL").unwrap_or_else(|_| DEFAULT_LASTFM_STATION_URL.to_string())
}

/// Number of catalog searches allowed in flight (`STATIONFY_SEARCH_CONCURRENCY`).
///
/// Defaults to 1, which keeps searches strictly sequential. Unparsable or zero
/// values fall back to the default.
pub fn search_concurrency() -> usize {
    env::var("STATIONFY_SEARCH_CONCURRENCY")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

/// How a failed catalog search is handled (`STATIONFY_ON_SEARCH_ERROR`).
///
/// `abort` (default) stops the run, `skip` drops the track with a warning.
pub fn search_failure() -> SearchFailure {
    env::var("STATIONFY_ON_SEARCH_ERROR")
        .ok()
        .and_then(|v| v.parse::<SearchFailure>().ok())
        .unwrap_or_default()
}
