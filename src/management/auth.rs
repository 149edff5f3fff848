use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config,
    error::Error,
    spotify,
    types::{CatalogSession, Token},
};

/// Seconds before expiry at which a token is treated as stale.
const EXPIRY_MARGIN: u64 = 240;

/// Disk-backed store for the Spotify token obtained by `stationfy auth`.
pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        Self::with_path(token, Self::token_path())
    }

    pub fn with_path(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load() -> Result<Self, String> {
        Self::load_from(Self::token_path()).await
    }

    pub async fn load_from(path: PathBuf) -> Result<Self, String> {
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token, path })
    }

    pub async fn persist(&self) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns a session with a usable access token, refreshing it first if
    /// it is about to expire. A refreshed token is written back to disk.
    pub async fn session(&mut self) -> Result<CatalogSession, Error> {
        if self.is_expired_at(Utc::now().timestamp() as u64) {
            if self.token.refresh_token.is_empty() {
                return Err(Error::Auth("token expired and cannot be refreshed".to_string()));
            }

            let new_token =
                spotify::auth::refresh_token(&config::spotify_apitoken_url(), &self.token.refresh_token)
                    .await?;
            self.token = new_token;
            self.persist().await.map_err(Error::Auth)?;
        }

        Ok(CatalogSession::new(self.token.access_token.clone()))
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        now + EXPIRY_MARGIN >= self.token.obtained_at + self.token.expires_in
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("stationfy/cache/token.json");
        path
    }
}
