use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Raw token endpoint payload. `refresh_token` and `scope` may be omitted on refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

/// Bearer credential for one catalog session. Owned by whoever ran the
/// authorization flow and handed to the pipeline explicitly.
#[derive(Debug, Clone)]
pub struct CatalogSession {
    pub access_token: String,
}

impl CatalogSession {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }
}

/// A single station entry. Identity is the (name, artist) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub artist: String,
}

impl Track {
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRequest {
    pub username: String,
    pub category: String,
}

impl StationRequest {
    pub fn new(username: impl Into<String>, category: impl Into<String>) -> Result<Self, Error> {
        let username = username.into();
        let category = category.into();

        if username.is_empty() {
            return Err(Error::InvalidInput("username cannot be empty".to_string()));
        }
        if category.is_empty() {
            return Err(Error::InvalidInput("category cannot be empty".to_string()));
        }

        Ok(Self { username, category })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrack {
    pub track: Track,
    pub catalog_id: Option<String>,
}

impl ResolvedTrack {
    pub fn is_matched(&self) -> bool {
        self.catalog_id.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct PlaylistResult {
    pub name: String,
    pub owner_id: String,
    /// The full station list as recommended, matched or not.
    pub tracks: Vec<Track>,
    pub playlist_id: String,
    pub resolved: Vec<ResolvedTrack>,
}

impl PlaylistResult {
    pub fn matched_uris(&self) -> Vec<String> {
        self.resolved
            .iter()
            .filter_map(|r| r.catalog_id.clone())
            .collect()
    }
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub name: String,
    pub artist: String,
    pub spotify: String,
}

// Last.fm station payload

#[derive(Debug, Clone, Deserialize)]
pub struct StationResponse {
    pub playlist: Vec<StationItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationItem {
    pub name: String,
    pub artists: Vec<StationArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationArtist {
    pub name: String,
}

// Spotify payloads

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: SearchTracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchTracks {
    /// Spotify occasionally answers with `null` entries here.
    pub items: Vec<Option<SearchTrack>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
