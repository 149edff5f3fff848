//! # Spotify Integration Module
//!
//! The catalog side of stationfy: authorization, track search and playlist
//! management against the Spotify Web API.
//!
//! ## Architecture
//!
//! ```text
//! Pipeline (PlaylistAssembler)
//!          ↓
//! Catalog trait
//!     ├── search     (track:{name} artist:{artist}, limit 1)
//!     └── playlist   (current user, create, add items)
//!          ↓
//! SpotifyCatalog (reqwest, bearer token from CatalogSession)
//!          ↓
//! Spotify Web API
//! ```
//!
//! [`auth`] runs the OAuth 2.0 PKCE flow that produces the access token. It is
//! kept apart from the catalog client: the client only ever sees the
//! [`CatalogSession`] it was built with.
//!
//! ## API Coverage
//!
//! - `GET /me` - id of the authenticated user, the playlist owner
//! - `GET /search` - structured track search
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - add items in one batch
//! - `POST /api/token` - code exchange and refresh
//!
//! ## Error Mapping
//!
//! Transport failures and non-success statuses, 401/403 included, become
//! [`Error::UpstreamUnavailable`]. The status travels with the error, so a
//! rejected token can still be told apart with [`Error::is_rejected_token`].
//! Bodies that do not decode become [`Error::MalformedResponse`]. Nothing is
//! retried.

use std::future::Future;

use reqwest::{Client, Response, Url};

use crate::{config, error::Error, types::CatalogSession};

pub mod auth;
pub mod playlist;
pub mod search;

pub use search::{TrackQuery, resolve};

/// The catalog capabilities the playlist pipeline depends on.
pub trait Catalog: Sync {
    /// Id of the user the session belongs to.
    fn current_user_id(&self) -> impl Future<Output = Result<String, Error>> + Send;

    /// Ranked track uris for `query`, at most `limit` of them.
    fn search_tracks(
        &self,
        query: &TrackQuery,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<String>, Error>> + Send;

    /// Creates a playlist owned by `owner_id` and returns its id.
    fn create_playlist(
        &self,
        owner_id: &str,
        name: &str,
    ) -> impl Future<Output = Result<String, Error>> + Send;

    /// Appends `uris` to the playlist in a single call.
    fn add_items(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

/// [`Catalog`] implementation over the Spotify Web API.
#[derive(Debug, Clone)]
pub struct SpotifyCatalog {
    client: Client,
    api_url: String,
    session: CatalogSession,
}

impl SpotifyCatalog {
    pub fn new(api_url: impl Into<String>, session: CatalogSession) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn from_env(session: CatalogSession) -> Self {
        Self::new(config::spotify_apiurl(), session)
    }

    /// `{api_url}/{segments...}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| Error::InvalidInput(format!("bad api url {}: {}", self.api_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidInput(format!("bad api url {}", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn token(&self) -> &str {
        &self.session.access_token
    }
}

impl Catalog for SpotifyCatalog {
    async fn current_user_id(&self) -> Result<String, Error> {
        playlist::current_user_id(self).await
    }

    async fn search_tracks(&self, query: &TrackQuery, limit: u32) -> Result<Vec<String>, Error> {
        search::search_tracks(self, query, limit).await
    }

    async fn create_playlist(&self, owner_id: &str, name: &str) -> Result<String, Error> {
        playlist::create(self, owner_id, name).await
    }

    async fn add_items(&self, playlist_id: &str, uris: &[String]) -> Result<(), Error> {
        playlist::add_tracks(self, playlist_id, uris).await
    }
}

/// Maps a raw response into the crate's error taxonomy.
pub(crate) async fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::upstream_status(status, format!("{}: {}", status, body)))
}

pub(crate) fn transport(err: reqwest::Error) -> Error {
    Error::upstream(err.to_string())
}
