use std::future::Future;

use reqwest::{Client, Url};

use crate::{
    config,
    error::Error,
    types::{StationRequest, StationResponse, Track},
};

/// Source of station track lists.
pub trait StationFetcher: Sync {
    fn fetch(
        &self,
        request: &StationRequest,
    ) -> impl Future<Output = Result<Vec<Track>, Error>> + Send;
}

/// [`StationFetcher`] backed by the public Last.fm station player.
#[derive(Debug, Clone)]
pub struct LastfmStation {
    client: Client,
    base_url: String,
}

impl LastfmStation {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(config::lastfm_station_url())
    }

    /// `{base}/{username}/{category}/`, each segment percent-encoded.
    pub fn station_url(&self, request: &StationRequest) -> Result<Url, Error> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidInput(format!("bad station url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidInput(format!("bad station url {}", self.base_url)))?
            .pop_if_empty()
            .push(&request.username)
            .push(&request.category)
            .push("");
        Ok(url)
    }
}

impl StationFetcher for LastfmStation {
    async fn fetch(&self, request: &StationRequest) -> Result<Vec<Track>, Error> {
        let url = self.station_url(request)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::upstream(e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::upstream(e.to_string()))?;

        parse_station(&body)
    }
}

/// Turns a station body into tracks, keeping the response order.
pub fn parse_station(body: &str) -> Result<Vec<Track>, Error> {
    let station: StationResponse = serde_json::from_str(body)?;

    station
        .playlist
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let artist = item.artists.into_iter().next().ok_or_else(|| {
                Error::MalformedResponse(format!("station item {} ({}) has no artists", i, item.name))
            })?;
            Ok(Track {
                name: item.name,
                artist: artist.name,
            })
        })
        .collect()
}
