use crate::{
    error::Error,
    spotify::{Catalog, SpotifyCatalog, check_status, transport},
    types::{SearchResponse, Track},
};

/// A structured catalog search: name and artist are separate field filters,
/// never a free-text concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    pub track: String,
    pub artist: String,
}

impl TrackQuery {
    pub fn for_track(track: &Track) -> Self {
        Self {
            track: track.name.clone(),
            artist: track.artist.clone(),
        }
    }

    /// The `q` parameter, e.g. `track:Song A artist:Artist A`.
    pub fn to_query_string(&self) -> String {
        format!("track:{} artist:{}", self.track, self.artist)
    }
}

/// Finds the catalog uri for `track`.
///
/// Asks for a single result and takes the first one as ranked by the catalog;
/// there is no secondary scoring. `Ok(None)` means the search came back empty,
/// which callers treat as "skip this track", not as a failure.
pub async fn resolve<C: Catalog>(catalog: &C, track: &Track) -> Result<Option<String>, Error> {
    let query = TrackQuery::for_track(track);
    let uris = catalog.search_tracks(&query, 1).await?;
    Ok(uris.into_iter().next())
}

pub(crate) async fn search_tracks(
    catalog: &SpotifyCatalog,
    query: &TrackQuery,
    limit: u32,
) -> Result<Vec<String>, Error> {
    let limit = limit.to_string();
    let response = catalog
        .client
        .get(catalog.endpoint(&["search"])?)
        .bearer_auth(catalog.token())
        .query(&[
            ("q", query.to_query_string().as_str()),
            ("type", "track"),
            ("limit", limit.as_str()),
        ])
        .send()
        .await
        .map_err(transport)?;

    let response = check_status(response).await?;
    let res = response.json::<SearchResponse>().await?;

    Ok(res.tracks.items.into_iter().flatten().map(|t| t.uri).collect())
}
