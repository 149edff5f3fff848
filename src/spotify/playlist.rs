use crate::{
    error::Error,
    spotify::{SpotifyCatalog, check_status, transport},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUserResponse,
    },
};

pub(crate) async fn current_user_id(catalog: &SpotifyCatalog) -> Result<String, Error> {
    let response = catalog
        .client
        .get(catalog.endpoint(&["me"])?)
        .bearer_auth(catalog.token())
        .send()
        .await
        .map_err(transport)?;

    let response = check_status(response).await?;
    let user = response.json::<CurrentUserResponse>().await?;
    Ok(user.id)
}

/// Creates a public playlist for `owner_id`.
///
/// Every call creates a new playlist, even when one with the same name exists.
pub(crate) async fn create(
    catalog: &SpotifyCatalog,
    owner_id: &str,
    name: &str,
) -> Result<String, Error> {
    let body = CreatePlaylistRequest {
        name: name.to_string(),
        description: String::new(),
        public: true,
    };

    let response = catalog
        .client
        .post(catalog.endpoint(&["users", owner_id, "playlists"])?)
        .bearer_auth(catalog.token())
        .json(&body)
        .send()
        .await
        .map_err(transport)?;

    let response = check_status(response).await?;
    let playlist = response.json::<CreatePlaylistResponse>().await?;
    Ok(playlist.id)
}

/// Adds all `uris` in one request. Spotify caps a request at 100 items;
/// stations are well below that.
pub(crate) async fn add_tracks(
    catalog: &SpotifyCatalog,
    playlist_id: &str,
    uris: &[String],
) -> Result<(), Error> {
    let body = AddTrackToPlaylistRequest {
        uris: uris.to_vec(),
    };

    let response = catalog
        .client
        .post(catalog.endpoint(&["playlists", playlist_id, "tracks"])?)
        .bearer_auth(catalog.token())
        .json(&body)
        .send()
        .await
        .map_err(transport)?;

    let response = check_status(response).await?;
    response.json::<AddTrackToPlaylistResponse>().await?;
    Ok(())
}
