use tabled::Table;

use crate::{
    error, info,
    lastfm::LastfmStation,
    pipeline::{PlaylistAssembler, SearchFailure},
    spotify::SpotifyCatalog,
    success,
    types::StationRequest,
    utils, warning,
};

pub async fn playlist(
    username: String,
    category: String,
    concurrency: usize,
    on_search_error: SearchFailure,
) {
    let request = match StationRequest::new(username, category) {
        Ok(r) => r,
        Err(e) => error!("{}", e),
    };

    let session = super::load_session().await;
    let pb = super::station::spinner(format!(
        "Building playlist from {} station of {}...",
        request.category, request.username
    ));

    let assembler = PlaylistAssembler::new(
        LastfmStation::from_env(),
        SpotifyCatalog::from_env(session),
    )
    .with_concurrency(concurrency)
    .with_search_failure(on_search_error)
    .with_progress(pb.clone());

    let result = match assembler.run(&request).await {
        Ok(result) => result,
        Err(e) => {
            pb.finish_and_clear();
            if e.needs_reauth() {
                error!("{}\nPlease run stationfy auth", e);
            }
            error!("{}", e);
        }
    };
    pb.finish_and_clear();

    println!("{}", Table::new(utils::track_table_rows(&result.resolved)));

    let added = result.matched_uris().len();
    if added == 0 {
        warning!("No station track matched, playlist {} is empty", result.name);
    }
    info!("Playlist id: {}", result.playlist_id);
    success!(
        "Created playlist {} with {} of {} tracks",
        result.name,
        added,
        result.tracks.len()
    );
}
