use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error,
    lastfm::{LastfmStation, StationFetcher},
    pipeline::PlaylistAssembler,
    spotify::SpotifyCatalog,
    success,
    types::{ResolvedTrack, StationRequest},
    utils,
};

/// Lists a station. With `resolve`, also looks every track up on Spotify
/// without creating anything.
pub async fn station(username: String, category: String, resolve: bool, concurrency: usize) {
    let request = match StationRequest::new(username, category) {
        Ok(r) => r,
        Err(e) => error!("{}", e),
    };

    let pb = spinner(format!(
        "Fetching {} station for {}...",
        request.category, request.username
    ));

    let resolved: Vec<ResolvedTrack> = if resolve {
        let session = super::load_session().await;
        let assembler = PlaylistAssembler::new(LastfmStation::from_env(), SpotifyCatalog::from_env(session))
            .with_concurrency(concurrency)
            .with_progress(pb.clone());
        match assembler.preview(&request).await {
            Ok(resolved) => resolved,
            Err(e) => {
                pb.finish_and_clear();
                error!("{}", e);
            }
        }
    } else {
        match LastfmStation::from_env().fetch(&request).await {
            Ok(tracks) => tracks
                .into_iter()
                .map(|track| ResolvedTrack {
                    track,
                    catalog_id: None,
                })
                .collect(),
            Err(e) => {
                pb.finish_and_clear();
                error!("Failed to fetch station: {}", e);
            }
        }
    };
    pb.finish_and_clear();

    println!("{}", Table::new(utils::track_table_rows(&resolved)));
    if resolve {
        let matched = resolved.iter().filter(|r| r.is_matched()).count();
        success!("Matched {} of {} tracks", matched, resolved.len());
    }
}

pub(crate) fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
