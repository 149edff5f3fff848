//! # Playlist Pipeline
//!
//! Turns one station into one new playlist:
//!
//! ```text
//! AwaitingStation -> Resolving -> CreatingPlaylist -> AddingTracks -> Done
//!        \______________\________________\_______________\______> Failed
//! ```
//!
//! - The station fetch is all-or-nothing; a failure there creates nothing.
//! - Each track is searched on its own. An empty search drops the track from
//!   the playlist but keeps it in [`PlaylistResult::tracks`].
//! - A failed search aborts the run by default; [`SearchFailure::Skip`]
//!   downgrades it to a per-track miss.
//! - Resolved uris are added in station order with a single batch call, which
//!   is skipped entirely when nothing matched. The playlist is still created.
//! - Nothing is deduplicated: running twice creates two playlists.

use std::{pin::pin, str::FromStr};

use futures::{StreamExt, stream};
use indicatif::ProgressBar;

use crate::{
    error::{Error, PipelineError, Stage},
    lastfm::StationFetcher,
    spotify::{self, Catalog},
    types::{PlaylistResult, ResolvedTrack, StationRequest, Track},
    utils, warning,
};

/// What to do when a catalog search fails outright (as opposed to finding nothing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchFailure {
    #[default]
    Abort,
    Skip,
}

impl FromStr for SearchFailure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(SearchFailure::Abort),
            "skip" => Ok(SearchFailure::Skip),
            other => Err(format!(
                "invalid value '{}', expected 'abort' or 'skip'",
                other
            )),
        }
    }
}

pub struct PlaylistAssembler<S, C> {
    fetcher: S,
    catalog: C,
    concurrency: usize,
    on_search_error: SearchFailure,
    progress: ProgressBar,
}

impl<S: StationFetcher, C: Catalog> PlaylistAssembler<S, C> {
    pub fn new(fetcher: S, catalog: C) -> Self {
        Self {
            fetcher,
            catalog,
            concurrency: 1,
            on_search_error: SearchFailure::default(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Searches allowed in flight at once. Results keep station order either way.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_search_failure(mut self, policy: SearchFailure) -> Self {
        self.on_search_error = policy;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn fetcher(&self) -> &S {
        &self.fetcher
    }

    /// Runs the whole pipeline and creates exactly one playlist on success.
    pub async fn run(&self, request: &StationRequest) -> Result<PlaylistResult, PipelineError> {
        let tracks = self.fetch_station(request).await?;
        let resolved = self.resolve_all(&tracks).await?;

        self.enter(Stage::CreatingPlaylist);
        let name = utils::playlist_name(&request.username, &request.category);
        let owner_id = self
            .catalog
            .current_user_id()
            .await
            .map_err(|e| self.fail(Stage::CreatingPlaylist, e))?;
        let playlist_id = self
            .catalog
            .create_playlist(&owner_id, &name)
            .await
            .map_err(|e| self.fail(Stage::CreatingPlaylist, e))?;

        self.enter(Stage::AddingTracks);
        let uris: Vec<String> = resolved
            .iter()
            .filter_map(|r| r.catalog_id.clone())
            .collect();
        if !uris.is_empty() {
            self.catalog
                .add_items(&playlist_id, &uris)
                .await
                .map_err(|e| self.fail(Stage::AddingTracks, e))?;
        }

        self.enter(Stage::Done);
        Ok(PlaylistResult {
            name,
            owner_id,
            tracks,
            playlist_id,
            resolved,
        })
    }

    /// Fetches and resolves the station without touching any playlist.
    pub async fn preview(
        &self,
        request: &StationRequest,
    ) -> Result<Vec<ResolvedTrack>, PipelineError> {
        let tracks = self.fetch_station(request).await?;
        let resolved = self.resolve_all(&tracks).await?;
        self.enter(Stage::Done);
        Ok(resolved)
    }

    async fn fetch_station(&self, request: &StationRequest) -> Result<Vec<Track>, PipelineError> {
        self.enter(Stage::AwaitingStation);
        self.fetcher
            .fetch(request)
            .await
            .map_err(|e| self.fail(Stage::AwaitingStation, e))
    }

    async fn resolve_all(&self, tracks: &[Track]) -> Result<Vec<ResolvedTrack>, PipelineError> {
        self.enter(Stage::Resolving);
        self.progress.set_length(tracks.len() as u64);
        self.progress.set_position(0);

        let catalog = &self.catalog;
        let progress = &self.progress;
        let mut searches = pin!(
            stream::iter(tracks)
                .map(move |track| async move {
                    let result = spotify::resolve(catalog, track).await;
                    progress.inc(1);
                    (track, result)
                })
                .buffered(self.concurrency)
        );

        let mut resolved = Vec::with_capacity(tracks.len());
        while let Some((track, result)) = searches.next().await {
            let catalog_id = match result {
                Ok(Some(uri)) => Some(uri),
                Ok(None) => {
                    self.progress.suspend(|| {
                        warning!("No match for {} - {}", track.artist, track.name)
                    });
                    None
                }
                Err(e) => match self.on_search_error {
                    SearchFailure::Abort => return Err(self.fail(Stage::Resolving, e)),
                    SearchFailure::Skip => {
                        self.progress.suspend(|| {
                            warning!(
                                "Search failed for {} - {}, skipping: {}",
                                track.artist,
                                track.name,
                                e
                            )
                        });
                        None
                    }
                },
            };

            resolved.push(ResolvedTrack {
                track: track.clone(),
                catalog_id,
            });
        }

        Ok(resolved)
    }

    fn enter(&self, stage: Stage) {
        self.progress.set_message(stage.to_string());
    }

    fn fail(&self, stage: Stage, source: Error) -> PipelineError {
        self.progress.set_message(Stage::Failed.to_string());
        PipelineError::new(stage, source)
    }
}
