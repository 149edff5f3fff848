//! Last.fm station to Spotify playlist library
//!
//! Fetches the track list of a Last.fm station for a user and category,
//! resolves every track against the Spotify catalog and creates a new
//! playlist with the matches.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy and pipeline stages
//! - `lastfm` - Last.fm station client
//! - `management` - Token persistence and refresh
//! - `pipeline` - Station-to-playlist orchestration
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client and authorization
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use stationfy::{
//!     lastfm::LastfmStation, pipeline::PlaylistAssembler, spotify::SpotifyCatalog,
//!     types::{CatalogSession, StationRequest},
//! };
//!
//! #[tokio::main]
//! async fn main() -> stationfy::Res<()> {
//!     let catalog = SpotifyCatalog::from_env(CatalogSession::new("BQC..."));
//!     let assembler = PlaylistAssembler::new(LastfmStation::from_env(), catalog);
//!     let result = assembler.run(&StationRequest::new("rj", "mix")?).await?;
//!     println!("{} ({} tracks)", result.name, result.matched_uris().len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod lastfm;
pub mod management;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the CLI and server glue where any error just gets reported. The
/// station and catalog clients return [`error::Error`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Fetching station {} for {}", category, username);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green checkmark once an operation completed.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits the process with status 1.
///
/// Only for the CLI layer: library code returns errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for recoverable problems, e.g. a track without a match.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
