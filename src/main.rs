use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use stationfy::{cli, config, error, pipeline::SearchFailure, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show the tracks of a Last.fm station
    Station(StationOptions),

    #[clap(about = "Create a Spotify playlist from a Last.fm station")]
    Playlist(PlaylistOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct StationTarget {
    /// Last.fm username
    #[clap(long = "user", short = 'u')]
    pub username: String,

    /// Station category, e.g. library, mix, recommended
    #[clap(long, short = 'c', default_value = "recommended")]
    pub category: String,

    /// Catalog searches in flight at once (default: STATIONFY_SEARCH_CONCURRENCY or 1)
    #[clap(long)]
    pub concurrency: Option<usize>,
}

#[derive(Parser, Debug, Clone)]
pub struct StationOptions {
    #[clap(flatten)]
    pub target: StationTarget,

    /// Also look every track up on Spotify (nothing is created)
    #[clap(long)]
    pub resolve: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct PlaylistOptions {
    #[clap(flatten)]
    pub target: StationTarget,

    /// Drop tracks whose search fails instead of aborting the run
    #[clap(long)]
    pub skip_search_errors: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Station(opt) => {
            let concurrency = opt
                .target
                .concurrency
                .unwrap_or_else(config::search_concurrency);
            cli::station(
                opt.target.username,
                opt.target.category,
                opt.resolve,
                concurrency,
            )
            .await
        }
        Command::Playlist(opt) => {
            let concurrency = opt
                .target
                .concurrency
                .unwrap_or_else(config::search_concurrency);
            let on_search_error = if opt.skip_search_errors {
                SearchFailure::Skip
            } else {
                config::search_failure()
            };
            cli::playlist(
                opt.target.username,
                opt.target.category,
                concurrency,
                on_search_error,
            )
            .await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
