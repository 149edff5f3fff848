//! # CLI Module
//!
//! User-facing commands. Each command parses its input, hands the work to the
//! library layers and reports the outcome:
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Pipeline (PlaylistAssembler)
//!     ↓
//! Last.fm station / Spotify catalog clients
//! ```
//!
//! - [`auth`] - OAuth 2.0 PKCE flow, stores the token locally
//! - [`station`] - show a station, optionally with its Spotify matches
//! - [`playlist`] - create a Spotify playlist from a station
//!
//! Failures end the process through the `error!` macro. When the stored token
//! is missing, expired beyond refresh or rejected, the message points the user
//! back to `stationfy auth`.
//!
//! ```bash
//! stationfy auth
//! stationfy station --user rj --category mix --resolve
//! stationfy playlist --user rj --category recommended
//! ```

mod auth;
mod playlist;
mod station;

pub use auth::auth;
pub use playlist::playlist;
pub use station::station;

use crate::{error, management::TokenManager, types::CatalogSession};

async fn load_session() -> CatalogSession {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => error!(
            "Failed to load token. Please run stationfy auth\n Error: {}",
            e
        ),
    };

    match token_mgr.session().await {
        Ok(session) => session,
        Err(e) => error!("{}\nPlease run stationfy auth", e),
    }
}
