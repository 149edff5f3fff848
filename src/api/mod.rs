//! # API Module
//!
//! HTTP endpoints served by the local callback server while `stationfy auth`
//! is running.
//!
//! - [`callback`] - receives `?code=` from Spotify's authorization server and
//!   exchanges it, together with the stored PKCE verifier, for a token
//! - [`health`] - status and version, handy to check the redirect target is up
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use stationfy::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
