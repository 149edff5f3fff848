//! # Last.fm Station Module
//!
//! Fetches the ordered track list of a Last.fm station (`library`, `mix`,
//! `recommended`, ...) for a user. The station player serves plain JSON:
//!
//! ```text
//! GET {base}/{username}/{category}/
//! { "playlist": [ { "name": "...", "artists": [ { "name": "..." } ] } ] }
//! ```
//!
//! Only the first artist of every item is kept. Pagination is not followed;
//! one request yields the whole station.

pub mod station;

pub use station::{LastfmStation, StationFetcher};
