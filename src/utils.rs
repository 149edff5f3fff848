use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;
use sha2::{Digest, Sha256};

use crate::types::{ResolvedTrack, TrackTableRow};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Builds the authorize URL the user is sent to at the start of the PKCE flow.
pub fn build_authorize_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    code_challenge: &str,
    scope: &str,
) -> Result<String, String> {
    let url = Url::parse_with_params(
        auth_url,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", scope),
        ],
    )
    .map_err(|e| e.to_string())?;
    Ok(url.to_string())
}

/// Uppercases the first character and lowercases the rest ("mIX" -> "Mix").
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn playlist_name(username: &str, category: &str) -> String {
    format!("{}'s {} Tracks", username, capitalize(category))
}

pub fn track_table_rows(resolved: &[ResolvedTrack]) -> Vec<TrackTableRow> {
    resolved
        .iter()
        .enumerate()
        .map(|(i, r)| TrackTableRow {
            position: i + 1,
            name: r.track.name.clone(),
            artist: r.track.artist.clone(),
            spotify: r.catalog_id.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}
