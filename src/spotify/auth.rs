use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config,
    error::Error,
    server::start_api_server,
    spotify::{check_status, transport},
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// Runs the OAuth 2.0 authorization-code flow with PKCE against Spotify.
///
/// 1. Generates the code verifier and its S256 challenge
/// 2. Starts the local callback server
/// 3. Opens the authorization URL in the browser
/// 4. Waits for the callback handler to exchange the code
///
/// The resulting token is returned, not stored; persisting it is up to the
/// caller (see [`crate::management::TokenManager`]).
///
/// # Errors
///
/// Returns [`Error::Auth`] when no token arrives within 60 seconds, or
/// [`Error::InvalidInput`] when the configured authorize URL is unusable.
pub async fn authorize(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<Token, Error> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let auth_url = utils::build_authorize_url(
        &config::spotify_apiauth_url(),
        &config::spotify_client_id(),
        &config::spotify_redirect_uri(),
        &code_challenge,
        &config::spotify_scope(),
    )
    .map_err(Error::InvalidInput)?;

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    wait_for_token(shared_state, Duration::from_secs(60))
        .await
        .ok_or_else(|| Error::Auth("authorization failed or timed out".to_string()))
}

/// Polls the shared state once a second until the callback stored a token.
async fn wait_for_token(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
    max_wait: Duration,
) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify may omit `refresh_token` from the response, in which case the old
/// one stays valid and is carried over.
pub async fn refresh_token(token_url: &str, refresh_token: &str) -> Result<Token, Error> {
    let client_id = config::spotify_client_id();

    let client = Client::new();
    let res = client
        .post(token_url)
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await
        .map_err(transport)?;

    let res = check_status(res).await?;
    let json = res.json::<TokenResponse>().await?;
    Ok(into_token(json, Some(refresh_token)))
}

/// Exchanges an authorization code for an access token using the PKCE verifier.
pub async fn exchange_code_pkce(
    token_url: &str,
    code: &str,
    verifier: &str,
) -> Result<Token, Error> {
    let client_id = config::spotify_client_id();
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(transport)?;

    let res = check_status(res).await?;
    let json = res.json::<TokenResponse>().await?;
    Ok(into_token(json, None))
}

pub fn into_token(res: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: res.access_token,
        refresh_token: res
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        scope: res.scope.unwrap_or_default(),
        expires_in: res.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    }
}
