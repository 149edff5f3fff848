use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use stationfy::error::Error;
use stationfy::spotify::{Catalog, SpotifyCatalog, TrackQuery, resolve};
use stationfy::types::{CatalogSession, Track};

#[derive(Default)]
struct Recorded {
    searches: Vec<HashMap<String, String>>,
    created: Vec<(String, Value)>,
    added: Vec<(String, Value)>,
    auth_headers: Vec<String>,
}

#[derive(Clone)]
struct FakeSpotify {
    recorded: Arc<Mutex<Recorded>>,
    // track filter -> uris in ranking order
    catalog: Arc<HashMap<String, Vec<String>>>,
    status: StatusCode,
}

impl FakeSpotify {
    fn record_auth(&self, headers: &HeaderMap) {
        let value = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.recorded.lock().unwrap().auth_headers.push(value);
    }
}

async fn me(State(fake): State<FakeSpotify>, headers: HeaderMap) -> Response {
    fake.record_auth(&headers);
    if !fake.status.is_success() {
        return fake.status.into_response();
    }
    Json(json!({ "id": "owner-1", "display_name": "Owner" })).into_response()
}

async fn search(
    State(fake): State<FakeSpotify>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    fake.record_auth(&headers);
    fake.recorded.lock().unwrap().searches.push(params.clone());
    if !fake.status.is_success() {
        return (fake.status, "{\"error\":{\"status\":500}}").into_response();
    }

    let q = params.get("q").cloned().unwrap_or_default();
    let items: Vec<Value> = fake
        .catalog
        .iter()
        .filter(|(key, _)| q.starts_with(key.as_str()))
        .flat_map(|(_, uris)| uris.iter())
        .map(|uri| {
            if uri == "null" {
                return Value::Null;
            }
            let id = uri.rsplit(':').next().unwrap_or_default();
            json!({ "id": id, "name": "whatever", "uri": uri })
        })
        .collect();

    // Ignores `limit` on purpose so the client has to pick the first item itself.
    Json(json!({ "tracks": { "items": items, "total": items.len() } })).into_response()
}

async fn create_playlist(
    State(fake): State<FakeSpotify>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut recorded = fake.recorded.lock().unwrap();
    recorded.created.push((user_id, body.clone()));
    let id = format!("playlist-{}", recorded.created.len());
    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "name": body["name"] })),
    )
        .into_response()
}

async fn add_items(
    State(fake): State<FakeSpotify>,
    Path(playlist_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    fake.recorded
        .lock()
        .unwrap()
        .added
        .push((playlist_id, body));
    (StatusCode::CREATED, Json(json!({ "snapshot_id": "snap-1" }))).into_response()
}

async fn serve(catalog: HashMap<String, Vec<String>>, status: StatusCode) -> (String, Arc<Mutex<Recorded>>) {
    let fake = FakeSpotify {
        recorded: Arc::new(Mutex::new(Recorded::default())),
        catalog: Arc::new(catalog),
        status,
    };
    let recorded = Arc::clone(&fake.recorded);

    let app = Router::new()
        .route("/v1/me", get(me))
        .route("/v1/search", get(search))
        .route("/v1/users/{user_id}/playlists", post(create_playlist))
        .route("/v1/playlists/{playlist_id}/tracks", post(add_items))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1", addr), recorded)
}

fn catalog_for(base: String) -> SpotifyCatalog {
    SpotifyCatalog::new(base, CatalogSession::new("token-abc"))
}

#[tokio::test]
async fn test_resolve_takes_first_of_many_results() {
    let mut entries = HashMap::new();
    entries.insert(
        "track:Song A".to_string(),
        vec![
            "spotify:track:X1".to_string(),
            "spotify:track:X2".to_string(),
            "spotify:track:X3".to_string(),
        ],
    );
    let (base, recorded) = serve(entries, StatusCode::OK).await;

    let uri = resolve(&catalog_for(base), &Track::new("Song A", "Artist A"))
        .await
        .unwrap();
    assert_eq!(uri, Some("spotify:track:X1".to_string()));

    let recorded = recorded.lock().unwrap();
    let params = &recorded.searches[0];
    assert_eq!(params["q"], "track:Song A artist:Artist A");
    assert_eq!(params["type"], "track");
    assert_eq!(params["limit"], "1");
    assert_eq!(recorded.auth_headers, vec!["Bearer token-abc".to_string()]);
}

#[tokio::test]
async fn test_resolve_without_results_is_not_found() {
    let (base, _) = serve(HashMap::new(), StatusCode::OK).await;

    let uri = resolve(&catalog_for(base), &Track::new("Song B", "Artist B"))
        .await
        .unwrap();
    assert_eq!(uri, None);
}

#[tokio::test]
async fn test_resolve_null_item_is_not_found() {
    let mut entries = HashMap::new();
    entries.insert("track:Song A".to_string(), vec!["null".to_string()]);
    let (base, _) = serve(entries, StatusCode::OK).await;

    let uri = resolve(&catalog_for(base), &Track::new("Song A", "Artist A"))
        .await
        .unwrap();
    assert_eq!(uri, None);
}

#[tokio::test]
async fn test_search_tracks_skips_null_items() {
    let mut entries = HashMap::new();
    entries.insert(
        "track:Song A".to_string(),
        vec!["null".to_string(), "spotify:track:X2".to_string()],
    );
    let (base, _) = serve(entries, StatusCode::OK).await;

    let query = TrackQuery::for_track(&Track::new("Song A", "Artist A"));
    let uris = catalog_for(base).search_tracks(&query, 5).await.unwrap();
    assert_eq!(uris, vec!["spotify:track:X2"]);
}

#[tokio::test]
async fn test_resolve_server_error_is_upstream_unavailable() {
    let (base, _) = serve(HashMap::new(), StatusCode::INTERNAL_SERVER_ERROR).await;

    let result = resolve(&catalog_for(base), &Track::new("Song A", "Artist A")).await;
    assert!(matches!(result, Err(Error::UpstreamUnavailable { .. })));
}

#[tokio::test]
async fn test_rejected_token_is_upstream_unavailable() {
    let (base, _) = serve(HashMap::new(), StatusCode::UNAUTHORIZED).await;

    let err = catalog_for(base).current_user_id().await.unwrap_err();
    assert!(matches!(
        err,
        Error::UpstreamUnavailable {
            status: Some(StatusCode::UNAUTHORIZED),
            ..
        }
    ));
    assert!(err.is_rejected_token());
}

#[tokio::test]
async fn test_resolve_with_rejected_token_is_upstream_unavailable() {
    let (base, _) = serve(HashMap::new(), StatusCode::UNAUTHORIZED).await;

    let err = resolve(&catalog_for(base), &Track::new("Song A", "Artist A"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UpstreamUnavailable { .. }));
    assert!(err.is_rejected_token());
}

#[tokio::test]
async fn test_server_error_is_not_a_rejected_token() {
    let (base, _) = serve(HashMap::new(), StatusCode::INTERNAL_SERVER_ERROR).await;

    let err = catalog_for(base).current_user_id().await.unwrap_err();
    assert!(!err.is_rejected_token());
}

#[tokio::test]
async fn test_search_tracks_returns_ranked_uris() {
    let mut entries = HashMap::new();
    entries.insert(
        "track:Song A".to_string(),
        vec!["spotify:track:X1".to_string(), "spotify:track:X2".to_string()],
    );
    let (base, _) = serve(entries, StatusCode::OK).await;

    let query = TrackQuery::for_track(&Track::new("Song A", "Artist A"));
    let uris = catalog_for(base).search_tracks(&query, 5).await.unwrap();
    assert_eq!(uris, vec!["spotify:track:X1", "spotify:track:X2"]);
}

#[tokio::test]
async fn test_create_playlist_and_add_items() {
    let (base, recorded) = serve(HashMap::new(), StatusCode::OK).await;
    let catalog = catalog_for(base);

    let owner = catalog.current_user_id().await.unwrap();
    assert_eq!(owner, "owner-1");

    let playlist_id = catalog
        .create_playlist(&owner, "rj's Mix Tracks")
        .await
        .unwrap();
    assert_eq!(playlist_id, "playlist-1");

    let uris = vec!["spotify:track:X1".to_string(), "spotify:track:X2".to_string()];
    catalog.add_items(&playlist_id, &uris).await.unwrap();

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.created.len(), 1);
    assert_eq!(recorded.created[0].0, "owner-1");
    assert_eq!(recorded.created[0].1["name"], "rj's Mix Tracks");
    assert_eq!(recorded.created[0].1["public"], true);

    assert_eq!(recorded.added.len(), 1);
    assert_eq!(recorded.added[0].0, "playlist-1");
    assert_eq!(
        recorded.added[0].1["uris"],
        json!(["spotify:track:X1", "spotify:track:X2"])
    );
}

#[tokio::test]
async fn test_owner_and_playlist_ids_are_path_encoded() {
    let (base, recorded) = serve(HashMap::new(), StatusCode::OK).await;
    let catalog = catalog_for(base);

    let playlist_id = catalog
        .create_playlist("dj shadow/remix", "rj's Mix Tracks")
        .await
        .unwrap();
    catalog
        .add_items("list #1?x", &["spotify:track:X1".to_string()])
        .await
        .unwrap();

    let recorded = recorded.lock().unwrap();
    assert_eq!(playlist_id, "playlist-1");
    assert_eq!(recorded.created[0].0, "dj shadow/remix");
    assert_eq!(recorded.added[0].0, "list #1?x");
}
