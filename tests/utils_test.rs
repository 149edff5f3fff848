use stationfy::error::Error;
use stationfy::pipeline::SearchFailure;
use stationfy::spotify::TrackQuery;
use stationfy::types::{ResolvedTrack, StationRequest, Track};
use stationfy::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    // RFC 7636 appendix B
    let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    assert_eq!(
        generate_code_challenge(verifier),
        "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
    );

    // Different input should produce different output
    assert_ne!(
        generate_code_challenge(verifier),
        generate_code_challenge("different_verifier")
    );
}

#[test]
fn test_build_authorize_url() {
    let url = build_authorize_url(
        "https://accounts.spotify.com/authorize",
        "client-123",
        "http://127.0.0.1:8888/callback",
        "challenge",
        "playlist-modify-public",
    )
    .unwrap();

    assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
    assert!(url.contains("client_id=client-123"));
    assert!(url.contains("response_type=code"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    assert!(url.contains("code_challenge=challenge"));
    assert!(url.contains("code_challenge_method=S256"));
    assert!(url.contains("scope=playlist-modify-public"));

    assert!(build_authorize_url("not a url", "c", "r", "x", "s").is_err());
}

#[test]
fn test_capitalize() {
    assert_eq!(capitalize("mix"), "Mix");
    assert_eq!(capitalize("RECOMMENDED"), "Recommended");
    assert_eq!(capitalize("lIbRaRy"), "Library");
    assert_eq!(capitalize(""), "");
    assert_eq!(capitalize("émile"), "Émile");
}

#[test]
fn test_playlist_name() {
    assert_eq!(playlist_name("rj", "mix"), "rj's Mix Tracks");
    assert_eq!(playlist_name("Some_User", "library"), "Some_User's Library Tracks");
}

#[test]
fn test_track_query_uses_field_filters() {
    let query = TrackQuery::for_track(&Track::new("Song A", "Artist A"));
    assert_eq!(query.track, "Song A");
    assert_eq!(query.artist, "Artist A");
    assert_eq!(query.to_query_string(), "track:Song A artist:Artist A");
}

#[test]
fn test_station_request_rejects_empty_input() {
    assert!(StationRequest::new("rj", "mix").is_ok());
    assert!(matches!(
        StationRequest::new("", "mix"),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        StationRequest::new("rj", ""),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn test_station_request_only_checks_for_empty() {
    let request = StationRequest::new(" ", "mix").unwrap();
    assert_eq!(request.username, " ");
}

#[test]
fn test_search_failure_from_str() {
    assert_eq!("abort".parse::<SearchFailure>(), Ok(SearchFailure::Abort));
    assert_eq!(" Skip ".parse::<SearchFailure>(), Ok(SearchFailure::Skip));
    assert!("retry".parse::<SearchFailure>().is_err());
    assert_eq!(SearchFailure::default(), SearchFailure::Abort);
}

#[test]
fn test_track_table_rows() {
    let resolved = vec![
        ResolvedTrack {
            track: Track::new("Song A", "Artist A"),
            catalog_id: Some("spotify:track:X1".to_string()),
        },
        ResolvedTrack {
            track: Track::new("Song B", "Artist B"),
            catalog_id: None,
        },
    ];

    let rows = track_table_rows(&resolved);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[0].spotify, "spotify:track:X1");
    assert_eq!(rows[1].position, 2);
    assert_eq!(rows[1].name, "Song B");
    assert_eq!(rows[1].spotify, "-");
}
