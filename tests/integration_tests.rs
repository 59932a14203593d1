use httpmock::prelude::*;
use mobility_map::domain::model::{LoadingState, Position};
use mobility_map::{CliConfig, MobilityMap, OutputFormat};

fn config_for(server: &MockServer) -> CliConfig {
    CliConfig {
        config: None,
        lat: None,
        lon: None,
        stop: None,
        json: false,
        interactive: false,
        style_url: "/styles.json".to_string(),
        nominatim_url: server.base_url(),
        transport_url: server.base_url(),
        results: 30,
        distance: 1000,
        language: "de".to_string(),
        timeout_seconds: 5,
        name_fragments: vec![", Frankfurt a.M.".to_string(), "Frankfurt(M)".to_string()],
        verbose: false,
        log_json: false,
    }
}

fn stops_body() -> serde_json::Value {
    serde_json::json!([
        {
            "type": "stop",
            "id": "000105005",
            "name": "Frankfurt(M) Hauptbahnhof",
            "location": {"type": "location", "latitude": 50.107145, "longitude": 8.663789},
            "products": {
                "nationalExpress": true, "national": true, "regionalExpress": true,
                "regional": true, "suburban": true, "bus": true, "ferry": false,
                "subway": true, "tram": true, "taxi": false
            },
            "lines": [
                {"type": "line", "name": "ICE 597", "product": "nationalExpress"},
                {"type": "line", "name": "S 8", "product": "suburban"},
                {"type": "line", "name": "U 4", "product": "subway"},
                {"type": "line", "name": "S 9", "product": "suburban"},
                {"type": "line", "name": "STR 11", "product": "tram"}
            ],
            "distance": 140
        },
        {
            "type": "stop",
            "id": "000105006",
            "name": "Hauptbahnhof tief, Frankfurt a.M.",
            "location": {"type": "location", "latitude": 50.1071, "longitude": 8.6637},
            "products": {"suburban": true},
            "station": {"type": "station", "id": "000105005"},
            "lines": [{"type": "line", "name": "S 8", "product": "suburban"}]
        },
        {
            "type": "stop",
            "id": "000111111",
            "name": "Mainkai Anleger",
            "location": {"type": "location", "latitude": 50.108, "longitude": 8.68},
            "products": {"ferry": true},
            "lines": []
        },
        {
            "type": "stop",
            "id": "000104734",
            "name": "Baseler Platz, Frankfurt a.M.",
            "location": {"type": "location", "latitude": 50.1055, "longitude": 8.6705},
            "products": {"bus": true, "tram": true},
            "lines": [
                {"type": "line", "name": "Bus 46", "product": "bus"},
                {"type": "line", "name": "STR 16", "product": "tram"}
            ],
            "distance": 420
        }
    ])
}

async fn mock_services(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/locations/nearby")
                .query_param("linesOfStops", "true");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(stops_body());
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/reverse");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "address": {
                        "road": "Am Hauptbahnhof",
                        "house_number": "1",
                        "suburb": "Gutleutviertel"
                    }
                }));
        })
        .await;
}

#[tokio::test]
async fn test_end_to_end_load_at_position() {
    let server = MockServer::start_async().await;
    mock_services(&server).await;

    let map = MobilityMap::from_config(&config_for(&server), OutputFormat::Text).unwrap();
    map.load(Some(Position::new(50.107, 8.664))).await;

    let state = map.session().snapshot();
    assert_eq!(state.loading, LoadingState::Loaded);
    assert_eq!(state.address.as_deref(), Some("Am Hauptbahnhof 1 (Gutleutviertel)"));

    // 月台 000105006 屬於已列出的車站，應被過濾
    let ids: Vec<&str> = state.stops.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["000105005", "000111111", "000104734"]);
    assert_eq!(state.stops[0].name, "Hauptbahnhof");
    assert_eq!(state.stops[2].name, "Baseler Platz");

    // 只有渡輪的站點沒有地圖標記
    let markers = state.markers();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].stop_id, "000105005");

    let output = map.render().unwrap();
    assert!(output.starts_with("📍 Am Hauptbahnhof 1 (Gutleutviertel)"));
    assert!(output.contains("(Zug) Hauptbahnhof [000105005] (140 m)"));
    assert!(output.contains("(Tram) Baseler Platz [000104734] (420 m)"));
    assert!(!output.contains("Mainkai"));
}

#[tokio::test]
async fn test_end_to_end_load_defaults_to_map_center() {
    let server = MockServer::start_async().await;
    let stops_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/locations/nearby")
                .query_param("latitude", "50.115161")
                .query_param("longitude", "8.683737");
            then.status(200).json_body(serde_json::json!([]));
        })
        .await;
    let geo_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/reverse")
                .query_param("lat", "50.115161")
                .query_param("lon", "8.683737");
            then.status(200)
                .json_body(serde_json::json!({"address": {"road": "Zeil"}}));
        })
        .await;

    let map = MobilityMap::from_config(&config_for(&server), OutputFormat::Text).unwrap();
    map.load(None).await;

    stops_mock.assert_async().await;
    geo_mock.assert_async().await;
    let output = map.render().unwrap();
    assert!(output.contains("📍 Zeil"));
    assert!(output.contains("Keine Haltestellen in der Nähe"));
}

#[tokio::test]
async fn test_end_to_end_with_service_failures() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/locations/nearby");
            then.status(503);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/reverse");
            then.status(500);
        })
        .await;

    let map = MobilityMap::from_config(&config_for(&server), OutputFormat::Json).unwrap();
    map.load(Some(Position::new(50.1, 8.6))).await;

    let state = map.session().snapshot();
    assert_eq!(state.loading, LoadingState::Loaded);
    assert!(state.stops.is_empty());
    assert!(state.address.is_none());

    let json: serde_json::Value = serde_json::from_str(&map.render().unwrap()).unwrap();
    assert_eq!(json["loading"], "loaded");
    assert_eq!(json["markers"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_interactive_session() {
    let server = MockServer::start_async().await;
    mock_services(&server).await;

    let map = MobilityMap::from_config(&config_for(&server), OutputFormat::Text).unwrap();
    let input: &[u8] = b"50.107 8.664\nstop 000105005\nstop nope\nclose\nbogus input\nquit\n50.2 8.7\n";
    let mut out = Vec::new();

    map.run_interactive(tokio::io::BufReader::new(input), &mut out)
        .await
        .unwrap();

    let output = String::from_utf8(out).unwrap();
    // Sidebar: lines grouped by product, prefixes removed
    assert!(output.contains("Hauptbahnhof\n============\n"));
    assert!(output.contains("[Zug] ICE 597"));
    assert!(output.contains("[S] 8, 9"));
    assert!(output.contains("[U] 4"));
    assert!(output.contains("[Tram] 11"));
    assert!(output.contains("Unbekannte Haltestelle: nope"));
    assert!(output.contains("❌"));

    // quit stops reading; the last click is never issued
    let state = map.session().snapshot();
    assert_eq!(state.position, Some(Position::new(50.107, 8.664)));
    assert!(!state.sidebar_open());
}
