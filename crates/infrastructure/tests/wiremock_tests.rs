//! Integration tests for the wired station finder
//!
//! Tests cover:
//! - Address lookup end to end (backend, result region, headless map)
//! - Backend and transport failures
//! - Service status polling
//! - Configuration loading from a file

use std::io::Write;
use std::time::Duration;

use application::{ErrorKind, PlaceGeometry, PlaceInput, PlaceSelection, SubmissionOutcome};
use domain::GeoLocation;
use infrastructure::{AppConfig, MapOverlay, StationFinder};
use integration_transit::TransitConfig;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        transit: TransitConfig::for_testing(server.uri()),
        ..AppConfig::default()
    }
}

fn central_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "station_name": "Central",
        "station_lat": 22.282,
        "station_lng": 114.158,
        "input_lat": 22.280,
        "input_lng": 114.160,
        "walking_directions": [{"instruction": "Turn left", "distance": "50m"}],
        "accessibility": {}
    }))
}

async fn mount_status(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/mtr_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "All lines operating normally",
            "timestamp": "2024-05-01 10:00"
        })))
        .mount(server)
        .await;
}

// ============================================================================
// Lookup Tests
// ============================================================================

mod lookup_tests {
    use super::*;

    #[tokio::test]
    async fn typed_address_is_shown_on_map_and_in_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/find_nearest_mtr"))
            .and(body_json(serde_json::json!({"address": "Central, Hong Kong"})))
            .respond_with(central_response())
            .expect(1)
            .mount(&server)
            .await;

        let finder = StationFinder::from_config(config_for(&server)).unwrap();
        let outcome = finder
            .submit(PlaceInput::free_text("Central, Hong Kong"))
            .await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Displayed {
                station_name: "Central".to_string(),
                degraded: false,
            }
        );

        let html = finder.result_html();
        assert!(html.contains("Central"));
        assert!(html.contains("<li>Turn left (50m)</li>"));
        assert!(html.contains("No accessibility information available."));

        let map = finder.map();
        assert_eq!(map.zoom, Some(15));
        assert_eq!(map.marker_titles(), vec!["Your Location", "Central"]);
        assert_eq!(
            map.overlays
                .iter()
                .filter(|o| matches!(o, MapOverlay::Polyline { .. }))
                .count(),
            1
        );
        let bounds = map.fitted_bounds.unwrap();
        assert!(bounds.contains(&GeoLocation::new(22.282, 114.158).unwrap()));
    }

    #[tokio::test]
    async fn selection_sends_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/find_nearest_mtr"))
            .and(body_json(serde_json::json!({
                "address": "1 Harbour View St, Central",
                "lat": 22.2855,
                "lng": 114.1577
            })))
            .respond_with(central_response())
            .expect(1)
            .mount(&server)
            .await;

        let finder = StationFinder::from_config(config_for(&server)).unwrap();
        let outcome = finder
            .submit(PlaceInput::Selection(PlaceSelection {
                name: "IFC Mall".to_string(),
                formatted_address: Some("1 Harbour View St, Central".to_string()),
                geometry: Some(PlaceGeometry {
                    location: GeoLocation::new(22.2855, 114.1577).unwrap(),
                    viewport: None,
                }),
            }))
            .await;

        assert!(matches!(outcome, SubmissionOutcome::Displayed { .. }));
    }

    #[tokio::test]
    async fn repeated_lookups_keep_one_overlay_set() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/find_nearest_mtr"))
            .respond_with(central_response())
            .mount(&server)
            .await;

        let finder = StationFinder::from_config(config_for(&server)).unwrap();
        finder.submit(PlaceInput::free_text("Central")).await;
        finder.submit(PlaceInput::free_text("Central")).await;

        let map = finder.map();
        assert_eq!(map.marker_count(), 2);
        assert_eq!(map.overlays.len(), 3);
    }

    #[tokio::test]
    async fn backend_error_is_shown_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/find_nearest_mtr"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"error": "Address not found"})),
            )
            .mount(&server)
            .await;

        let finder = StationFinder::from_config(config_for(&server)).unwrap();
        let outcome = finder.submit(PlaceInput::free_text("Nowhere")).await;

        assert_eq!(outcome, SubmissionOutcome::Failed(ErrorKind::Backend));
        assert!(finder.result_html().contains("Address not found"));
        assert!(finder.map().overlays.is_empty());
    }

    #[tokio::test]
    async fn transport_error_keeps_previous_map() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/find_nearest_mtr"))
            .respond_with(central_response())
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/find_nearest_mtr"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let finder = StationFinder::from_config(config_for(&server)).unwrap();
        finder.submit(PlaceInput::free_text("Central")).await;
        let before = finder.map();

        let outcome = finder.submit(PlaceInput::free_text("Admiralty")).await;

        assert_eq!(outcome, SubmissionOutcome::Failed(ErrorKind::Transport));
        assert!(
            finder
                .result_html()
                .contains("An error occurred. Please try again.")
        );
        assert_eq!(finder.map(), before);
    }

    #[tokio::test]
    async fn malformed_success_is_render_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/find_nearest_mtr"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"station_name": 5})),
            )
            .mount(&server)
            .await;

        let finder = StationFinder::from_config(config_for(&server)).unwrap();
        let outcome = finder.submit(PlaceInput::free_text("Central")).await;

        assert_eq!(outcome, SubmissionOutcome::Failed(ErrorKind::Render));
        assert!(finder.map().overlays.is_empty());
    }
}

// ============================================================================
// Status Polling Tests
// ============================================================================

mod status_tests {
    use super::*;

    #[tokio::test]
    async fn start_shows_map_and_status() {
        let server = MockServer::start().await;
        mount_status(&server).await;

        let mut finder = StationFinder::from_config(config_for(&server)).unwrap();
        let mut status = finder.watch_status();
        finder.start().await;

        tokio::time::timeout(Duration::from_secs(5), status.changed())
            .await
            .unwrap()
            .unwrap();

        let html = finder.status_html();
        assert!(html.contains("All lines operating normally"));
        assert!(html.contains("Last updated: 2024-05-01 10:00"));

        let map = finder.map();
        assert_eq!(map.center, Some(GeoLocation::hong_kong()));
        assert_eq!(map.zoom, Some(11));

        finder.shutdown();
    }

    #[tokio::test]
    async fn status_failure_is_shown_in_panel() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mtr_status"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut finder = StationFinder::from_config(config_for(&server)).unwrap();
        let mut status = finder.watch_status();
        finder.start().await;

        tokio::time::timeout(Duration::from_secs(5), status.changed())
            .await
            .unwrap()
            .unwrap();

        assert!(finder.status_html().contains("Unable to load service status"));
        assert!(finder.result_html().is_empty());
    }
}

// ============================================================================
// Configuration Tests
// ============================================================================

mod config_tests {
    use super::*;

    #[tokio::test]
    async fn finder_uses_file_configuration() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/nearest"))
            .respond_with(central_response())
            .expect(1)
            .mount(&server)
            .await;

        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[transit]\nbase_url = \"{}\"\nlocation_path = \"/api/nearest\"\n\n[client]\nresult_zoom = 17",
            server.uri()
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        let finder = StationFinder::from_config(config).unwrap();
        finder.submit(PlaceInput::free_text("Central")).await;

        assert_eq!(finder.map().zoom, Some(17));
    }
}
