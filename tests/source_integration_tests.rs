use serde_json::json;
use std::path::PathBuf;
use terra::Theme;
use terra::core::action::{Action, Effect, update};
use terra::core::load::{
    LoadPhase, LocalOutcome, RemoteOutcome, STATUS_LOCAL_FALLBACK, STATUS_REMOTE_FAILED,
    STATUS_REMOTE_SUCCESS, fetch_countries,
};
use terra::core::state::{App, View};
use terra::data::{CountrySource, LocalFileSource, RestCountriesSource, SourceError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Writes `contents` to a fresh temp file and returns its path.
fn write_temp_json(contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("terra-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let file = dir.join("countries.json");
    std::fs::write(&file, contents).unwrap();
    file
}

fn missing_file() -> PathBuf {
    std::env::temp_dir()
        .join(format!("terra-it-{}", uuid::Uuid::new_v4()))
        .join("countries.json")
}

fn api_payload() -> serde_json::Value {
    json!([
        {
            "name": {
                "common": "Germany",
                "official": "Federal Republic of Germany",
                "nativeName": { "deu": { "official": "Bundesrepublik Deutschland", "common": "Deutschland" } }
            },
            "cca3": "DEU",
            "population": 83240525,
            "region": "Europe",
            "subregion": "Western Europe",
            "capital": ["Berlin"],
            "currencies": { "EUR": { "name": "Euro", "symbol": "€" } },
            "languages": { "deu": "German" },
            "borders": ["FRA"],
            "flags": { "png": "https://flagcdn.com/w320/de.png", "alt": "Black, red and gold" }
        },
        {
            "name": { "common": "France", "official": "French Republic" },
            "cca3": "FRA",
            "population": 67391582,
            "region": "Europe",
            "capital": ["Paris"],
            "borders": ["DEU"]
        }
    ])
}

const TESTLAND: &str = r#"[{
    "name": "Testland",
    "alpha3Code": "TST",
    "population": 1234,
    "region": "Testregion",
    "capital": "Test City",
    "currencies": [{ "name": "Test Dollar" }],
    "languages": [{ "name": "Testish" }],
    "borders": []
}]"#;

/// Drives the reducer through a full load, with the effects applied inline
/// the way the event loop applies them.
async fn run_load_sequence(local: &dyn CountrySource, remote: &dyn CountrySource) -> App {
    let mut app = App::new(Theme::Dark);

    assert_eq!(update(&mut app, Action::StartLoading), Effect::FetchLocal);
    let local_result = fetch_countries(local).await;
    assert_eq!(update(&mut app, Action::LocalLoaded(local_result)), Effect::FetchRemote);

    update(&mut app, Action::RemoteRequested);
    assert_eq!(app.phase(), LoadPhase::RemoteLoading);
    let remote_result = fetch_countries(remote).await;
    update(&mut app, Action::RemoteLoaded(remote_result));

    assert!(app.phase().is_settled());
    app
}

// ============================================================================
// REST Source Tests
// ============================================================================

#[tokio::test]
async fn test_rest_source_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3.1/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_payload()))
        .mount(&mock_server)
        .await;

    let source = RestCountriesSource::new(Some(format!("{}/v3.1/all", mock_server.uri())));
    let countries = fetch_countries(&source).await.unwrap();

    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].code, "DEU");
    assert_eq!(countries[0].native_name, "Deutschland");
    assert_eq!(countries[0].currencies, vec!["Euro"]);
    assert_eq!(countries[0].flag_alt, "Black, red and gold");
    assert_eq!(countries[1].capital, "Paris");
}

#[tokio::test]
async fn test_rest_source_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let source = RestCountriesSource::new(Some(mock_server.uri()));
    let result = source.fetch().await;

    match result {
        Err(SourceError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rest_source_non_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let source = RestCountriesSource::new(Some(mock_server.uri()));
    assert!(matches!(source.fetch().await, Err(SourceError::Parse(_))));
}

#[tokio::test]
async fn test_rest_source_non_array_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": 404})))
        .mount(&mock_server)
        .await;

    let source = RestCountriesSource::new(Some(mock_server.uri()));
    assert!(matches!(source.fetch().await, Err(SourceError::Parse(_))));
}

#[tokio::test]
async fn test_rest_source_network_error() {
    // Nothing listens on port 1
    let source = RestCountriesSource::new(Some("http://127.0.0.1:1/all".to_string()));
    assert!(matches!(source.fetch().await, Err(SourceError::Network(_))));
}

// ============================================================================
// Local Source Tests
// ============================================================================

#[tokio::test]
async fn test_local_source_mixed_shapes() {
    let file = write_temp_json(
        r#"[
            {"name": "Chad", "alpha3Code": "TCD", "region": "Africa"},
            null,
            {"name": {"common": "Peru"}, "cca3": "PER", "region": "Americas"}
        ]"#,
    );
    let source = LocalFileSource::new(&file);
    let countries = fetch_countries(&source).await.unwrap();

    let names: Vec<&str> = countries.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Chad", "Peru"]);
}

#[tokio::test]
async fn test_bundled_sample_file_loads() {
    let file = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/countries.json");
    let countries = fetch_countries(&LocalFileSource::new(file)).await.unwrap();

    assert!(countries.len() >= 5);
    assert!(countries.iter().all(|c| !c.code.is_empty() && !c.name.is_empty()));
}

// ============================================================================
// Load Sequence Tests
// ============================================================================

#[tokio::test]
async fn test_local_then_remote_replaces_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_payload()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let local = LocalFileSource::new(write_temp_json(TESTLAND));
    let remote = RestCountriesSource::new(Some(mock_server.uri()));
    let app = run_load_sequence(&local, &remote).await;

    assert_eq!(app.phase(), LoadPhase::RemoteLoaded(RemoteOutcome::Success));
    assert_eq!(app.status_message(), STATUS_REMOTE_SUCCESS);
    let codes: Vec<&str> = app.countries().iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["DEU", "FRA"]);
}

#[tokio::test]
async fn test_remote_failure_keeps_local_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let local = LocalFileSource::new(write_temp_json(TESTLAND));
    let remote = RestCountriesSource::new(Some(mock_server.uri()));
    let app = run_load_sequence(&local, &remote).await;

    assert_eq!(app.phase(), LoadPhase::RemoteLoaded(RemoteOutcome::KeepLocal));
    assert_eq!(app.status_message(), STATUS_REMOTE_FAILED);
    assert_eq!(app.countries().len(), 1);

    let testland = &app.countries()[0];
    assert_eq!(testland.code, "TST");
    assert_eq!(testland.name, "Testland");
    assert_eq!(testland.population, 1234);
    assert_eq!(testland.region, "Testregion");
    assert_eq!(testland.capital, "Test City");
    assert_eq!(testland.currencies, vec!["Test Dollar"]);
    assert_eq!(testland.languages, vec!["Testish"]);
    assert!(testland.borders.is_empty());
}

#[tokio::test]
async fn test_missing_local_file_uses_fallback_then_remote() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_payload()))
        .mount(&mock_server)
        .await;

    let mut app = App::new(Theme::Dark);
    update(&mut app, Action::StartLoading);
    let local_result = fetch_countries(&LocalFileSource::new(missing_file())).await;
    assert!(matches!(local_result, Err(SourceError::Missing(_))));
    update(&mut app, Action::LocalLoaded(local_result));

    assert_eq!(app.phase(), LoadPhase::LocalLoaded(LocalOutcome::Fallback));
    assert_eq!(app.status_message(), STATUS_LOCAL_FALLBACK);
    assert_eq!(app.countries()[0].name, "Fallback Country");

    update(&mut app, Action::RemoteRequested);
    let remote = RestCountriesSource::new(Some(mock_server.uri()));
    update(&mut app, Action::RemoteLoaded(fetch_countries(&remote).await));
    assert_eq!(app.countries().len(), 2);
}

#[tokio::test]
async fn test_search_and_selection_survive_remote_replacement() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_payload()))
        .mount(&mock_server)
        .await;

    let local_file = write_temp_json(
        r#"[
            {"name": "France", "alpha3Code": "FRA", "region": "Europe"},
            {"name": "Japan", "alpha3Code": "JPN", "region": "Asia"}
        ]"#,
    );

    let mut app = App::new(Theme::Dark);
    update(&mut app, Action::StartLoading);
    let local_result = fetch_countries(&LocalFileSource::new(local_file)).await;
    update(&mut app, Action::LocalLoaded(local_result));

    // The user searches and opens France while the API request is in flight.
    update(&mut app, Action::SearchChanged("fr".to_string()));
    update(&mut app, Action::OpenFiltered(0));
    update(&mut app, Action::RemoteRequested);

    let remote = RestCountriesSource::new(Some(mock_server.uri()));
    update(&mut app, Action::RemoteLoaded(fetch_countries(&remote).await));

    assert_eq!(app.filtered().len(), 1);
    assert_eq!(app.filtered()[0].capital, "Paris");
    assert_eq!(app.view(), View::Detail);
    assert_eq!(app.selected().unwrap().capital, "Paris");
    let borders: Vec<String> = app.selected_borders().into_iter().map(|l| l.name).collect();
    assert_eq!(borders, vec!["Germany"]);
}

#[tokio::test]
async fn test_remote_network_error_keeps_local_record() {
    let local = LocalFileSource::new(write_temp_json(TESTLAND));
    // Nothing listens on port 1
    let remote = RestCountriesSource::new(Some("http://127.0.0.1:1/all".to_string()));
    let app = run_load_sequence(&local, &remote).await;

    assert_eq!(app.phase(), LoadPhase::RemoteLoaded(RemoteOutcome::KeepLocal));
    assert_eq!(app.status_message(), STATUS_REMOTE_FAILED);
    let codes: Vec<&str> = app.countries().iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["TST"]);
}
