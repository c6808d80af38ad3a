//! End-to-end pipeline tests against a mock weather provider.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast_core::FetchError;
use skycast_forecast::{
    cached_only, evaluate, fetch_or_cached, transform, Coordinate, ForecastCache,
    ForecastClient, ForecastSource, RawForecastPayload, Thresholds,
};

fn forecast_body() -> serde_json::Value {
    let t0: i64 = 1_755_900_000;
    json!({
        "cod": "200",
        "cnt": 3,
        "list": [
            {
                "dt": t0,
                "main": { "temp": 31.0, "humidity": 40 },
                "wind": { "speed": 4.0, "deg": 210 }
            },
            {
                "dt": t0 + 10_800,
                "main": { "temp": 24.0, "humidity": 55 },
                "wind": { "speed": 6.0, "deg": 200 },
                "rain": { "3h": 1.2 }
            },
            {
                "dt": t0 + 21_600,
                "main": { "temp": 22.0, "humidity": 60 },
                "wind": { "speed": 2.0, "deg": 190 },
                "rain": { "3h": 0.4 },
                "snow": { "3h": 0.1 }
            }
        ],
        "city": { "name": "Testville" }
    })
}

fn thresholds() -> Thresholds {
    Thresholds {
        high_temp: 30.0,
        low_temp: -5.0,
        high_wind: 50.0,
        high_precip: 5.0,
    }
}

async fn mock_provider(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn live_fetch_populates_cache_and_returns_fresh_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .and(query_param("lat", "47.6"))
        .and(query_param("lon", "-122.3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = ForecastCache::new(dir.path());
    let client = ForecastClient::with_base_url("test-key", &server.uri()).unwrap();
    let coord = Coordinate::parse("47.6", "-122.3").unwrap();

    let (payload, source) = fetch_or_cached(&client, &cache, &coord).await.unwrap();

    assert_eq!(source, ForecastSource::Live);
    assert_eq!(payload.list.len(), 3);
    // Cache slot now holds the same payload
    let cached = cache.load().unwrap().unwrap();
    assert_eq!(cached, payload);
}

#[tokio::test]
async fn non_200_with_primed_cache_falls_back() {
    let server = mock_provider(
        ResponseTemplate::new(503).set_body_json(json!({ "message": "try later" })),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = ForecastCache::new(dir.path());
    let primed: RawForecastPayload = serde_json::from_value(forecast_body()).unwrap();
    cache.save(&primed).unwrap();

    let client = ForecastClient::with_base_url("test-key", &server.uri()).unwrap();
    let coord = Coordinate::new(47.6, -122.3).unwrap();

    let (payload, source) = fetch_or_cached(&client, &cache, &coord).await.unwrap();

    assert_eq!(source, ForecastSource::Cached);
    assert_eq!(payload, primed);
}

#[tokio::test]
async fn non_200_without_cache_is_unavailable() {
    let server = mock_provider(
        ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })),
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    let cache = ForecastCache::new(dir.path());
    let client = ForecastClient::with_base_url("test-key", &server.uri()).unwrap();
    let coord = Coordinate::new(47.6, -122.3).unwrap();

    let err = fetch_or_cached(&client, &cache, &coord).await.unwrap_err();
    assert!(matches!(err, FetchError::Unavailable));
}

#[test]
fn cache_only_serves_primed_slot() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ForecastCache::new(dir.path());
    let primed: RawForecastPayload = serde_json::from_value(forecast_body()).unwrap();
    cache.save(&primed).unwrap();

    let (payload, source) = cached_only(&cache).unwrap();
    assert_eq!(source, ForecastSource::Cached);
    assert_eq!(payload, primed);
}

#[test]
fn cache_only_empty_slot_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let cache = ForecastCache::new(dir.path());

    let err = cached_only(&cache).unwrap_err();
    assert!(matches!(err, FetchError::Unavailable));
}

#[test]
fn cache_only_corrupt_slot_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forecast_cache.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = cached_only(&ForecastCache::at_path(path)).unwrap_err();
    assert!(matches!(err, FetchError::Unavailable));
}

#[tokio::test]
async fn direct_fetch_surfaces_api_message() {
    let server = mock_provider(
        ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid API key" })),
    )
    .await;

    let client = ForecastClient::with_base_url("bad-key", &server.uri()).unwrap();
    let coord = Coordinate::new(0.0, 0.0).unwrap();

    let err = client.fetch(&coord).await.unwrap_err();
    match err {
        FetchError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Invalid API key");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn direct_fetch_defaults_missing_message() {
    let server = mock_provider(ResponseTemplate::new(502)).await;

    let client = ForecastClient::with_base_url("test-key", &server.uri()).unwrap();
    let coord = Coordinate::new(0.0, 0.0).unwrap();

    let err = client.fetch(&coord).await.unwrap_err();
    match err {
        FetchError::Api { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Unknown Error");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn fetched_payload_flows_through_transform_and_alerts() {
    let server =
        mock_provider(ResponseTemplate::new(200).set_body_json(forecast_body())).await;

    let dir = tempfile::tempdir().unwrap();
    let cache = ForecastCache::new(dir.path());
    let client = ForecastClient::with_base_url("test-key", &server.uri()).unwrap();
    let coord = Coordinate::new(47.6, -122.3).unwrap();

    let (payload, _) = fetch_or_cached(&client, &cache, &coord).await.unwrap();
    let entries = transform(&payload).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2].precipitation, 0.5);

    let report = evaluate(&entries, &thresholds());
    let alerts = report.alerts();
    // Only the high-temp rule fires: max temp 31.0 vs threshold 30.0
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].message.contains("31.00"));
}
