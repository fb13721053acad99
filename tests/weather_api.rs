//! Weather gateway endpoints against a stubbed tomorrow.io

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use weather_search::config::WeatherConfig;
use weather_search::store::MemoryFavoritesStore;
use weather_search::{AppState, WeatherGateway, router};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(server: &MockServer) -> axum::Router {
    let config = WeatherConfig {
        api_key: "test-key".to_string(),
        base_url: server.uri(),
        ..WeatherConfig::default()
    };
    let gateway = WeatherGateway::from_config(&config).unwrap();
    router(AppState::new(Arc::new(MemoryFavoritesStore::new()), gateway))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn daily_payload() -> Value {
    json!({
        "data": {
            "timelines": [{
                "timestep": "1d",
                "startTime": "2026-10-16T13:00:00Z",
                "endTime": "2026-10-30T13:00:00Z",
                "intervals": [{
                    "startTime": "2026-10-16T13:00:00Z",
                    "values": { "temperatureMax": 78.4, "temperatureMin": 61.2, "weatherCode": 1000 }
                }]
            }]
        }
    })
}

#[tokio::test]
async fn test_daily_forecast_echoes_query_and_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timelines"))
        .and(query_param("location", "34.05,-118.24"))
        .and(query_param("timesteps", "1d"))
        .and(query_param("units", "imperial"))
        .and(query_param("timezone", "America/Los_Angeles"))
        .and(query_param("apikey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get(
        app(&server),
        "/get-weather?lat=34.05&lon=-118.24&city=Los%20Angeles&state=CA",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["city"], "Los Angeles");
    assert_eq!(body["state"], "CA");
    assert_eq!(body["latitude"], 34.05);
    assert_eq!(body["longitude"], -118.24);
    assert_eq!(body["weather"], daily_payload());
}

#[tokio::test]
async fn test_zero_coordinates_rejected_without_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_payload()))
        .expect(0)
        .mount(&server)
        .await;

    for uri in [
        "/get-weather?lat=0&lon=0&city=Null%20Island&state=XX",
        "/get-weather?lat=34.05",
        "/get-weather?lat=abc&lon=-118.24",
        "/hourly-weather-data?lat=0&lon=-118.24",
        "/get-weather?lat=91&lon=-118.24&city=LA&state=CA",
        "/get-weather?lat=34.05&lat=35.0&lon=-118.24",
        "/hourly-weather-data?lat=34.05&lon=-118.24&lon=-117.0",
    ] {
        let (status, body) = get(app(&server), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({ "error": "Invalid or missing coordinates" }));
    }
}

#[tokio::test]
async fn test_upstream_error_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timelines"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "code": 401001, "message": "The method requires authentication" })),
        )
        .mount(&server)
        .await;

    let (status, body) = get(app(&server), "/get-weather?lat=34.05&lon=-118.24&city=LA&state=CA").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Could not retrieve weather data" }));

    let (status, body) = get(app(&server), "/hourly-weather-data?lat=34.05&lon=-118.24").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Could not retrieve hourly weather data" }));
}

#[tokio::test]
async fn test_daily_shape_mismatch_is_generic_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timelines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "warnings": [] } })))
        .mount(&server)
        .await;

    let (status, body) = get(app(&server), "/get-weather?lat=34.05&lon=-118.24&city=LA&state=CA").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Could not retrieve weather data" }));
}

#[tokio::test]
async fn test_hourly_returns_first_timeline_intervals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timelines"))
        .and(query_param("timesteps", "1h"))
        .and(query_param("startTime", "now"))
        .and(query_param("endTime", "nowPlus6d"))
        .and(query_param("fields", "temperature,humidity,pressureSeaLevel,windSpeed,windDirection"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "timelines": [{
                "timestep": "1h",
                "intervals": [
                    { "startTime": "2026-10-16T18:00:00Z", "values": { "temperature": 71.3, "humidity": 40, "pressureSeaLevel": 29.92, "windSpeed": 4.1, "windDirection": 250 } },
                    { "startTime": "2026-10-16T19:00:00Z", "values": { "temperature": 72.0, "humidity": 38, "pressureSeaLevel": 29.91, "windSpeed": 4.8, "windDirection": 255 } }
                ]
            }]}
        })))
        .mount(&server)
        .await;

    let (status, body) = get(app(&server), "/hourly-weather-data?lat=34.05&lon=-118.24").await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["startTime"], "2026-10-16T18:00:00Z");
    assert_eq!(data[1]["values"]["temperature"], 72.0);
    assert_eq!(data[1]["values"]["pressureSeaLevel"], 29.91);
}
