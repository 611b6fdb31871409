//! Integration tests for the OpenWeather client using wiremock

use integration_openweather::{OpenWeatherClient, OpenWeatherConfig, OpenWeatherError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LATITUDE: f64 = 51.5074;
const LONGITUDE: f64 = -0.1278;
const API_KEY: &str = "test-api-key";

fn sample_onecall_response() -> serde_json::Value {
    serde_json::json!({
        "lat": LATITUDE,
        "lon": LONGITUDE,
        "timezone": "Europe/London",
        "current": {
            "dt": 1717243000,
            "sunrise": 1717213200,
            "sunset": 1717272000,
            "temp": 20.0,
            "dew_point": 10.0,
            "humidity": 80,
            "clouds": 25,
            "weather": [
                { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }
            ]
        }
    })
}

/// Create a test client configured to use the mock server
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(mock_server: &MockServer) -> OpenWeatherClient {
    let config = OpenWeatherConfig {
        base_url: mock_server.uri(),
        api_key: API_KEY.to_string(),
        timeout_secs: 5,
    };
    #[allow(clippy::expect_used)]
    OpenWeatherClient::new(config).expect("Failed to create client")
}

#[tokio::test]
async fn test_get_current_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .and(query_param("lat", LATITUDE.to_string()))
        .and(query_param("lon", LONGITUDE.to_string()))
        .and(query_param("appid", API_KEY))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_onecall_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(LATITUDE, LONGITUDE).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");

    let fields = result.unwrap();
    assert!((fields.temperature.expect("temperature").value - 20.0).abs() < 0.1);
    assert!((fields.dew_point.expect("dew point").value - 10.0).abs() < 0.1);
    assert!((fields.humidity.expect("humidity").value - 80.0).abs() < 0.1);
    assert!((fields.cloudiness.expect("cloudiness").value - 25.0).abs() < 0.1);

    let conditions = fields.conditions.expect("conditions");
    assert_eq!(conditions.original.as_deref(), Some("clear sky"));
    assert!(fields.sunrise.is_some());
    assert!(fields.sunset.is_some());
}

#[tokio::test]
async fn test_missing_current_block() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "lat": LATITUDE,
            "lon": LONGITUDE,
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(LATITUDE, LONGITUDE).await;

    assert!(
        matches!(
            result,
            Err(OpenWeatherError::MissingData(ref message))
                if message == "No current weather data in response"
        ),
        "Expected MissingData, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unauthorized_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(LATITUDE, LONGITUDE).await;

    assert!(
        matches!(result, Err(OpenWeatherError::Http { status: 401, .. })),
        "Expected HTTP 401, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rate_limit_exposes_retry_after() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "60"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(LATITUDE, LONGITUDE).await;

    assert!(
        matches!(
            result,
            Err(OpenWeatherError::Http {
                status: 429,
                retry_after: Some(60),
                ..
            })
        ),
        "Expected HTTP 429 with retry hint, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(LATITUDE, LONGITUDE).await;

    assert!(
        matches!(result, Err(OpenWeatherError::Http { status: 500, .. })),
        "Expected HTTP 500, got: {result:?}"
    );
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not valid json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.get_current(LATITUDE, LONGITUDE).await;

    assert!(
        matches!(result, Err(OpenWeatherError::Parse(_))),
        "Expected Parse, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unreachable_server_is_a_network_error() {
    let config = OpenWeatherConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        api_key: API_KEY.to_string(),
        timeout_secs: 5,
    };
    #[allow(clippy::expect_used)]
    let client = OpenWeatherClient::new(config).expect("Failed to create client");
    let result = client.get_current(LATITUDE, LONGITUDE).await;

    assert!(
        matches!(result, Err(OpenWeatherError::Network(_))),
        "Expected Network, got: {result:?}"
    );
}
