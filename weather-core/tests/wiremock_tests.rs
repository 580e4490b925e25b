//! Integration tests for the geocoding and forecast clients using wiremock
//!
//! These tests run the real HTTP clients against a mock server, checking
//! query construction, candidate filtering and error mapping.

use weather_core::{
    Config, Coordinates, ForecastProvider, Geocoder, TemperatureUnit, WeatherError,
    WeatherService,
    provider::{NominatimGeocoder, OpenMeteoClient, http_client},
    render,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header_exists, method, path, query_param, query_param_is_missing},
};

fn test_config(mock_server: &MockServer) -> Config {
    Config {
        geocoding_url: format!("{}/search", mock_server.uri()),
        forecast_url: format!("{}/v1/forecast", mock_server.uri()),
        timeout_secs: Some(5),
        ..Config::default()
    }
}

fn geocoder(mock_server: &MockServer) -> NominatimGeocoder {
    let config = test_config(mock_server);
    NominatimGeocoder::from_config(&config, http_client(&config).expect("client builds"))
}

fn forecaster(mock_server: &MockServer) -> OpenMeteoClient {
    let config = test_config(mock_server);
    OpenMeteoClient::from_config(&config, http_client(&config).expect("client builds"))
}

fn paris_candidates() -> serde_json::Value {
    serde_json::json!([
        {
            "place_id": 1,
            "class": "boundary",
            "type": "administrative",
            "lat": "48.8588897",
            "lon": "2.3200410",
            "display_name": "Paris, Île-de-France, France"
        },
        {
            "place_id": 2,
            "class": "place",
            "type": "city",
            "lat": "48.8534951",
            "lon": "2.3483915",
            "display_name": "Paris, Île-de-France, France"
        },
        {
            "place_id": 3,
            "class": "place",
            "type": "town",
            "lat": "33.6617962",
            "lon": "-95.5555130",
            "display_name": "Paris, Lamar County, Texas, United States"
        }
    ])
}

/// One day of hourly data, readings 0.0 ..= 23.0.
fn one_day_forecast() -> serde_json::Value {
    let time: Vec<String> = (0..24).map(|h| format!("2024-01-01T{h:02}:00")).collect();
    let temps: Vec<f64> = (0..24).map(f64::from).collect();

    serde_json::json!({
        "latitude": 48.86,
        "longitude": 2.3399997,
        "generationtime_ms": 0.05,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "current_units": {"time": "iso8601", "interval": "seconds", "temperature_2m": "°C"},
        "current": {"time": "2024-01-01T12:00", "interval": 900, "temperature_2m": 7.4},
        "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
        "hourly": {"time": time, "temperature_2m": temps}
    })
}

async fn mount_geocoder(mock_server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(mock_server)
        .await;
}

// ============================================================================
// Geocoder
// ============================================================================

#[tokio::test]
async fn test_resolve_returns_first_city_unchanged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("city", "Paris"))
        .and(query_param("format", "json"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(paris_candidates()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let coords = geocoder(&mock_server).resolve("Paris").await.unwrap();

    assert_eq!(coords, Some(Coordinates::new(48.8534951, 2.3483915)));
}

#[tokio::test]
async fn test_resolve_multi_word_city_is_sent_as_one_value() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("city", "New York"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"type": "city", "lat": "40.7127281", "lon": "-74.0060152"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let coords = geocoder(&mock_server).resolve("New York").await.unwrap();

    assert_eq!(coords, Some(Coordinates::new(40.7127281, -74.0060152)));
}

#[tokio::test]
async fn test_resolve_without_city_or_town_is_none() {
    let mock_server = MockServer::start().await;
    mount_geocoder(
        &mock_server,
        serde_json::json!([
            {"type": "river", "lat": "1.0", "lon": "1.0"},
            {"type": "administrative", "lat": "2.0", "lon": "2.0"}
        ]),
    )
    .await;

    let coords = geocoder(&mock_server).resolve("Seine").await.unwrap();
    assert_eq!(coords, None);
}

#[tokio::test]
async fn test_resolve_empty_result_is_none() {
    let mock_server = MockServer::start().await;
    mount_geocoder(&mock_server, serde_json::json!([])).await;

    let coords = geocoder(&mock_server).resolve("Atlantis").await.unwrap();
    assert_eq!(coords, None);
}

#[tokio::test]
async fn test_resolve_server_error_is_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try again later"))
        .mount(&mock_server)
        .await;

    let err = geocoder(&mock_server).resolve("Paris").await.unwrap_err();

    assert!(matches!(err, WeatherError::Status { .. }));
    assert!(err.to_string().contains("503"));
    assert!(err.to_string().contains("try again later"));
}

#[tokio::test]
async fn test_resolve_bad_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let err = geocoder(&mock_server).resolve("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::Parse { .. }));
}

#[tokio::test]
async fn test_resolve_unreachable_server_is_transport_error() {
    // Nothing listens on port 1.
    let config = Config {
        geocoding_url: "http://127.0.0.1:1/search".to_string(),
        timeout_secs: Some(5),
        ..Config::default()
    };
    let geocoder = NominatimGeocoder::from_config(&config, http_client(&config).unwrap());

    let err = geocoder.resolve("Paris").await.unwrap_err();
    assert!(matches!(err, WeatherError::Transport { .. }));
}

// ============================================================================
// Forecast client
// ============================================================================

#[tokio::test]
async fn test_fetch_celsius_omits_unit_parameter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.8534951"))
        .and(query_param("longitude", "2.3483915"))
        .and(query_param("current", "temperature_2m"))
        .and(query_param("hourly", "temperature_2m"))
        .and(query_param("forecast_days", "1"))
        .and(query_param_is_missing("temperature_unit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_day_forecast()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let forecast = forecaster(&mock_server)
        .fetch(Coordinates::new(48.8534951, 2.3483915), 1, TemperatureUnit::Celsius)
        .await
        .unwrap();

    assert_eq!(forecast.current.temperature_2m, 7.4);
    assert_eq!(forecast.hourly.time.len(), 24);
    assert_eq!(forecast.hourly.temperature_2m.len(), 24);
}

#[tokio::test]
async fn test_fetch_fahrenheit_sends_unit_parameter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("forecast_days", "3"))
        .and(query_param("temperature_unit", "fahrenheit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_day_forecast()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let res = forecaster(&mock_server)
        .fetch(Coordinates::new(1.0, 2.0), 3, TemperatureUnit::Fahrenheit)
        .await;

    assert!(res.is_ok());
}

#[tokio::test]
async fn test_fetch_rejected_request_keeps_reason() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Forecast days is invalid. Allowed range 0 to 16."
        })))
        .mount(&mock_server)
        .await;

    let err = forecaster(&mock_server)
        .fetch(Coordinates::new(1.0, 2.0), 40, TemperatureUnit::Celsius)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Status { .. }));
    assert!(err.to_string().contains("Allowed range 0 to 16"));
}

#[tokio::test]
async fn test_fetch_missing_hourly_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current": {"temperature_2m": 1.0}
        })))
        .mount(&mock_server)
        .await;

    let err = forecaster(&mock_server)
        .fetch(Coordinates::new(1.0, 2.0), 1, TemperatureUnit::Celsius)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Parse { .. }));
}

// ============================================================================
// Service
// ============================================================================

#[tokio::test]
async fn test_service_unknown_city_skips_forecast() {
    let mock_server = MockServer::start().await;
    mount_geocoder(&mock_server, serde_json::json!([])).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_day_forecast()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = WeatherService::from_config(&test_config(&mock_server)).unwrap();

    let current = service.current_temperature("Nowhere", TemperatureUnit::Celsius).await.unwrap();
    let forecast = service.forecast("Nowhere", 2, TemperatureUnit::Celsius).await.unwrap();

    assert_eq!(current, None);
    assert!(forecast.is_none());
}

#[tokio::test]
async fn test_service_current_temperature() {
    let mock_server = MockServer::start().await;
    mount_geocoder(&mock_server, paris_candidates()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.8534951"))
        .and(query_param("forecast_days", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_day_forecast()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = WeatherService::from_config(&test_config(&mock_server)).unwrap();
    let current = service.current_temperature("Paris", TemperatureUnit::Celsius).await.unwrap();

    assert_eq!(current, Some(7.4));
}

#[tokio::test]
async fn test_service_forecast_renders_windows() {
    let mock_server = MockServer::start().await;
    mount_geocoder(&mock_server, paris_candidates()).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("forecast_days", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(one_day_forecast()))
        .mount(&mock_server)
        .await;

    let service = WeatherService::from_config(&test_config(&mock_server)).unwrap();
    let forecast = service
        .forecast("Paris", 1, TemperatureUnit::Celsius)
        .await
        .unwrap()
        .expect("Paris resolves");

    let lines = render(&forecast, 1, TemperatureUnit::Celsius).unwrap();
    assert_eq!(
        lines,
        vec![
            "2024-01-01 00:00-05:00 min: 0.0C\tmax: 5.0C",
            "2024-01-01 06:00-11:00 min: 6.0C\tmax: 11.0C",
            "2024-01-01 12:00-17:00 min: 12.0C\tmax: 17.0C",
            "2024-01-01 18:00-23:00 min: 18.0C\tmax: 23.0C",
        ]
    );
}
