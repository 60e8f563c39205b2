//! Integration tests for OpenWeatherProvider using wiremock.

use weather_lookup_core::{
    Endpoint, FetchError, OpenWeatherProvider, WeatherProvider, fetch_weather,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "name": "Paris",
        "dt": 1700000000,
        "sys": { "country": "FR" },
        "main": { "temp": 15.0, "feels_like": 14.2, "humidity": 72 },
        "weather": [{ "id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d" }],
        "wind": { "speed": 5.1 }
    })
}

fn forecast_body() -> serde_json::Value {
    let mut list = Vec::new();
    for day in 0..5i64 {
        for hour in (0..24i64).step_by(3) {
            list.push(serde_json::json!({
                "dt": 1700006400 + day * 86400 + hour * 3600,
                "dt_txt": format!("2023-11-{:02} {:02}:00:00", 15 + day, hour),
                "main": { "temp": day as f64 * 5.0 },
                "weather": [{ "description": "light rain", "icon": format!("1{day}d") }]
            }));
        }
    }
    serde_json::json!({ "cod": "200", "cnt": list.len(), "list": list })
}

fn provider(server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::with_base_url("TEST_KEY".to_string(), server.uri())
}

#[tokio::test]
async fn current_weather_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Paris"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let current = provider(&mock_server).current("Paris").await.unwrap();

    assert_eq!(current.location, "Paris, FR");
    assert_eq!(current.description, "broken clouds");
    assert_eq!(current.temperature_f, 15.0 * 9.0 / 5.0 + 32.0);
    assert_eq!(current.humidity_pct, 72);
    assert_eq!(current.wind_speed, 5.1);
    assert_eq!(current.observed_at, 1_700_000_000);
}

#[tokio::test]
async fn forecast_keeps_noon_entries_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(&mock_server)
        .await;

    let forecast = provider(&mock_server).forecast("Paris").await.unwrap();

    assert_eq!(forecast.len(), 5);
    for (day, entry) in forecast.iter().enumerate() {
        assert_eq!(entry.at, 1_700_006_400 + day as i64 * 86_400 + 12 * 3_600);
        assert_eq!(entry.icon_code, format!("1{day}d"));
        assert_eq!(entry.temperature_f, day as f64 * 5.0 * 9.0 / 5.0 + 32.0);
    }
}

#[tokio::test]
async fn not_found_maps_to_http_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&mock_server)
        .await;

    let lookup = fetch_weather(&provider(&mock_server), "Atlantis").await;

    match lookup.current.unwrap_err() {
        FetchError::Http { endpoint, status, status_text } => {
            assert_eq!(endpoint, Endpoint::Current);
            assert_eq!(status, 404);
            assert_eq!(status_text, "Not Found");
        }
        other => panic!("unexpected error: {other}"),
    }
    let err = lookup.forecast.unwrap_err();
    assert_eq!(err.endpoint(), Endpoint::Forecast);
    assert!(err.is_not_found());
}

#[tokio::test]
async fn forecast_still_requested_when_current_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let lookup = fetch_weather(&provider(&mock_server), "Paris").await;

    assert!(lookup.current.is_err());
    assert_eq!(lookup.forecast.unwrap().len(), 5);
}

#[tokio::test]
async fn missing_weather_array_is_malformed() {
    let mock_server = MockServer::start().await;

    let mut body = current_body();
    body["weather"] = serde_json::json!([]);

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).current("Paris").await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::MalformedResponse { endpoint: Endpoint::Current, .. }
    ));
}

#[tokio::test]
async fn missing_forecast_list_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "cod": "200" })))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).forecast("Paris").await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::MalformedResponse { endpoint: Endpoint::Forecast, .. }
    ));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).current("Paris").await.unwrap_err();
    assert!(matches!(err, FetchError::MalformedResponse { .. }));
}

#[tokio::test]
async fn location_is_passed_through_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "  "))
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = provider(&mock_server).current("  ").await.unwrap_err();
    assert!(matches!(err, FetchError::Http { status: 400, .. }));
}
