//! Router-level tests against a stub weather provider and in-memory alerts

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::services::weather::test_support::{hot_day_payload, StubWeatherProvider};
use crate::storage::InMemoryAlertRepository;
use crate::{create_app, AppState, Config};

fn app_with(provider: Arc<StubWeatherProvider>) -> Router {
    let state = AppState::new(
        Config::for_tests(),
        provider,
        Arc::new(InMemoryAlertRepository::new()),
    );
    create_app(state).unwrap()
}

fn app() -> Router {
    app_with(Arc::new(StubWeatherProvider::new(hot_day_payload())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

#[tokio::test]
async fn test_plain_health_check() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_api_health() {
    let (status, body) = get(&app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(
        body["message"],
        "Disaster Early Warning System - Backend Running"
    );
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_route_uses_error_envelope() {
    let (status, body) = get(&app(), "/api/volcanoes").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Route not found");
}

#[tokio::test]
async fn test_disaster_catalog() {
    let app = app();

    let (status, body) = get(&app, "/api/disasters").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
    assert_eq!(body["data"][1]["type"], "cyclone");

    let (status, body) = get(&app, "/api/disasters/type/FLOOD").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["type"], "flood");
    assert_eq!(body["data"]["indicators"], json!(["Heavy rainfall", "High humidity"]));

    let (status, body) = get(&app, "/api/disasters/type/volcano").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Disaster type not found");
}

#[tokio::test]
async fn test_predict_then_location_hits_cache() {
    let provider = Arc::new(StubWeatherProvider::new(hot_day_payload()));
    let app = app_with(provider.clone());

    let (status, body) = get(&app, "/api/disasters/predict/26.9/75.8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["location"]["name"], "Jaipur");
    assert_eq!(body["location"]["coordinates"], json!({"lat": 26.9, "lon": 75.8}));
    assert_eq!(body["predictions"][0]["type"], "heatwave");
    assert_eq!(body["predictions"][0]["risk"], 1);
    assert_eq!(body["weather"]["temp"], 36.0);
    assert_eq!(body["weather"]["windSpeed"], 5.0);

    let (status, body) = get(&app, "/api/weather/location/26.9/75.8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cached"], true);
    assert_eq!(body["data"]["name"], "Jaipur");
    assert_eq!(provider.calls(), 1);

    let (_, body) = get(&app, "/api/weather/all").await;
    assert_eq!(body["cacheSize"], 1);
    assert_eq!(body["data"]["26.9-75.8"]["data"]["name"], "Jaipur");
}

#[tokio::test]
async fn test_risk_assessment_envelope() {
    let (status, body) = get(&app(), "/api/disasters/risk/26.9/75.8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Jaipur");
    assert_eq!(body["riskAssessment"]["earthquake"], 25);
    assert_eq!(body["riskAssessment"]["heatwave"], 44);
    assert_eq!(body["overallRisk"], 14);
}

#[tokio::test]
async fn test_bad_coordinates_are_rejected() {
    let (status, body) = get(&app(), "/api/disasters/risk/abc/75.8").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_INPUT");

    let (status, _) = get(&app(), "/api/weather/forecast/91/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upstream_failure_is_500() {
    let app = app_with(Arc::new(StubWeatherProvider::failing()));

    let (status, body) = get(&app, "/api/weather/location/10/10").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch weather data");
    assert_eq!(body["error"], "connection refused");
}

#[tokio::test]
async fn test_disaster_upstream_failures_name_the_operation() {
    let app = app_with(Arc::new(StubWeatherProvider::failing()));

    let (status, body) = get(&app, "/api/disasters/predict/10/10").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to predict disasters");
    assert_eq!(body["code"], "UPSTREAM_FAILURE");
    assert_eq!(body["error"], "connection refused");

    let (status, body) = get(&app, "/api/disasters/risk/10/10").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to calculate risk assessment");
}

#[tokio::test]
async fn test_city_lookup() {
    let app = app();

    let (status, body) = get(&app, "/api/weather/city/Jaipur").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["main"]["humidity"], 50);

    let (status, body) = get(&app, "/api/weather/city/Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Location not found");
}

#[tokio::test]
async fn test_forecast_passthrough() {
    let (status, body) = get(&app(), "/api/weather/forecast/26.9/75.8").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["cnt"], 1);
}

#[tokio::test]
async fn test_alert_lifecycle() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/alerts",
        Some(json!({
            "type": "Flood",
            "severity": "high",
            "location": "Guwahati",
            "message": "Brahmaputra above danger mark",
            "coordinates": {"lat": 26.14, "lng": 91.74}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Alert created successfully");
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["coordinates"]["lon"], 91.74);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = get(&app, "/api/alerts").await;
    assert_eq!(body["count"], 1);

    let (_, body) = get(&app, "/api/alerts/type/flood").await;
    assert_eq!(body["count"], 1);

    let (_, body) = get(&app, "/api/alerts/status/active").await;
    assert_eq!(body["count"], 1);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/alerts/{}", id),
        Some(json!({"status": "resolved"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Alert updated successfully");
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["location"], "Guwahati");

    let (_, body) = get(&app, "/api/alerts/status/active").await;
    assert_eq!(body["count"], 0);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/alerts/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Alert deleted successfully"}));

    let (status, body) = get(&app, &format!("/api/alerts/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Alert not found");
}

#[tokio::test]
async fn test_dashboard_warning_alert_is_accepted() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/alerts",
        Some(json!({
            "type": "cyclone",
            "severity": "warning",
            "location": "Mumbai - Cyclone Risk",
            "message": "Cyclone approaching coast",
            "coordinates": {"lat": 19.076, "lon": 72.8777}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["severity"], "warning");
    assert_eq!(body["data"]["status"], "active");

    let (_, body) = get(&app, "/api/alerts/type/CYCLONE").await;
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_create_alert_validation() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/alerts",
        Some(json!({"type": "cyclone", "severity": "medium"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Location is required");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/alerts",
        Some(json!({"type": "cyclone", "severity": "extreme", "location": "Puri"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/alerts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"type\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_INPUT");
}
