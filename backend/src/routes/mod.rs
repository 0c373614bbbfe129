//! Route definitions for the Disaster Early Warning System

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/weather", weather_routes())
        .nest("/alerts", alert_routes())
        .nest("/disasters", disaster_routes())
        .route("/health", get(handlers::health_status))
}

/// Weather proxy routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/location/:lat/:lon", get(handlers::get_weather_by_location))
        .route("/city/:city_name", get(handlers::get_weather_by_city))
        .route("/forecast/:lat/:lon", get(handlers::get_weather_forecast))
        .route("/all", get(handlers::get_cached_weather))
}

/// Alert management routes
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_alert).get(handlers::list_alerts))
        .route("/status/active", get(handlers::get_active_alerts))
        .route("/type/:alert_type", get(handlers::get_alerts_by_type))
        .route(
            "/:id",
            get(handlers::get_alert)
                .put(handlers::update_alert)
                .delete(handlers::delete_alert),
        )
}

/// Disaster prediction and catalog routes
fn disaster_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_disasters))
        .route("/predict/:lat/:lon", get(handlers::predict_disasters))
        .route("/risk/:lat/:lon", get(handlers::get_risk_assessment))
        .route("/type/:disaster_type", get(handlers::get_disaster_by_type))
}
