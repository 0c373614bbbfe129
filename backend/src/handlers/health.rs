//! Health check handlers

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started
    pub uptime: f64,
}

/// Detailed health check endpoint handler
pub async fn health_status(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = state.started_at.elapsed().as_secs_f64();

    Json(HealthResponse {
        status: "OK",
        message: "Disaster Early Warning System - Backend Running",
        timestamp: Utc::now(),
        uptime,
    })
}

/// Plain health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Root endpoint
pub async fn root() -> &'static str {
    concat!("Disaster Early Warning System API v", env!("CARGO_PKG_VERSION"))
}
