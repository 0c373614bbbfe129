//! HTTP handlers for alert management

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use shared::{Alert, CreateAlertInput, UpdateAlertInput};

use super::{DataResponse, ListResponse, MessageResponse};
use crate::error::{AppError, AppResult};
use crate::AppState;

/// List all alerts
pub async fn list_alerts(State(state): State<AppState>) -> AppResult<Json<ListResponse<Alert>>> {
    let alerts = state.alert_service.list().await?;
    Ok(Json(alerts.into()))
}

/// Get an alert by ID
pub async fn get_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
) -> AppResult<Json<DataResponse<Alert>>> {
    let alert = state.alert_service.get(&alert_id).await?;
    Ok(Json(DataResponse::new(alert)))
}

/// Create a new alert
pub async fn create_alert(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<CreateAlertInput>, AppError>,
) -> AppResult<(StatusCode, Json<MessageResponse<Alert>>)> {
    let alert = state.alert_service.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_data("Alert created successfully", alert)),
    ))
}

/// Update an alert
pub async fn update_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
    WithRejection(Json(input), _): WithRejection<Json<UpdateAlertInput>, AppError>,
) -> AppResult<Json<MessageResponse<Alert>>> {
    let alert = state.alert_service.update(&alert_id, input).await?;
    Ok(Json(MessageResponse::with_data(
        "Alert updated successfully",
        alert,
    )))
}

/// Delete an alert
pub async fn delete_alert(
    State(state): State<AppState>,
    Path(alert_id): Path<String>,
) -> AppResult<Json<MessageResponse<()>>> {
    state.alert_service.delete(&alert_id).await?;
    Ok(Json(MessageResponse::message("Alert deleted successfully")))
}

/// Alerts of one type, case-insensitive
pub async fn get_alerts_by_type(
    State(state): State<AppState>,
    Path(alert_type): Path<String>,
) -> AppResult<Json<ListResponse<Alert>>> {
    let alerts = state.alert_service.by_type(&alert_type).await?;
    Ok(Json(alerts.into()))
}

/// Alerts that are still active
pub async fn get_active_alerts(
    State(state): State<AppState>,
) -> AppResult<Json<ListResponse<Alert>>> {
    let alerts = state.alert_service.active().await?;
    Ok(Json(alerts.into()))
}
