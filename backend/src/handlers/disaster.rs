//! HTTP handlers for disaster prediction and the disaster catalog

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use shared::{DisasterInfo, DisasterSummary};

use super::DataResponse;
use crate::error::AppResult;
use crate::services::disaster::{AssessmentReport, PredictionReport};
use crate::AppState;

/// `{success, ...report}`
#[derive(Serialize)]
pub struct ReportResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub report: T,
}

impl<T> From<T> for ReportResponse<T> {
    fn from(report: T) -> Self {
        Self {
            success: true,
            report,
        }
    }
}

/// Predict disasters at a coordinate pair
pub async fn predict_disasters(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
) -> AppResult<Json<ReportResponse<PredictionReport>>> {
    let report = state.disaster_service.predict(&lat, &lon).await?;
    Ok(Json(report.into()))
}

/// Five-category risk assessment at a coordinate pair
pub async fn get_risk_assessment(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
) -> AppResult<Json<ReportResponse<AssessmentReport>>> {
    let report = state.disaster_service.assess(&lat, &lon).await?;
    Ok(Json(report.into()))
}

/// List all disaster types
pub async fn list_disasters(
    State(state): State<AppState>,
) -> Json<DataResponse<Vec<DisasterSummary>>> {
    Json(DataResponse::new(state.disaster_service.catalog()))
}

/// Get one disaster type with its indicators
pub async fn get_disaster_by_type(
    State(state): State<AppState>,
    Path(disaster_type): Path<String>,
) -> AppResult<Json<DataResponse<DisasterInfo>>> {
    let info = state.disaster_service.info(&disaster_type)?;
    Ok(Json(DataResponse::new(info)))
}
