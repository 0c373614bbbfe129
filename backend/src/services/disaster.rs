//! Disaster service: runs the risk engine against live weather

use serde::Serialize;
use shared::{
    disaster_catalog, find_disaster, risk, Coordinates, DisasterInfo, DisasterPrediction,
    DisasterSummary, RiskAssessment, WeatherSummary,
};

use crate::error::{AppError, AppResult};
use crate::external::weather::{observation_from_payload, CurrentConditions};
use crate::services::WeatherService;

/// Disaster service for predictions, risk tables and the type catalog
#[derive(Clone)]
pub struct DisasterService {
    weather: WeatherService,
}

/// Where a prediction was made
#[derive(Debug, Clone, Serialize)]
pub struct PredictionLocation {
    pub name: String,
    pub coordinates: Coordinates,
}

/// Triggered predictions plus the weather that produced them
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    pub location: PredictionLocation,
    pub predictions: Vec<DisasterPrediction>,
    pub weather: WeatherSummary,
}

/// Five-category risk table for a named location
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentReport {
    pub location: String,
    pub risk_assessment: RiskAssessment,
    pub overall_risk: u8,
}

impl DisasterService {
    pub fn new(weather: WeatherService) -> Self {
        Self { weather }
    }

    async fn current_conditions(
        &self,
        lat: &str,
        lon: &str,
    ) -> AppResult<(Coordinates, CurrentConditions)> {
        let lookup = self.weather.current_at(lat, lon).await?;
        let conditions = observation_from_payload(&lookup.data)?;
        Ok((lookup.coordinates, conditions))
    }

    /// Predict disasters from current conditions at `lat`/`lon`
    pub async fn predict(&self, lat: &str, lon: &str) -> AppResult<PredictionReport> {
        let (coordinates, conditions) = self
            .current_conditions(lat, lon)
            .await
            .map_err(|e| e.during("Failed to predict disasters"))?;
        let predictions = risk::predict(&conditions.observation);

        tracing::debug!(
            "{} predictions for {} ({})",
            predictions.len(),
            conditions.location_name,
            coordinates
        );

        Ok(PredictionReport {
            location: PredictionLocation {
                name: conditions.location_name,
                coordinates,
            },
            predictions,
            weather: conditions.summary,
        })
    }

    /// Score every category from current conditions at `lat`/`lon`
    pub async fn assess(&self, lat: &str, lon: &str) -> AppResult<AssessmentReport> {
        let (_, conditions) = self
            .current_conditions(lat, lon)
            .await
            .map_err(|e| e.during("Failed to calculate risk assessment"))?;
        let assessment = risk::assess(&conditions.observation);

        Ok(AssessmentReport {
            location: conditions.location_name,
            overall_risk: assessment.overall_risk,
            risk_assessment: assessment,
        })
    }

    pub fn catalog(&self) -> Vec<DisasterSummary> {
        disaster_catalog()
    }

    pub fn info(&self, disaster_type: &str) -> AppResult<DisasterInfo> {
        find_disaster(disaster_type).ok_or_else(|| AppError::NotFound("Disaster type".to_string()))
    }
}
