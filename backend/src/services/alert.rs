//! Alert service: validation and lifecycle on top of an [`AlertRepository`]

use shared::{Alert, AlertSeverity, AlertUpdate, CreateAlertInput, UpdateAlertInput};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::storage::AlertRepository;

/// Alert service for managing disaster alerts
#[derive(Clone)]
pub struct AlertService {
    repository: Arc<dyn AlertRepository>,
}

impl AlertService {
    pub fn new(repository: Arc<dyn AlertRepository>) -> Self {
        Self { repository }
    }

    /// All alerts in creation order
    pub async fn list(&self) -> AppResult<Vec<Alert>> {
        self.repository.list().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Alert> {
        self.repository
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Alert".to_string()))
    }

    /// Alerts whose type matches `alert_type`, ignoring case
    pub async fn by_type(&self, alert_type: &str) -> AppResult<Vec<Alert>> {
        let alerts = self.repository.list().await?;
        Ok(alerts
            .into_iter()
            .filter(|a| a.matches_type(alert_type))
            .collect())
    }

    pub async fn active(&self) -> AppResult<Vec<Alert>> {
        let alerts = self.repository.list().await?;
        Ok(alerts.into_iter().filter(Alert::is_active).collect())
    }

    /// Validate and store a new active alert
    pub async fn create(&self, input: CreateAlertInput) -> AppResult<Alert> {
        input.validate()?;

        let CreateAlertInput {
            alert_type: Some(alert_type),
            severity: Some(severity),
            location: Some(location),
            message,
            coordinates,
        } = input
        else {
            return Err(AppError::ValidationError(
                "Type, severity, and location are required".to_string(),
            ));
        };

        let severity: AlertSeverity = severity.parse().map_err(AppError::ValidationError)?;
        if coordinates.is_some_and(|c| !c.is_valid()) {
            return Err(AppError::ValidationError(
                "Coordinates are out of range".to_string(),
            ));
        }

        let alert = Alert::new(alert_type, severity, location, message, coordinates);
        self.repository.insert(alert.clone()).await?;

        tracing::info!(
            "Created {} alert {} for {}",
            alert.alert_type,
            alert.id,
            alert.location
        );
        Ok(alert)
    }

    /// Merge the supplied fields into an existing alert
    pub async fn update(&self, id: &str, input: UpdateAlertInput) -> AppResult<Alert> {
        input.validate()?;
        let update = AlertUpdate::try_from(input).map_err(AppError::ValidationError)?;
        if update.coordinates.is_some_and(|c| !c.is_valid()) {
            return Err(AppError::ValidationError(
                "Coordinates are out of range".to_string(),
            ));
        }

        let alert = self
            .repository
            .update(id, update)
            .await?
            .ok_or_else(|| AppError::NotFound("Alert".to_string()))?;

        tracing::info!("Updated alert {}", alert.id);
        Ok(alert)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repository.remove(id).await? {
            return Err(AppError::NotFound("Alert".to_string()));
        }
        tracing::info!("Deleted alert {}", id);
        Ok(())
    }
}
