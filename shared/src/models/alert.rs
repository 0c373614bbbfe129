//! Disaster alert models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::Coordinates;

/// Alert severity, least to most severe.
///
/// `warning` is what the map dashboard publishes for non-critical zones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    Warning,
    High,
    Critical,
}

impl std::str::FromStr for AlertSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(AlertSeverity::Low),
            "medium" => Ok(AlertSeverity::Medium),
            "warning" => Ok(AlertSeverity::Warning),
            "high" => Ok(AlertSeverity::High),
            "critical" => Ok(AlertSeverity::Critical),
            other => Err(format!(
                "Unknown severity '{}' (expected low, medium, warning, high or critical)",
                other
            )),
        }
    }
}

/// Alert lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    #[default]
    Active,
    Resolved,
    Expired,
}

impl std::str::FromStr for AlertStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(AlertStatus::Active),
            "resolved" => Ok(AlertStatus::Resolved),
            "expired" => Ok(AlertStatus::Expired),
            other => Err(format!(
                "Unknown status '{}' (expected active, resolved or expired)",
                other
            )),
        }
    }
}

/// A published disaster alert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub location: String,
    #[serde(default)]
    pub message: String,
    #[serde(
        default,
        deserialize_with = "lenient_coordinates",
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinates: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: AlertStatus,
}

impl Alert {
    /// Build a fresh, active alert from validated input
    pub fn new(
        alert_type: String,
        severity: AlertSeverity,
        location: String,
        message: Option<String>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            alert_type,
            severity,
            location,
            message: message.unwrap_or_default(),
            coordinates,
            created_at: Utc::now(),
            status: AlertStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }

    pub fn matches_type(&self, alert_type: &str) -> bool {
        self.alert_type.eq_ignore_ascii_case(alert_type)
    }

    /// Merge supplied fields into this alert. The id never changes.
    pub fn apply(&mut self, update: AlertUpdate) {
        if let Some(alert_type) = update.alert_type {
            self.alert_type = alert_type;
        }
        if let Some(severity) = update.severity {
            self.severity = severity;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(message) = update.message {
            self.message = message;
        }
        if let Some(coordinates) = update.coordinates {
            self.coordinates = Some(coordinates);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Accepts a missing, null, empty (`{}`) or partial coordinates object as `None`.
/// Older alert files store `{}` when no coordinates were given.
fn lenient_coordinates<'de, D>(deserializer: D) -> Result<Option<Coordinates>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct PartialCoordinates {
        lat: Option<f64>,
        #[serde(alias = "lng")]
        lon: Option<f64>,
    }

    let partial = Option::<PartialCoordinates>::deserialize(deserializer)?;
    Ok(partial.and_then(|p| Some(Coordinates::new(p.lat?, p.lon?))))
}

/// Input for creating an alert
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAlertInput {
    #[serde(rename = "type")]
    #[validate(required(message = "Type is required"), length(min = 1, message = "Type is required"))]
    pub alert_type: Option<String>,

    #[validate(required(message = "Severity is required"))]
    pub severity: Option<String>,

    #[validate(required(message = "Location is required"), length(min = 1, message = "Location is required"))]
    pub location: Option<String>,

    #[validate(length(max = 2000, message = "Message is too long"))]
    pub message: Option<String>,

    #[serde(default, deserialize_with = "lenient_coordinates")]
    pub coordinates: Option<Coordinates>,
}

/// Input for updating an alert; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAlertInput {
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type cannot be empty"))]
    pub alert_type: Option<String>,

    pub severity: Option<String>,

    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: Option<String>,

    #[validate(length(max = 2000, message = "Message is too long"))]
    pub message: Option<String>,

    #[serde(default, deserialize_with = "lenient_coordinates")]
    pub coordinates: Option<Coordinates>,

    pub status: Option<String>,
}

/// Parsed form of [`UpdateAlertInput`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertUpdate {
    pub alert_type: Option<String>,
    pub severity: Option<AlertSeverity>,
    pub location: Option<String>,
    pub message: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub status: Option<AlertStatus>,
}

impl TryFrom<UpdateAlertInput> for AlertUpdate {
    type Error = String;

    fn try_from(input: UpdateAlertInput) -> Result<Self, Self::Error> {
        Ok(Self {
            alert_type: input.alert_type,
            severity: input.severity.as_deref().map(str::parse).transpose()?,
            location: input.location,
            message: input.message,
            coordinates: input.coordinates,
            status: input.status.as_deref().map(str::parse).transpose()?,
        })
    }
}
