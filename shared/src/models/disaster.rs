//! Disaster types, risk outputs, and the static disaster catalog

use serde::{Deserialize, Serialize};

/// Disaster categories known to the system
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DisasterType {
    Flood,
    Cyclone,
    Earthquake,
    Heatwave,
    Drought,
    Landslide,
}

impl DisasterType {
    pub const ALL: [DisasterType; 6] = [
        DisasterType::Flood,
        DisasterType::Cyclone,
        DisasterType::Earthquake,
        DisasterType::Heatwave,
        DisasterType::Drought,
        DisasterType::Landslide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterType::Flood => "flood",
            DisasterType::Cyclone => "cyclone",
            DisasterType::Earthquake => "earthquake",
            DisasterType::Heatwave => "heatwave",
            DisasterType::Drought => "drought",
            DisasterType::Landslide => "landslide",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DisasterType::Flood => "Flooding risk",
            DisasterType::Cyclone => "Cyclone/Hurricane risk",
            DisasterType::Earthquake => "Earthquake risk",
            DisasterType::Heatwave => "Extreme heat risk",
            DisasterType::Drought => "Drought risk",
            DisasterType::Landslide => "Landslide risk",
        }
    }

    /// Catalog indicators, shown to users browsing disaster types
    pub fn indicators(&self) -> &'static [&'static str] {
        match self {
            DisasterType::Flood => &["Heavy rainfall", "High humidity"],
            DisasterType::Cyclone => &["High wind speed", "Low pressure"],
            DisasterType::Earthquake => &["Tectonic activity"],
            DisasterType::Heatwave => &["High temperature"],
            DisasterType::Drought => &["Low humidity", "High temperature"],
            DisasterType::Landslide => &["Heavy rainfall", "Mountainous terrain"],
        }
    }
}

impl std::fmt::Display for DisasterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known disaster type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown disaster type: {0}")]
pub struct UnknownDisasterType(pub String);

impl std::str::FromStr for DisasterType {
    type Err = UnknownDisasterType;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisasterType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDisasterType(s.to_string()))
    }
}

/// One triggered disaster-type risk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisasterPrediction {
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    #[serde(rename = "risk")]
    pub risk_score: u8,
    pub indicators: Vec<String>,
    pub recommendation: String,
}

/// Per-category risk scores plus their aggregate
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RiskAssessment {
    pub flood: u8,
    pub cyclone: u8,
    pub earthquake: u8,
    pub heatwave: u8,
    pub drought: u8,
    /// Reported next to the categories, not inside them
    #[serde(skip_serializing)]
    pub overall_risk: u8,
}

impl RiskAssessment {
    /// Category scores in reporting order
    pub fn categories(&self) -> [(DisasterType, u8); 5] {
        [
            (DisasterType::Flood, self.flood),
            (DisasterType::Cyclone, self.cyclone),
            (DisasterType::Earthquake, self.earthquake),
            (DisasterType::Heatwave, self.heatwave),
            (DisasterType::Drought, self.drought),
        ]
    }
}

/// Dashboard banding of a 0-100 score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            70..=u8::MAX => RiskLevel::High,
            40..=69 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Catalog entry as listed by the disaster index
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisasterSummary {
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    pub description: &'static str,
}

/// Full catalog entry for a single disaster type
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisasterInfo {
    #[serde(rename = "type")]
    pub disaster_type: DisasterType,
    pub description: &'static str,
    pub indicators: &'static [&'static str],
}

impl From<DisasterType> for DisasterSummary {
    fn from(disaster_type: DisasterType) -> Self {
        Self {
            disaster_type,
            description: disaster_type.description(),
        }
    }
}

impl From<DisasterType> for DisasterInfo {
    fn from(disaster_type: DisasterType) -> Self {
        Self {
            disaster_type,
            description: disaster_type.description(),
            indicators: disaster_type.indicators(),
        }
    }
}

/// All six disaster types, in catalog order
pub fn disaster_catalog() -> Vec<DisasterSummary> {
    DisasterType::ALL.into_iter().map(DisasterSummary::from).collect()
}

/// Look up a catalog entry by (case-insensitive) type name
pub fn find_disaster(name: &str) -> Option<DisasterInfo> {
    name.parse::<DisasterType>().ok().map(DisasterInfo::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disaster_type_parsing_is_case_insensitive() {
        assert_eq!("Flood".parse::<DisasterType>(), Ok(DisasterType::Flood));
        assert_eq!("HEATWAVE".parse::<DisasterType>(), Ok(DisasterType::Heatwave));
        assert!("tsunami".parse::<DisasterType>().is_err());
    }

    #[test]
    fn test_catalog_lists_six_types() {
        let catalog = disaster_catalog();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog[0].disaster_type, DisasterType::Flood);
        assert_eq!(catalog[5].disaster_type, DisasterType::Landslide);
    }

    #[test]
    fn test_find_disaster() {
        let info = find_disaster("Landslide").unwrap();
        assert_eq!(info.description, "Landslide risk");
        assert_eq!(info.indicators, &["Heavy rainfall", "Mountainous terrain"]);
        assert!(find_disaster("meteor").is_none());
    }

    #[test]
    fn test_risk_level_bands() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }

    #[test]
    fn test_prediction_wire_names() {
        let prediction = DisasterPrediction {
            disaster_type: DisasterType::Heatwave,
            risk_score: 1,
            indicators: vec!["Extreme heat".to_string()],
            recommendation: "Stay hydrated".to_string(),
        };
        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["type"], "heatwave");
        assert_eq!(json["risk"], 1);
    }

    #[test]
    fn test_assessment_serializes_five_categories() {
        let assessment = RiskAssessment {
            flood: 0,
            cyclone: 0,
            earthquake: 25,
            heatwave: 20,
            drought: 50,
            overall_risk: 19,
        };
        let json = serde_json::to_value(assessment).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 5);
        assert_eq!(object["earthquake"], 25);
    }
}
