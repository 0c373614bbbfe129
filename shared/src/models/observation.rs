//! Weather observation models

use serde::{Deserialize, Serialize};

/// A snapshot of weather metrics at a point in time, fed to the risk engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub wind_speed_ms: f64,
    pub pressure_hpa: f64,
    #[serde(default)]
    pub rain_1h_mm: f64,
}

impl WeatherObservation {
    pub fn new(
        temperature_c: f64,
        humidity_percent: f64,
        wind_speed_ms: f64,
        pressure_hpa: f64,
        rain_1h_mm: f64,
    ) -> Self {
        Self {
            temperature_c,
            humidity_percent,
            wind_speed_ms,
            pressure_hpa,
            rain_1h_mm,
        }
    }
}

/// Weather summary echoed back alongside predictions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub temp: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pressure: f64,
    pub description: String,
}

impl WeatherSummary {
    pub fn from_observation(observation: &WeatherObservation, description: String) -> Self {
        Self {
            temp: observation.temperature_c,
            humidity: observation.humidity_percent,
            wind_speed: observation.wind_speed_ms,
            pressure: observation.pressure_hpa,
            description,
        }
    }
}
