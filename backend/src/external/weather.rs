//! Weather API client for fetching weather data
//!
//! Integrates with the OpenWeatherMap API for current conditions and
//! forecasts. Payloads are handed back as raw JSON so they can be forwarded
//! to clients unchanged; [`observation_from_payload`] extracts the fields
//! the risk engine needs.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use shared::{Coordinates, WeatherObservation, WeatherSummary};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Source of raw weather payloads
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions at a coordinate pair
    async fn current_by_coordinates(&self, coordinates: Coordinates) -> AppResult<Value>;

    /// Current conditions for a named city
    async fn current_by_city(&self, city: &str) -> AppResult<Value>;

    /// 5-day / 3-hour forecast at a coordinate pair
    async fn forecast(&self, coordinates: Coordinates) -> AppResult<Value>;
}

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn fetch(&self, path: &str, query: &[(&str, String)]) -> AppResult<Value> {
        if self.api_key.is_empty() {
            return Err(AppError::Configuration(
                "Weather API key not configured".to_string(),
            ));
        }

        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("Fetching {} with {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Weather API request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound("Location".to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse weather response: {}", e)))
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn current_by_coordinates(&self, coordinates: Coordinates) -> AppResult<Value> {
        self.fetch(
            "weather",
            &[
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lon.to_string()),
            ],
        )
        .await
    }

    async fn current_by_city(&self, city: &str) -> AppResult<Value> {
        self.fetch("weather", &[("q", city.to_string())]).await
    }

    async fn forecast(&self, coordinates: Coordinates) -> AppResult<Value> {
        self.fetch(
            "forecast",
            &[
                ("lat", coordinates.lat.to_string()),
                ("lon", coordinates.lon.to_string()),
            ],
        )
        .await
    }
}

/// OpenWeatherMap API response for current weather (fields we read)
#[derive(Debug, Deserialize)]
struct OWMCurrentResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    weather: Vec<OWMWeather>,
    main: OWMMain,
    wind: OWMWind,
    rain: Option<OWMRain>,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    pressure: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OWMRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

/// Observation extracted from a current-conditions payload
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub location_name: String,
    pub observation: WeatherObservation,
    pub summary: WeatherSummary,
}

/// Pull the risk engine's inputs out of a raw current-conditions payload
pub fn observation_from_payload(payload: &Value) -> AppResult<CurrentConditions> {
    let data = OWMCurrentResponse::deserialize(payload).map_err(|e| {
        AppError::Upstream(format!("Weather response is missing required fields: {}", e))
    })?;

    let observation = WeatherObservation::new(
        data.main.temp,
        data.main.humidity,
        data.wind.speed,
        data.main.pressure,
        data.rain.and_then(|r| r.one_hour).unwrap_or(0.0),
    );
    let description = data
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .unwrap_or_default();

    Ok(CurrentConditions {
        location_name: data
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        summary: WeatherSummary::from_observation(&observation, description),
        observation,
    })
}
