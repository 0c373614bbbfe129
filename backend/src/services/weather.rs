//! Weather service: cached lookups in front of the upstream weather API

use serde_json::Value;
use shared::{parse_coordinates, validate_city_name, Coordinates};
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CachedWeather, WeatherCache};
use crate::error::{AppError, AppResult};
use crate::external::weather::WeatherProvider;

/// Weather service for fetching and caching weather data
#[derive(Clone)]
pub struct WeatherService {
    provider: Arc<dyn WeatherProvider>,
    cache: Arc<WeatherCache>,
}

/// Current conditions at a location, and whether they came from the cache
#[derive(Debug, Clone)]
pub struct WeatherLookup {
    pub coordinates: Coordinates,
    pub data: Value,
    pub cached: bool,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(provider: Arc<dyn WeatherProvider>, cache: Arc<WeatherCache>) -> Self {
        Self { provider, cache }
    }

    /// Current conditions at `lat`/`lon`, served from the cache while fresh
    pub async fn current_at(&self, lat: &str, lon: &str) -> AppResult<WeatherLookup> {
        let coordinates = parse_coordinates(lat, lon)?;
        let key = WeatherCache::key(lat, lon);

        if let Some(data) = self.cache.get(&key).await {
            tracing::debug!("Weather cache hit for {}", key);
            return Ok(WeatherLookup {
                coordinates,
                data,
                cached: true,
            });
        }

        let data = self.provider.current_by_coordinates(coordinates).await?;
        self.cache.insert(key, data.clone()).await;

        Ok(WeatherLookup {
            coordinates,
            data,
            cached: false,
        })
    }

    /// Current conditions for a city; not cached
    pub async fn current_for_city(&self, city: &str) -> AppResult<Value> {
        let city = validate_city_name(city).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        self.provider.current_by_city(city).await
    }

    /// Forecast at `lat`/`lon`; not cached
    pub async fn forecast(&self, lat: &str, lon: &str) -> AppResult<Value> {
        let coordinates = parse_coordinates(lat, lon)?;
        self.provider.forecast(coordinates).await
    }

    /// Everything currently held by the cache
    pub async fn cached_entries(&self) -> HashMap<String, CachedWeather> {
        self.cache.snapshot().await
    }
}
