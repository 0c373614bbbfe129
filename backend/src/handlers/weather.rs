//! HTTP handlers for weather endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use super::DataResponse;
use crate::cache::CachedWeather;
use crate::error::AppResult;
use crate::AppState;

/// Current conditions plus whether they were served from the cache
#[derive(Serialize)]
pub struct LocationWeatherResponse {
    pub success: bool,
    pub data: Value,
    pub cached: bool,
}

/// Get current weather at a coordinate pair
pub async fn get_weather_by_location(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
) -> AppResult<Json<LocationWeatherResponse>> {
    let lookup = state.weather_service.current_at(&lat, &lon).await?;
    Ok(Json(LocationWeatherResponse {
        success: true,
        data: lookup.data,
        cached: lookup.cached,
    }))
}

/// Get current weather for a city
pub async fn get_weather_by_city(
    State(state): State<AppState>,
    Path(city_name): Path<String>,
) -> AppResult<Json<DataResponse<Value>>> {
    let data = state.weather_service.current_for_city(&city_name).await?;
    Ok(Json(DataResponse::new(data)))
}

/// Get the forecast at a coordinate pair
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    Path((lat, lon)): Path<(String, String)>,
) -> AppResult<Json<DataResponse<Value>>> {
    let data = state.weather_service.forecast(&lat, &lon).await?;
    Ok(Json(DataResponse::new(data)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedWeatherResponse {
    pub success: bool,
    pub data: HashMap<String, CachedWeather>,
    pub cache_size: usize,
}

/// Dump the weather cache
pub async fn get_cached_weather(State(state): State<AppState>) -> Json<CachedWeatherResponse> {
    let data = state.weather_service.cached_entries().await;
    Json(CachedWeatherResponse {
        success: true,
        cache_size: data.len(),
        data,
    })
}
