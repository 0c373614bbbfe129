//! WebAssembly module for the Disaster Early Warning System
//!
//! Provides client-side computation for:
//! - Disaster predictions from a weather observation
//! - Five-category risk assessment
//! - Risk level banding for dashboard bars
//! - Disaster catalog lookups

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssessmentOutput {
    risk_assessment: RiskAssessment,
    overall_risk: u8,
}

fn parse_observation(observation_json: &str) -> Result<WeatherObservation, String> {
    serde_json::from_str(observation_json).map_err(|e| format!("Invalid observation JSON: {}", e))
}

fn predictions_json(observation_json: &str) -> Result<String, String> {
    let observation = parse_observation(observation_json)?;
    serde_json::to_string(&shared::risk::predict(&observation)).map_err(|e| e.to_string())
}

fn assessment_json(observation_json: &str) -> Result<String, String> {
    let observation = parse_observation(observation_json)?;
    let assessment = shared::risk::assess(&observation);
    serde_json::to_string(&AssessmentOutput {
        risk_assessment: assessment,
        overall_risk: assessment.overall_risk,
    })
    .map_err(|e| e.to_string())
}

/// Predict triggered disasters; returns a JSON array of predictions
#[wasm_bindgen]
pub fn predict_disasters(observation_json: &str) -> Result<String, JsValue> {
    predictions_json(observation_json).map_err(|e| JsValue::from_str(&e))
}

/// Assess per-category risk; returns `{riskAssessment, overallRisk}` as JSON
#[wasm_bindgen]
pub fn assess_risk(observation_json: &str) -> Result<String, JsValue> {
    assessment_json(observation_json).map_err(|e| JsValue::from_str(&e))
}

/// Band a 0-100 score as "Low", "Medium" or "High"
#[wasm_bindgen]
pub fn risk_level(score: f64) -> String {
    let clamped = score.round().clamp(0.0, 100.0) as u8;
    RiskLevel::from_score(clamped).to_string()
}

/// Catalog entry for a disaster type as JSON, or `null` when unknown
#[wasm_bindgen]
pub fn disaster_info(disaster_type: &str) -> String {
    find_disaster(disaster_type)
        .and_then(|info| serde_json::to_string(&info).ok())
        .unwrap_or_else(|| "null".to_string())
}
