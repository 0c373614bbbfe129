//! Disaster risk scoring
//!
//! Two independent scoring paths over a [`WeatherObservation`]:
//!
//! - [`predict`] returns the disaster types whose trigger conditions fire,
//!   each with a threshold-excess score, indicators and a recommendation.
//! - [`assess`] returns a fixed five-category score table plus the rounded
//!   mean of the categories.
//!
//! The two paths use different formulas for the same phenomena and are kept
//! separate; callers pick whichever result shape they serve.

use crate::models::{DisasterPrediction, DisasterType, RiskAssessment, WeatherObservation};

/// Humidity above which flooding is flagged (%)
pub const FLOOD_HUMIDITY_THRESHOLD: f64 = 80.0;
/// Hourly rainfall above which flooding is flagged (mm)
pub const FLOOD_RAIN_THRESHOLD: f64 = 10.0;
/// Wind speed above which a cyclone is flagged (m/s)
pub const CYCLONE_WIND_THRESHOLD: f64 = 15.0;
/// Pressure below which a cyclone is flagged (hPa)
pub const CYCLONE_PRESSURE_THRESHOLD: f64 = 1000.0;
/// Temperature above which a heatwave is flagged (°C)
pub const HEATWAVE_TEMP_THRESHOLD: f64 = 35.0;
/// Humidity below which drought is flagged (%)
pub const DROUGHT_HUMIDITY_THRESHOLD: f64 = 30.0;
/// Temperature above which drought is flagged (°C)
pub const DROUGHT_TEMP_THRESHOLD: f64 = 25.0;

/// Earthquake risk has no weather signal; it is reported as a flat baseline
pub const EARTHQUAKE_BASELINE: u8 = 25;

/// Round half up and clamp into a 0-100 score
fn to_score(value: f64) -> u8 {
    // NaN saturates to 0 on the cast
    value.round().clamp(0.0, 100.0) as u8
}

/// Score how far observed values exceed their thresholds.
///
/// Each `(current, threshold)` pair contributes its relative excess in
/// percent, never negative. With `inverse` set, shortfall below the
/// threshold counts instead. The sum is halved regardless of how many pairs
/// were given, so a single-pair score is half its relative excess.
///
/// `inverse` applies to every pair of the call: cyclone scoring inverts the
/// wind-speed pair along with the pressure pair, so stronger wind never
/// raises the score.
pub fn risk_score(pairs: &[(f64, f64)], inverse: bool) -> u8 {
    let total: f64 = pairs
        .iter()
        .map(|&(current, threshold)| {
            let delta = if inverse {
                threshold - current
            } else {
                current - threshold
            };
            (delta / threshold).max(0.0) * 100.0
        })
        .sum();

    to_score(total / 2.0)
}

fn prediction(
    disaster_type: DisasterType,
    risk_score: u8,
    indicators: &[&str],
    recommendation: &str,
) -> DisasterPrediction {
    DisasterPrediction {
        disaster_type,
        risk_score,
        indicators: indicators.iter().map(|i| i.to_string()).collect(),
        recommendation: recommendation.to_string(),
    }
}

/// Disaster types triggered by an observation, in the order flood, cyclone,
/// heatwave, drought. Conditions are independent, so anywhere from none to
/// all four may fire.
pub fn predict(observation: &WeatherObservation) -> Vec<DisasterPrediction> {
    let temp = observation.temperature_c;
    let humidity = observation.humidity_percent;
    let wind_speed = observation.wind_speed_ms;
    let pressure = observation.pressure_hpa;
    let rain = observation.rain_1h_mm;

    let mut predictions = Vec::new();

    if humidity > FLOOD_HUMIDITY_THRESHOLD || rain > FLOOD_RAIN_THRESHOLD {
        predictions.push(prediction(
            DisasterType::Flood,
            risk_score(
                &[
                    (humidity, FLOOD_HUMIDITY_THRESHOLD),
                    (rain, FLOOD_RAIN_THRESHOLD),
                ],
                false,
            ),
            &["High humidity", "Heavy rainfall"],
            "Stay alert for flooding in low-lying areas",
        ));
    }

    if wind_speed > CYCLONE_WIND_THRESHOLD || pressure < CYCLONE_PRESSURE_THRESHOLD {
        predictions.push(prediction(
            DisasterType::Cyclone,
            risk_score(
                &[
                    (wind_speed, CYCLONE_WIND_THRESHOLD),
                    (pressure, CYCLONE_PRESSURE_THRESHOLD),
                ],
                true,
            ),
            &["High wind speed", "Low atmospheric pressure"],
            "Prepare for severe weather conditions",
        ));
    }

    if temp > HEATWAVE_TEMP_THRESHOLD {
        predictions.push(prediction(
            DisasterType::Heatwave,
            risk_score(&[(temp, HEATWAVE_TEMP_THRESHOLD)], false),
            &["Extreme heat"],
            "Stay hydrated and avoid prolonged sun exposure",
        ));
    }

    if humidity < DROUGHT_HUMIDITY_THRESHOLD && temp > DROUGHT_TEMP_THRESHOLD {
        predictions.push(prediction(
            DisasterType::Drought,
            risk_score(
                &[
                    (humidity, DROUGHT_HUMIDITY_THRESHOLD),
                    (temp, DROUGHT_TEMP_THRESHOLD),
                ],
                true,
            ),
            &["Low humidity", "High temperature"],
            "Conserve water and monitor agricultural conditions",
        ));
    }

    predictions
}

/// Five-category risk table for an observation
///
/// Each category is rounded to an integer score before `overall_risk`
/// averages them, so the overall figure can sit one point away from the mean
/// of the unrounded values (flood 81.5 and heatwave 0.5 give 22, not 21).
pub fn assess(observation: &WeatherObservation) -> RiskAssessment {
    let temp = observation.temperature_c;
    let humidity = observation.humidity_percent;
    let wind_speed = observation.wind_speed_ms;

    let flood = if humidity > 80.0 { humidity } else { 0.0 };
    let cyclone = if wind_speed > 10.0 { wind_speed * 5.0 } else { 0.0 };
    let heatwave = if temp > 25.0 { (temp - 25.0) * 4.0 } else { 0.0 };
    let drought = if humidity < 40.0 && temp > 25.0 {
        (40.0 - humidity) * 2.5
    } else {
        0.0
    };

    let mut assessment = RiskAssessment {
        flood: to_score(flood),
        cyclone: to_score(cyclone),
        earthquake: EARTHQUAKE_BASELINE,
        heatwave: to_score(heatwave),
        drought: to_score(drought),
        overall_risk: 0,
    };
    assessment.overall_risk = overall_risk(&assessment);
    assessment
}

/// Rounded arithmetic mean of the five category scores
pub fn overall_risk(assessment: &RiskAssessment) -> u8 {
    let categories = assessment.categories();
    let sum: u32 = categories.iter().map(|(_, score)| u32::from(*score)).sum();
    to_score(f64::from(sum) / categories.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(temp: f64, humidity: f64, wind: f64, pressure: f64, rain: f64) -> WeatherObservation {
        WeatherObservation::new(temp, humidity, wind, pressure, rain)
    }

    #[test]
    fn test_risk_score_halves_single_pair() {
        // 10% excess, halved
        assert_eq!(risk_score(&[(110.0, 100.0)], false), 5);
    }

    #[test]
    fn test_risk_score_never_negative() {
        assert_eq!(risk_score(&[(50.0, 100.0)], false), 0);
        assert_eq!(risk_score(&[(150.0, 100.0)], true), 0);
    }

    #[test]
    fn test_risk_score_caps_at_100() {
        assert_eq!(risk_score(&[(1000.0, 10.0), (1000.0, 10.0)], false), 100);
    }

    #[test]
    fn test_risk_score_rounds_half_up() {
        // 1% shortfall halved is exactly 0.5
        assert_eq!(risk_score(&[(990.0, 1000.0)], true), 1);
    }

    #[test]
    fn test_calm_weather_predicts_nothing() {
        assert!(predict(&observation(22.0, 55.0, 3.0, 1013.0, 0.0)).is_empty());
    }

    #[test]
    fn test_multiple_predictions_keep_evaluation_order() {
        // Hot, dry, stormy: cyclone, heatwave and drought all fire
        let predictions = predict(&observation(40.0, 10.0, 30.0, 960.0, 0.0));
        let types: Vec<_> = predictions.iter().map(|p| p.disaster_type).collect();
        assert_eq!(
            types,
            vec![DisasterType::Cyclone, DisasterType::Heatwave, DisasterType::Drought]
        );
    }

    #[test]
    fn test_drought_inverts_temperature_pair_too() {
        // Humidity 20 vs 30 gives 33.3; temp 30 vs 25 contributes 0 when inverted
        let predictions = predict(&observation(30.0, 20.0, 0.0, 1013.0, 0.0));
        assert_eq!(predictions.len(), 1);
        assert_eq!(predictions[0].disaster_type, DisasterType::Drought);
        assert_eq!(predictions[0].risk_score, 17);
    }

    #[test]
    fn test_assess_rounds_fractional_categories() {
        let assessment = assess(&observation(25.5, 50.0, 12.3, 1013.0, 0.0));
        // 12.3 * 5 = 61.5
        assert_eq!(assessment.cyclone, 62);
        // 0.5 * 4 = 2
        assert_eq!(assessment.heatwave, 2);
    }

    #[test]
    fn test_assess_clamps_large_values() {
        let assessment = assess(&observation(60.0, 120.0, 40.0, 1013.0, 0.0));
        assert_eq!(assessment.flood, 100);
        assert_eq!(assessment.cyclone, 100);
        assert_eq!(assessment.heatwave, 100);
        assert_eq!(assessment.drought, 0);
    }

    #[test]
    fn test_overall_risk_is_rounded_mean() {
        let assessment = RiskAssessment {
            flood: 90,
            cyclone: 0,
            earthquake: 25,
            heatwave: 0,
            drought: 0,
            overall_risk: 0,
        };
        // 115 / 5 = 23
        assert_eq!(overall_risk(&assessment), 23);
    }
}
