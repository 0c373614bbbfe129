//! Validation utilities for the Disaster Early Warning System

use thiserror::Error;

use crate::types::Coordinates;

/// Why a coordinate pair was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Latitude and longitude are required")]
    Missing,

    #[error("Invalid {field}: '{value}' is not a number")]
    NotANumber { field: &'static str, value: String },

    #[error("Latitude {0} is out of range (-90 to 90)")]
    LatitudeOutOfRange(f64),

    #[error("Longitude {0} is out of range (-180 to 180)")]
    LongitudeOutOfRange(f64),
}

fn parse_component(field: &'static str, raw: &str) -> Result<f64, CoordinateError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoordinateError::Missing);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoordinateError::NotANumber {
            field,
            value: raw.to_string(),
        })
}

/// Parse latitude/longitude path segments into checked coordinates
pub fn parse_coordinates(lat: &str, lon: &str) -> Result<Coordinates, CoordinateError> {
    let lat = parse_component("latitude", lat)?;
    let lon = parse_component("longitude", lon)?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(CoordinateError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(CoordinateError::LongitudeOutOfRange(lon));
    }

    Ok(Coordinates::new(lat, lon))
}

/// Validate a city name before sending it upstream
pub fn validate_city_name(name: &str) -> Result<&str, &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("City name is required");
    }
    if trimmed.chars().count() > 100 {
        return Err("City name is too long");
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates_valid() {
        let coords = parse_coordinates("13.0827", "80.2707").unwrap();
        assert_eq!(coords, Coordinates::new(13.0827, 80.2707));
    }

    #[test]
    fn test_parse_coordinates_boundaries() {
        assert!(parse_coordinates("90", "180").is_ok());
        assert!(parse_coordinates("-90", "-180").is_ok());
    }

    #[test]
    fn test_parse_coordinates_missing() {
        assert_eq!(parse_coordinates("", "80"), Err(CoordinateError::Missing));
        assert_eq!(parse_coordinates("13", "  "), Err(CoordinateError::Missing));
    }

    #[test]
    fn test_parse_coordinates_not_a_number() {
        assert!(matches!(
            parse_coordinates("abc", "80"),
            Err(CoordinateError::NotANumber { field: "latitude", .. })
        ));
        assert!(matches!(
            parse_coordinates("13", "NaN"),
            Err(CoordinateError::NotANumber { field: "longitude", .. })
        ));
    }

    #[test]
    fn test_parse_coordinates_out_of_range() {
        assert_eq!(
            parse_coordinates("91", "0"),
            Err(CoordinateError::LatitudeOutOfRange(91.0))
        );
        assert_eq!(
            parse_coordinates("0", "-181"),
            Err(CoordinateError::LongitudeOutOfRange(-181.0))
        );
    }

    #[test]
    fn test_validate_city_name() {
        assert_eq!(validate_city_name("  Mumbai "), Ok("Mumbai"));
        assert!(validate_city_name("   ").is_err());
        assert!(validate_city_name(&"x".repeat(101)).is_err());
    }
}
