//! Boundary validation for caller-supplied values.
//!
//! These checks run where user input is converted into typed values: at
//! criteria validation and at registry insert time. The predicate compiler
//! and projection builder assume already-validated input.

use geo::Point;
use georegistry_types::{MAX_CODE_LEN, MAX_TOTAL_WARDS, MAX_WARD_NUMBER};

use crate::error::{RegistryError, Result};

/// Validate a WGS84 point: finite coordinates, longitude in [-180, 180],
/// latitude in [-90, 90].
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (lon, lat) = (point.x(), point.y());

    if !lon.is_finite() {
        return Err(RegistryError::InvalidGeography(format!(
            "Longitude must be finite, got: {}",
            lon
        )));
    }

    if !lat.is_finite() {
        return Err(RegistryError::InvalidGeography(format!(
            "Latitude must be finite, got: {}",
            lat
        )));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Err(RegistryError::InvalidGeography(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            lon
        )));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Err(RegistryError::InvalidGeography(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            lat
        )));
    }

    Ok(())
}

/// Validate a proximity-search radius against the configured maximum.
pub fn validate_radius_km(radius_km: f64, max_radius_km: f64) -> Result<()> {
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(RegistryError::InvalidGeography(format!(
            "Radius must be positive and finite, got: {}",
            radius_km
        )));
    }

    if radius_km > max_radius_km {
        return Err(RegistryError::InvalidGeography(format!(
            "Radius {} km exceeds the configured maximum of {} km",
            radius_km, max_radius_km
        )));
    }

    Ok(())
}

/// Validate an entity code: non-empty, at most [`MAX_CODE_LEN`] characters,
/// ASCII uppercase alphanumeric plus `-` and `_`.
pub fn validate_code(code: &str) -> Result<()> {
    if code.is_empty() {
        return Err(RegistryError::InvalidInput(
            "Code must not be empty".to_string(),
        ));
    }

    if code.len() > MAX_CODE_LEN {
        return Err(RegistryError::InvalidInput(format!(
            "Code '{}' exceeds {} characters",
            code, MAX_CODE_LEN
        )));
    }

    let valid = code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if !valid {
        return Err(RegistryError::InvalidInput(format!(
            "Code '{}' must be uppercase alphanumeric with '-' or '_'",
            code
        )));
    }

    Ok(())
}

/// Validate a ward number (1 to [`MAX_WARD_NUMBER`]).
pub fn validate_ward_number(ward_number: u32) -> Result<()> {
    if !(1..=MAX_WARD_NUMBER).contains(&ward_number) {
        return Err(RegistryError::InvalidInput(format!(
            "Ward number must be in 1..={}, got: {}",
            MAX_WARD_NUMBER, ward_number
        )));
    }
    Ok(())
}

/// Validate a declared ward count (1 to [`MAX_TOTAL_WARDS`]).
pub fn validate_total_wards(total_wards: u32) -> Result<()> {
    if !(1..=MAX_TOTAL_WARDS).contains(&total_wards) {
        return Err(RegistryError::InvalidInput(format!(
            "Total wards must be in 1..={}, got: {}",
            MAX_TOTAL_WARDS, total_wards
        )));
    }
    Ok(())
}

/// Reject a paired range filter whose lower bound exceeds its upper bound.
/// Absent bounds are fine.
pub fn validate_range(field: &'static str, from: Option<f64>, to: Option<f64>) -> Result<()> {
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Err(RegistryError::InvalidRange { field, from, to });
    }
    Ok(())
}
