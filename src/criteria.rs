//! Search criteria value objects.
//!
//! One criteria struct per hierarchy level, every filter optional. Absent
//! filters contribute nothing to the compiled predicate; an all-default
//! criteria matches every entity. `validate` is the boundary where caller
//! input is rejected — the predicate compiler downstream assumes it ran.

use geo::Point;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use georegistry_types::MunicipalityType;

use crate::config::Config;
use crate::error::{RegistryError, Result};
use crate::projection::{DistrictField, MunicipalityField, ProvinceField, WardField};
use crate::sort::{SortDirection, SortField};
use crate::validation;

/// A proximity filter: center point plus radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFilter {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl GeoFilter {
    pub fn new(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }

    pub fn validate(&self, config: &Config) -> Result<()> {
        validation::validate_geographic_point(&self.center())?;
        validation::validate_radius_km(self.radius_km, config.max_radius_km)
    }
}

fn validate_page_size(page_size: Option<usize>, config: &Config) -> Result<()> {
    if let Some(size) = page_size
        && !(1..=config.max_page_size).contains(&size)
    {
        return Err(RegistryError::InvalidInput(format!(
            "Page size must be in 1..={}, got: {}",
            config.max_page_size, size
        )));
    }
    Ok(())
}

/// Criteria for province searches.
///
/// # Examples
///
/// ```rust
/// use georegistry::{Config, ProvinceCriteria};
///
/// let criteria = ProvinceCriteria::default()
///     .with_term("koshi")
///     .with_population_range(Some(1_000_000), None);
/// assert!(criteria.validate(&Config::default()).is_ok());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvinceCriteria {
    /// Free-text term matched case-insensitively against name, localized
    /// name, and headquarters.
    pub term: Option<String>,
    /// Exact code match, case-insensitive.
    pub code: Option<String>,
    pub min_population: Option<u64>,
    pub max_population: Option<u64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
    /// Zero-based page index.
    pub page: usize,
    /// Page size (1 to the configured maximum); the configured default when
    /// absent.
    pub page_size: Option<usize>,
    /// Projection fields; [`ProvinceField::DEFAULT`] when absent.
    pub fields: Option<FxHashSet<ProvinceField>>,
}

impl ProvinceCriteria {
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_population_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_population = min;
        self.max_population = max;
        self
    }

    pub fn with_area_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_area = min;
        self.max_area = max;
        self
    }

    pub fn with_sort(mut self, sort_by: SortField, direction: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.sort_direction = direction;
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = Some(page_size);
        self
    }

    pub fn with_fields(mut self, fields: FxHashSet<ProvinceField>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn validate(&self, config: &Config) -> Result<()> {
        validation::validate_range(
            "population",
            self.min_population.map(|v| v as f64),
            self.max_population.map(|v| v as f64),
        )?;
        validation::validate_range("area", self.min_area, self.max_area)?;
        validate_page_size(self.page_size, config)
    }
}

/// Criteria for district searches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DistrictCriteria {
    pub term: Option<String>,
    pub code: Option<String>,
    /// Restrict to districts of this province.
    pub province_code: Option<String>,
    pub min_population: Option<u64>,
    pub max_population: Option<u64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub page_size: Option<usize>,
    pub fields: Option<FxHashSet<DistrictField>>,
}

impl DistrictCriteria {
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_province_code(mut self, province_code: impl Into<String>) -> Self {
        self.province_code = Some(province_code.into());
        self
    }

    pub fn with_population_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_population = min;
        self.max_population = max;
        self
    }

    pub fn with_area_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_area = min;
        self.max_area = max;
        self
    }

    pub fn with_sort(mut self, sort_by: SortField, direction: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.sort_direction = direction;
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = Some(page_size);
        self
    }

    pub fn with_fields(mut self, fields: FxHashSet<DistrictField>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn validate(&self, config: &Config) -> Result<()> {
        validation::validate_range(
            "population",
            self.min_population.map(|v| v as f64),
            self.max_population.map(|v| v as f64),
        )?;
        validation::validate_range("area", self.min_area, self.max_area)?;
        validate_page_size(self.page_size, config)
    }
}

/// Criteria for municipality searches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MunicipalityCriteria {
    pub term: Option<String>,
    pub code: Option<String>,
    pub province_code: Option<String>,
    pub district_code: Option<String>,
    /// Keep only these classifications; empty means all.
    pub types: Vec<MunicipalityType>,
    pub min_population: Option<u64>,
    pub max_population: Option<u64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub min_total_wards: Option<u32>,
    pub max_total_wards: Option<u32>,
    pub geo: Option<GeoFilter>,
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub page_size: Option<usize>,
    pub fields: Option<FxHashSet<MunicipalityField>>,
}

impl MunicipalityCriteria {
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_province_code(mut self, province_code: impl Into<String>) -> Self {
        self.province_code = Some(province_code.into());
        self
    }

    pub fn with_district_code(mut self, district_code: impl Into<String>) -> Self {
        self.district_code = Some(district_code.into());
        self
    }

    pub fn with_types(mut self, types: Vec<MunicipalityType>) -> Self {
        self.types = types;
        self
    }

    /// Parse classification filters from string literals, as received over
    /// query strings or similar untyped surfaces.
    pub fn with_type_names<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let parsed = name
                .as_ref()
                .parse::<MunicipalityType>()
                .map_err(|_| RegistryError::UnknownMunicipalityType(name.as_ref().to_string()))?;
            self.types.push(parsed);
        }
        Ok(self)
    }

    pub fn with_population_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_population = min;
        self.max_population = max;
        self
    }

    pub fn with_area_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_area = min;
        self.max_area = max;
        self
    }

    pub fn with_total_wards_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_total_wards = min;
        self.max_total_wards = max;
        self
    }

    pub fn with_geo(mut self, latitude: f64, longitude: f64, radius_km: f64) -> Self {
        self.geo = Some(GeoFilter::new(latitude, longitude, radius_km));
        self
    }

    pub fn with_sort(mut self, sort_by: SortField, direction: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.sort_direction = direction;
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = Some(page_size);
        self
    }

    pub fn with_fields(mut self, fields: FxHashSet<MunicipalityField>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn validate(&self, config: &Config) -> Result<()> {
        validation::validate_range(
            "population",
            self.min_population.map(|v| v as f64),
            self.max_population.map(|v| v as f64),
        )?;
        validation::validate_range("area", self.min_area, self.max_area)?;
        validation::validate_range(
            "total_wards",
            self.min_total_wards.map(|v| v as f64),
            self.max_total_wards.map(|v| v as f64),
        )?;
        if let Some(geo) = &self.geo {
            geo.validate(config)?;
        }
        validate_page_size(self.page_size, config)
    }
}

/// Criteria for ward searches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WardCriteria {
    /// Free-text term matched against the ward office location names.
    pub term: Option<String>,
    pub province_code: Option<String>,
    pub district_code: Option<String>,
    pub municipality_code: Option<String>,
    pub min_ward_number: Option<u32>,
    pub max_ward_number: Option<u32>,
    pub min_population: Option<u64>,
    pub max_population: Option<u64>,
    pub min_area: Option<f64>,
    pub max_area: Option<f64>,
    pub geo: Option<GeoFilter>,
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub page_size: Option<usize>,
    pub fields: Option<FxHashSet<WardField>>,
}

impl WardCriteria {
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn with_province_code(mut self, province_code: impl Into<String>) -> Self {
        self.province_code = Some(province_code.into());
        self
    }

    pub fn with_district_code(mut self, district_code: impl Into<String>) -> Self {
        self.district_code = Some(district_code.into());
        self
    }

    pub fn with_municipality_code(mut self, municipality_code: impl Into<String>) -> Self {
        self.municipality_code = Some(municipality_code.into());
        self
    }

    pub fn with_ward_number_range(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.min_ward_number = min;
        self.max_ward_number = max;
        self
    }

    pub fn with_population_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_population = min;
        self.max_population = max;
        self
    }

    pub fn with_area_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_area = min;
        self.max_area = max;
        self
    }

    pub fn with_geo(mut self, latitude: f64, longitude: f64, radius_km: f64) -> Self {
        self.geo = Some(GeoFilter::new(latitude, longitude, radius_km));
        self
    }

    pub fn with_sort(mut self, sort_by: SortField, direction: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.sort_direction = direction;
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = Some(page_size);
        self
    }

    pub fn with_fields(mut self, fields: FxHashSet<WardField>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn validate(&self, config: &Config) -> Result<()> {
        validation::validate_range(
            "ward_number",
            self.min_ward_number.map(|v| v as f64),
            self.max_ward_number.map(|v| v as f64),
        )?;
        validation::validate_range(
            "population",
            self.min_population.map(|v| v as f64),
            self.max_population.map(|v| v as f64),
        )?;
        validation::validate_range("area", self.min_area, self.max_area)?;
        if let Some(geo) = &self.geo {
            geo.validate(config)?;
        }
        validate_page_size(self.page_size, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_is_valid() {
        let config = Config::default();
        assert!(ProvinceCriteria::default().validate(&config).is_ok());
        assert!(DistrictCriteria::default().validate(&config).is_ok());
        assert!(MunicipalityCriteria::default().validate(&config).is_ok());
        assert!(WardCriteria::default().validate(&config).is_ok());
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let config = Config::default();
        let criteria =
            ProvinceCriteria::default().with_population_range(Some(1000), Some(10));
        let err = criteria.validate(&config).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidRange { .. }));
    }

    #[test]
    fn test_page_size_bounds() {
        let config = Config::default();

        let ok = WardCriteria::default().with_page(0, 100);
        assert!(ok.validate(&config).is_ok());

        let too_big = WardCriteria::default().with_page(0, 101);
        assert!(too_big.validate(&config).is_err());

        let zero = WardCriteria::default().with_page(0, 0);
        assert!(zero.validate(&config).is_err());
    }

    #[test]
    fn test_geo_filter_validation() {
        let config = Config::default();

        let ok = MunicipalityCriteria::default().with_geo(27.7172, 85.3240, 5.0);
        assert!(ok.validate(&config).is_ok());

        let bad_radius = MunicipalityCriteria::default().with_geo(27.7172, 85.3240, 250.0);
        assert!(matches!(
            bad_radius.validate(&config).unwrap_err(),
            RegistryError::InvalidGeography(_)
        ));

        let bad_latitude = MunicipalityCriteria::default().with_geo(95.0, 85.3240, 5.0);
        assert!(bad_latitude.validate(&config).is_err());
    }

    #[test]
    fn test_geo_filter_center_is_lon_lat() {
        let filter = GeoFilter::new(27.7172, 85.3240, 5.0);
        let center = filter.center();
        assert_eq!(center.x(), 85.3240);
        assert_eq!(center.y(), 27.7172);
    }

    #[test]
    fn test_type_names_parse_or_reject() {
        let criteria = MunicipalityCriteria::default()
            .with_type_names(["metropolitan", "Sub-Metropolitan"])
            .unwrap();
        assert_eq!(
            criteria.types,
            vec![
                MunicipalityType::Metropolitan,
                MunicipalityType::SubMetropolitan
            ]
        );

        let err = MunicipalityCriteria::default()
            .with_type_names(["village"])
            .unwrap_err();
        assert!(matches!(err, RegistryError::UnknownMunicipalityType(_)));
    }

    #[test]
    fn test_criteria_deserializes_with_defaults() {
        let criteria: WardCriteria = serde_json::from_str(
            r#"{ "province_code": "P1", "sort_by": "distance", "page_size": 10 }"#,
        )
        .unwrap();

        assert_eq!(criteria.province_code.as_deref(), Some("P1"));
        assert_eq!(criteria.sort_by, SortField::Distance);
        assert_eq!(criteria.page, 0);
        assert_eq!(criteria.page_size, Some(10));
        assert!(criteria.term.is_none());
        assert!(criteria.fields.is_none());
    }
}
