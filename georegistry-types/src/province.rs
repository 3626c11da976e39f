use geo::Polygon;
use serde::{Deserialize, Serialize};

use crate::district::District;

/// A top-level administrative division.
///
/// Provinces are addressed by a globally unique, human-readable code and own
/// their districts. Aggregate statistics are derived from the owned subtree
/// on every call rather than cached.
///
/// # Examples
///
/// ```
/// use georegistry_types::Province;
///
/// let province = Province::new("P3", "Bagmati")
///     .with_name_local("बागमती")
///     .with_headquarter("Hetauda");
///
/// assert_eq!(province.code, "P3");
/// assert_eq!(province.total_population(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    /// Unique uppercase code (globally unique, case-insensitive).
    pub code: String,
    pub name: String,
    /// Name in the local script, if recorded.
    #[serde(default)]
    pub name_local: Option<String>,
    /// Surface area in square kilometers.
    #[serde(default)]
    pub area_sq_km: Option<f64>,
    #[serde(default)]
    pub population: Option<u64>,
    /// Headquarters town name.
    #[serde(default)]
    pub headquarter: Option<String>,
    #[serde(default)]
    pub headquarter_local: Option<String>,
    /// Boundary polygon in WGS84 (EPSG:4326).
    #[serde(default)]
    pub geometry: Option<Polygon>,
    #[serde(default)]
    pub districts: Vec<District>,
}

impl Province {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            name_local: None,
            area_sq_km: None,
            population: None,
            headquarter: None,
            headquarter_local: None,
            geometry: None,
            districts: Vec::new(),
        }
    }

    pub fn with_name_local(mut self, name_local: impl Into<String>) -> Self {
        self.name_local = Some(name_local.into());
        self
    }

    pub fn with_area(mut self, area_sq_km: f64) -> Self {
        self.area_sq_km = Some(area_sq_km);
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    pub fn with_headquarter(mut self, headquarter: impl Into<String>) -> Self {
        self.headquarter = Some(headquarter.into());
        self
    }

    pub fn with_headquarter_local(mut self, headquarter_local: impl Into<String>) -> Self {
        self.headquarter_local = Some(headquarter_local.into());
        self
    }

    pub fn with_geometry(mut self, geometry: Polygon) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_district(mut self, district: District) -> Self {
        self.districts.push(district);
        self
    }

    /// Find an owned district by code, case-insensitively.
    pub fn district(&self, code: &str) -> Option<&District> {
        self.districts
            .iter()
            .find(|d| d.code.eq_ignore_ascii_case(code))
    }

    pub fn district_mut(&mut self, code: &str) -> Option<&mut District> {
        self.districts
            .iter_mut()
            .find(|d| d.code.eq_ignore_ascii_case(code))
    }

    /// Number of directly owned districts.
    pub fn district_count(&self) -> usize {
        self.districts.len()
    }

    /// Number of municipalities across all owned districts.
    pub fn municipality_count(&self) -> usize {
        self.districts.iter().map(|d| d.municipality_count()).sum()
    }

    /// Number of wards across the whole owned subtree.
    pub fn ward_count(&self) -> usize {
        self.districts.iter().map(|d| d.ward_count()).sum()
    }

    /// Sum of the owned districts' recorded populations, missing values
    /// counting as zero.
    pub fn total_population(&self) -> u64 {
        self.districts
            .iter()
            .map(|d| d.population.unwrap_or(0))
            .sum()
    }

    /// Sum of the owned districts' recorded areas, missing values counting
    /// as zero.
    pub fn total_area(&self) -> f64 {
        self.districts
            .iter()
            .map(|d| d.area_sq_km.unwrap_or(0.0))
            .sum()
    }
}
