use geo::Polygon;
use serde::{Deserialize, Serialize};

use crate::municipality::Municipality;

/// A second-level administrative division, owned by a province.
///
/// District codes are unique within their owning province
/// (case-insensitively), not globally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct District {
    /// Code unique within the owning province (case-insensitive).
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub name_local: Option<String>,
    /// Surface area in square kilometers.
    #[serde(default)]
    pub area_sq_km: Option<f64>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub headquarter: Option<String>,
    #[serde(default)]
    pub headquarter_local: Option<String>,
    /// Boundary polygon in WGS84 (EPSG:4326).
    #[serde(default)]
    pub geometry: Option<Polygon>,
    #[serde(default)]
    pub municipalities: Vec<Municipality>,
}

impl District {
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
            municipalities: Vec::new(),
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

    pub fn with_municipality(mut self, municipality: Municipality) -> Self {
        self.municipalities.push(municipality);
        self
    }

    /// Find an owned municipality by code, case-insensitively.
    pub fn municipality(&self, code: &str) -> Option<&Municipality> {
        self.municipalities
            .iter()
            .find(|m| m.code.eq_ignore_ascii_case(code))
    }

    pub fn municipality_mut(&mut self, code: &str) -> Option<&mut Municipality> {
        self.municipalities
            .iter_mut()
            .find(|m| m.code.eq_ignore_ascii_case(code))
    }

    /// Number of directly owned municipalities.
    pub fn municipality_count(&self) -> usize {
        self.municipalities.len()
    }

    /// Number of wards across all owned municipalities.
    pub fn ward_count(&self) -> usize {
        self.municipalities.iter().map(|m| m.ward_count()).sum()
    }

    /// Sum of the owned municipalities' recorded populations, missing values
    /// counting as zero.
    pub fn total_population(&self) -> u64 {
        self.municipalities
            .iter()
            .map(|m| m.population.unwrap_or(0))
            .sum()
    }

    /// Sum of the owned municipalities' recorded areas, missing values
    /// counting as zero.
    pub fn total_area(&self) -> f64 {
        self.municipalities
            .iter()
            .map(|m| m.area_sq_km.unwrap_or(0.0))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::municipality::MunicipalityType;

    #[test]
    fn test_district_builder() {
        let district = District::new("D1", "Kathmandu")
            .with_area(395.0)
            .with_population(2_017_532)
            .with_headquarter("Kathmandu");

        assert_eq!(district.code, "D1");
        assert_eq!(district.population, Some(2_017_532));
        assert!(district.municipalities.is_empty());
    }

    #[test]
    fn test_municipality_lookup_is_case_insensitive() {
        let district = District::new("D1", "Kathmandu").with_municipality(Municipality::new(
            "KTM",
            "Kathmandu",
            MunicipalityType::Metropolitan,
            32,
        ));

        assert!(district.municipality("ktm").is_some());
        assert!(district.municipality("KTM").is_some());
        assert!(district.municipality("LAL").is_none());
    }

    #[test]
    fn test_total_population_missing_as_zero() {
        let district = District::new("D1", "Kathmandu")
            .with_municipality(
                Municipality::new("KTM", "Kathmandu", MunicipalityType::Metropolitan, 32)
                    .with_population(845_767),
            )
            .with_municipality(Municipality::new(
                "KFG",
                "Kageshwori Manohara",
                MunicipalityType::Municipality,
                9,
            ));

        assert_eq!(district.total_population(), 845_767);
    }
}
