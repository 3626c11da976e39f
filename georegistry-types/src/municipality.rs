use geo::{Point, Polygon};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ward::Ward;

/// Classification of a municipality-level division.
///
/// Parsed case-insensitively from either hyphenated or underscored literals
/// (`"sub-metropolitan"` and `"SUB_METROPOLITAN"` both parse).
///
/// # Examples
///
/// ```
/// use georegistry_types::MunicipalityType;
///
/// let kind: MunicipalityType = "rural_municipality".parse().unwrap();
/// assert_eq!(kind, MunicipalityType::RuralMunicipality);
/// assert!("village".parse::<MunicipalityType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MunicipalityType {
    Metropolitan,
    SubMetropolitan,
    Municipality,
    RuralMunicipality,
}

impl MunicipalityType {
    pub const ALL: [MunicipalityType; 4] = [
        MunicipalityType::Metropolitan,
        MunicipalityType::SubMetropolitan,
        MunicipalityType::Municipality,
        MunicipalityType::RuralMunicipality,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            MunicipalityType::Metropolitan => "metropolitan",
            MunicipalityType::SubMetropolitan => "sub_metropolitan",
            MunicipalityType::Municipality => "municipality",
            MunicipalityType::RuralMunicipality => "rural_municipality",
        }
    }
}

impl fmt::Display for MunicipalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MunicipalityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "metropolitan" => Ok(MunicipalityType::Metropolitan),
            "sub_metropolitan" => Ok(MunicipalityType::SubMetropolitan),
            "municipality" => Ok(MunicipalityType::Municipality),
            "rural_municipality" => Ok(MunicipalityType::RuralMunicipality),
            _ => Err(format!("unknown municipality type: {}", s)),
        }
    }
}

/// A third-level administrative division, owned by a district.
///
/// Municipalities carry a point location used by proximity search and a
/// declared ward count (`total_wards`) that may differ from the number of
/// ward records actually loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    /// Code unique within the owning district (case-insensitive).
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub name_local: Option<String>,
    pub municipality_type: MunicipalityType,
    /// Declared number of wards (1-35).
    pub total_wards: u32,
    /// Surface area in square kilometers.
    #[serde(default)]
    pub area_sq_km: Option<f64>,
    #[serde(default)]
    pub population: Option<u64>,
    /// Seat location as a WGS84 point (longitude, latitude).
    #[serde(default)]
    pub location: Option<Point>,
    /// Boundary polygon in WGS84 (EPSG:4326).
    #[serde(default)]
    pub geometry: Option<Polygon>,
    #[serde(default)]
    pub wards: Vec<Ward>,
}

impl Municipality {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        municipality_type: MunicipalityType,
        total_wards: u32,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            name_local: None,
            municipality_type,
            total_wards,
            area_sq_km: None,
            population: None,
            location: None,
            geometry: None,
            wards: Vec::new(),
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

    /// Set the seat location from latitude/longitude in degrees.
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(Point::new(longitude, latitude));
        self
    }

    pub fn with_geometry(mut self, geometry: Polygon) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_ward(mut self, ward: Ward) -> Self {
        self.wards.push(ward);
        self
    }

    /// Find an owned ward by number.
    pub fn ward(&self, ward_number: u32) -> Option<&Ward> {
        self.wards.iter().find(|w| w.ward_number == ward_number)
    }

    /// Number of ward records actually loaded (not the declared count).
    pub fn ward_count(&self) -> usize {
        self.wards.len()
    }

    /// Sum of the owned wards' recorded populations, missing values counting
    /// as zero.
    pub fn total_population(&self) -> u64 {
        self.wards.iter().map(|w| w.population.unwrap_or(0)).sum()
    }

    /// Sum of the owned wards' recorded areas, missing values counting as
    /// zero.
    pub fn total_area(&self) -> f64 {
        self.wards
            .iter()
            .map(|w| w.area_sq_km.unwrap_or(0.0))
            .sum()
    }
}
