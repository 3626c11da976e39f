use geo::Point;
use serde::{Deserialize, Serialize};

/// The smallest administrative unit, owned by a municipality.
///
/// Wards have no code of their own; they are addressed by a ward number
/// unique within the owning municipality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ward {
    /// Number unique within the owning municipality (1-33).
    pub ward_number: u32,
    /// Surface area in square kilometers.
    #[serde(default)]
    pub area_sq_km: Option<f64>,
    #[serde(default)]
    pub population: Option<u64>,
    /// Ward office location as a WGS84 point (longitude, latitude).
    #[serde(default)]
    pub location: Option<Point>,
    /// Name of the place where the ward office sits.
    #[serde(default)]
    pub office_location: Option<String>,
    #[serde(default)]
    pub office_location_local: Option<String>,
}

impl Ward {
    pub fn new(ward_number: u32) -> Self {
        Self {
            ward_number,
            area_sq_km: None,
            population: None,
            location: None,
            office_location: None,
            office_location_local: None,
        }
    }

    pub fn with_area(mut self, area_sq_km: f64) -> Self {
        self.area_sq_km = Some(area_sq_km);
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = Some(population);
        self
    }

    /// Set the office location from latitude/longitude in degrees.
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(Point::new(longitude, latitude));
        self
    }

    pub fn with_office_location(mut self, office_location: impl Into<String>) -> Self {
        self.office_location = Some(office_location.into());
        self
    }

    pub fn with_office_location_local(mut self, office_location_local: impl Into<String>) -> Self {
        self.office_location_local = Some(office_location_local.into());
        self
    }
}
