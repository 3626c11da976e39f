//! Geospatial search and dynamic projection over an administrative hierarchy.
//!
//! ```rust
//! use georegistry::{MunicipalityCriteria, Registry};
//! use georegistry_types::{District, Municipality, MunicipalityType, Province};
//!
//! let registry = Registry::new();
//! registry.add_province(
//!     Province::new("P3", "Bagmati").with_district(
//!         District::new("KTM", "Kathmandu").with_municipality(
//!             Municipality::new("KTM-M", "Kathmandu", MunicipalityType::Metropolitan, 32)
//!                 .with_location(27.7172, 85.3240),
//!         ),
//!     ),
//! )?;
//!
//! let criteria = MunicipalityCriteria::default().with_geo(27.7172, 85.3240, 5.0);
//! let page = registry.search_municipalities(&criteria)?;
//! assert_eq!(page.total, 1);
//! # Ok::<(), georegistry::RegistryError>(())
//! ```

pub mod config;
pub mod criteria;
pub mod error;
pub mod predicate;
pub mod projection;
pub mod registry;
pub mod scope;
pub mod sort;
pub mod spatial;
pub mod validation;

pub use config::Config;
pub use error::{RegistryError, Result};
pub use registry::{Registry, SearchPage};

pub use geo::{Point, Polygon};

pub use criteria::{
    DistrictCriteria, GeoFilter, MunicipalityCriteria, ProvinceCriteria, WardCriteria,
};

pub use predicate::Predicate;

pub use projection::{
    DistrictField, MunicipalityField, Projection, ProvinceField, WardField, field_set,
};

pub use scope::{Candidate, DistrictScope, HierarchyLevel, MunicipalityScope, RangeField, WardScope};

pub use sort::{SortDirection, SortField};

pub use spatial::{GeoBounds, bounding_box_around, distance_between};

pub use georegistry_types::{District, Municipality, MunicipalityType, Province, Ward};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, Registry, RegistryError, Result, SearchPage};

    pub use geo::{Point, Polygon};

    pub use crate::{
        DistrictCriteria, GeoFilter, MunicipalityCriteria, ProvinceCriteria, WardCriteria,
    };

    pub use crate::{SortDirection, SortField};

    pub use crate::{DistrictField, MunicipalityField, ProvinceField, WardField, field_set};

    pub use georegistry_types::{District, Municipality, MunicipalityType, Province, Ward};
}
