//! Field-driven dynamic projection.
//!
//! Each entity level has a fixed field enumeration and a registry mapping
//! every field to a small resolver function. Projecting an entity walks the
//! canonical field order and invokes a resolver only when its field was
//! requested, so unrequested fields (aggregates over large subtrees,
//! geometry conversion) cost nothing.
//!
//! Nested parent/child summaries are built by recursively projecting the
//! related entity with a fixed minimal field subset. The subsets are
//! hardcoded, never caller-controlled, which bounds response size and
//! prevents cyclic expansion across the hierarchy.

use std::str::FromStr;

use geo::Polygon;
use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use georegistry_types::Province;

use crate::error::RegistryError;
use crate::scope::{DistrictScope, MunicipalityScope, WardScope};

/// A sparse, insertion-ordered field → value mapping.
///
/// Serializes as a JSON object whose keys appear in the canonical field
/// order of the projected entity type.
///
/// # Examples
///
/// ```rust
/// use georegistry::projection::{field_set, project_province, ProvinceField};
/// use georegistry_types::Province;
///
/// let province = Province::new("P1", "Koshi").with_population(100);
/// let fields = field_set(&[ProvinceField::Code, ProvinceField::Population]);
/// let projection = project_province(&province, &fields);
///
/// assert_eq!(projection.len(), 2);
/// assert_eq!(projection.get("name"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    entries: Vec<(&'static str, Value)>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, key: &'static str, value: Value) {
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert into a `serde_json::Value` object. Key order inside the
    /// resulting object follows `serde_json`'s map representation.
    pub fn into_value(self) -> Value {
        Value::Object(
            self.entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }
}

impl Serialize for Projection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Build a field set from a slice of fields.
pub fn field_set<F: Copy + Eq + std::hash::Hash>(fields: &[F]) -> FxHashSet<F> {
    fields.iter().copied().collect()
}

fn opt_str(value: Option<&str>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

fn opt_u64(value: Option<u64>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

fn opt_f64(value: Option<f64>) -> Value {
    value.map(Value::from).unwrap_or(Value::Null)
}

fn point_value(point: Option<&geo::Point>) -> Value {
    match point {
        Some(p) => serde_json::json!({ "latitude": p.y(), "longitude": p.x() }),
        None => Value::Null,
    }
}

/// Convert a stored polygon to GeoJSON. Invoked only when the geometry
/// field was explicitly requested, since the conversion is comparatively
/// expensive.
fn geometry_value(geometry: Option<&Polygon>) -> Value {
    match geometry {
        Some(polygon) => {
            let geometry = geojson::Geometry::new(geojson::Value::from(polygon));
            serde_json::to_value(&geometry).unwrap_or(Value::Null)
        }
        None => Value::Null,
    }
}

macro_rules! field_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($entity:literal) {
            $($variant:ident => $key:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// All fields, in canonical projection output order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The key this field projects under.
            pub const fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl FromStr for $name {
            type Err = RegistryError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($key => Ok($name::$variant),)+
                    _ => Err(RegistryError::UnknownField {
                        entity: $entity,
                        name: s.to_string(),
                    }),
                }
            }
        }
    };
}

field_enum! {
    /// Projectable fields of a province.
    ProvinceField ("province") {
        Code => "code",
        Name => "name",
        NameLocal => "name_local",
        Area => "area_sq_km",
        Population => "population",
        Headquarter => "headquarter",
        HeadquarterLocal => "headquarter_local",
        Geometry => "geometry",
        DistrictCount => "district_count",
        MunicipalityCount => "municipality_count",
        WardCount => "ward_count",
        TotalPopulation => "total_population",
        TotalArea => "total_area",
        Districts => "districts",
    }
}

impl ProvinceField {
    /// Subset projected when the caller requests no fields.
    pub const DEFAULT: &'static [ProvinceField] = &[
        ProvinceField::Code,
        ProvinceField::Name,
        ProvinceField::NameLocal,
        ProvinceField::Area,
        ProvinceField::Population,
        ProvinceField::Headquarter,
    ];
}

field_enum! {
    /// Projectable fields of a district.
    DistrictField ("district") {
        Code => "code",
        Name => "name",
        NameLocal => "name_local",
        Area => "area_sq_km",
        Population => "population",
        Headquarter => "headquarter",
        HeadquarterLocal => "headquarter_local",
        Geometry => "geometry",
        Province => "province",
        MunicipalityCount => "municipality_count",
        WardCount => "ward_count",
        TotalPopulation => "total_population",
        TotalArea => "total_area",
        Municipalities => "municipalities",
    }
}

impl DistrictField {
    pub const DEFAULT: &'static [DistrictField] = &[
        DistrictField::Code,
        DistrictField::Name,
        DistrictField::NameLocal,
        DistrictField::Area,
        DistrictField::Population,
        DistrictField::Headquarter,
    ];
}

field_enum! {
    /// Projectable fields of a municipality.
    MunicipalityField ("municipality") {
        Code => "code",
        Name => "name",
        NameLocal => "name_local",
        Type => "type",
        TotalWards => "total_wards",
        Area => "area_sq_km",
        Population => "population",
        Location => "location",
        Geometry => "geometry",
        Province => "province",
        District => "district",
        WardCount => "ward_count",
        TotalPopulation => "total_population",
        TotalArea => "total_area",
        Wards => "wards",
    }
}

impl MunicipalityField {
    pub const DEFAULT: &'static [MunicipalityField] = &[
        MunicipalityField::Code,
        MunicipalityField::Name,
        MunicipalityField::NameLocal,
        MunicipalityField::Type,
        MunicipalityField::TotalWards,
        MunicipalityField::Location,
    ];
}

field_enum! {
    /// Projectable fields of a ward.
    WardField ("ward") {
        WardNumber => "ward_number",
        Area => "area_sq_km",
        Population => "population",
        Location => "location",
        OfficeLocation => "office_location",
        OfficeLocationLocal => "office_location_local",
        Municipality => "municipality",
        District => "district",
        Province => "province",
    }
}

impl WardField {
    pub const DEFAULT: &'static [WardField] = &[
        WardField::WardNumber,
        WardField::Population,
        WardField::OfficeLocation,
    ];
}

// Fixed minimal subsets for nested summaries. Summary builders never accept
// a caller field set; these constants are the only expansion a related
// entity gets.
const PROVINCE_SUMMARY: &[ProvinceField] = &[
    ProvinceField::Code,
    ProvinceField::Name,
    ProvinceField::NameLocal,
];
const DISTRICT_SUMMARY: &[DistrictField] = &[
    DistrictField::Code,
    DistrictField::Name,
    DistrictField::NameLocal,
];
const MUNICIPALITY_SUMMARY: &[MunicipalityField] = &[
    MunicipalityField::Code,
    MunicipalityField::Name,
    MunicipalityField::Type,
];
const WARD_SUMMARY: &[WardField] = &[WardField::WardNumber, WardField::OfficeLocation];

static PROVINCE_SUMMARY_SET: Lazy<FxHashSet<ProvinceField>> =
    Lazy::new(|| field_set(PROVINCE_SUMMARY));
static DISTRICT_SUMMARY_SET: Lazy<FxHashSet<DistrictField>> =
    Lazy::new(|| field_set(DISTRICT_SUMMARY));
static MUNICIPALITY_SUMMARY_SET: Lazy<FxHashSet<MunicipalityField>> =
    Lazy::new(|| field_set(MUNICIPALITY_SUMMARY));
static WARD_SUMMARY_SET: Lazy<FxHashSet<WardField>> = Lazy::new(|| field_set(WARD_SUMMARY));

fn province_summary(province: &Province) -> Value {
    project_province(province, &PROVINCE_SUMMARY_SET).into_value()
}

fn district_summary(scope: &DistrictScope) -> Value {
    project_district(scope, &DISTRICT_SUMMARY_SET).into_value()
}

fn municipality_summary(scope: &MunicipalityScope) -> Value {
    project_municipality(scope, &MUNICIPALITY_SUMMARY_SET).into_value()
}

fn ward_summary(scope: &WardScope) -> Value {
    project_ward(scope, &WARD_SUMMARY_SET).into_value()
}

type ProvinceResolver = fn(&Province) -> Value;
type DistrictResolver = fn(&DistrictScope) -> Value;
type MunicipalityResolver = fn(&MunicipalityScope) -> Value;
type WardResolver = fn(&WardScope) -> Value;

static PROVINCE_RESOLVERS: Lazy<FxHashMap<ProvinceField, ProvinceResolver>> = Lazy::new(|| {
    let mut registry: FxHashMap<ProvinceField, ProvinceResolver> = FxHashMap::default();
    registry.insert(ProvinceField::Code, |p| Value::from(p.code.as_str()));
    registry.insert(ProvinceField::Name, |p| Value::from(p.name.as_str()));
    registry.insert(ProvinceField::NameLocal, |p| opt_str(p.name_local.as_deref()));
    registry.insert(ProvinceField::Area, |p| opt_f64(p.area_sq_km));
    registry.insert(ProvinceField::Population, |p| opt_u64(p.population));
    registry.insert(ProvinceField::Headquarter, |p| {
        opt_str(p.headquarter.as_deref())
    });
    registry.insert(ProvinceField::HeadquarterLocal, |p| {
        opt_str(p.headquarter_local.as_deref())
    });
    registry.insert(ProvinceField::Geometry, |p| {
        geometry_value(p.geometry.as_ref())
    });
    registry.insert(ProvinceField::DistrictCount, |p| {
        Value::from(p.district_count())
    });
    registry.insert(ProvinceField::MunicipalityCount, |p| {
        Value::from(p.municipality_count())
    });
    registry.insert(ProvinceField::WardCount, |p| Value::from(p.ward_count()));
    registry.insert(ProvinceField::TotalPopulation, |p| {
        Value::from(p.total_population())
    });
    registry.insert(ProvinceField::TotalArea, |p| Value::from(p.total_area()));
    registry.insert(ProvinceField::Districts, |p| {
        Value::Array(
            p.districts
                .iter()
                .map(|d| {
                    district_summary(&DistrictScope {
                        province: p,
                        district: d,
                    })
                })
                .collect(),
        )
    });
    registry
});

static DISTRICT_RESOLVERS: Lazy<FxHashMap<DistrictField, DistrictResolver>> = Lazy::new(|| {
    let mut registry: FxHashMap<DistrictField, DistrictResolver> = FxHashMap::default();
    registry.insert(DistrictField::Code, |s| Value::from(s.district.code.as_str()));
    registry.insert(DistrictField::Name, |s| Value::from(s.district.name.as_str()));
    registry.insert(DistrictField::NameLocal, |s| {
        opt_str(s.district.name_local.as_deref())
    });
    registry.insert(DistrictField::Area, |s| opt_f64(s.district.area_sq_km));
    registry.insert(DistrictField::Population, |s| opt_u64(s.district.population));
    registry.insert(DistrictField::Headquarter, |s| {
        opt_str(s.district.headquarter.as_deref())
    });
    registry.insert(DistrictField::HeadquarterLocal, |s| {
        opt_str(s.district.headquarter_local.as_deref())
    });
    registry.insert(DistrictField::Geometry, |s| {
        geometry_value(s.district.geometry.as_ref())
    });
    registry.insert(DistrictField::Province, |s| province_summary(s.province));
    registry.insert(DistrictField::MunicipalityCount, |s| {
        Value::from(s.district.municipality_count())
    });
    registry.insert(DistrictField::WardCount, |s| {
        Value::from(s.district.ward_count())
    });
    registry.insert(DistrictField::TotalPopulation, |s| {
        Value::from(s.district.total_population())
    });
    registry.insert(DistrictField::TotalArea, |s| {
        Value::from(s.district.total_area())
    });
    registry.insert(DistrictField::Municipalities, |s| {
        Value::Array(
            s.district
                .municipalities
                .iter()
                .map(|m| {
                    municipality_summary(&MunicipalityScope {
                        province: s.province,
                        district: s.district,
                        municipality: m,
                    })
                })
                .collect(),
        )
    });
    registry
});

static MUNICIPALITY_RESOLVERS: Lazy<FxHashMap<MunicipalityField, MunicipalityResolver>> =
    Lazy::new(|| {
        let mut registry: FxHashMap<MunicipalityField, MunicipalityResolver> =
            FxHashMap::default();
        registry.insert(MunicipalityField::Code, |s| {
            Value::from(s.municipality.code.as_str())
        });
        registry.insert(MunicipalityField::Name, |s| {
            Value::from(s.municipality.name.as_str())
        });
        registry.insert(MunicipalityField::NameLocal, |s| {
            opt_str(s.municipality.name_local.as_deref())
        });
        registry.insert(MunicipalityField::Type, |s| {
            Value::from(s.municipality.municipality_type.as_str())
        });
        registry.insert(MunicipalityField::TotalWards, |s| {
            Value::from(s.municipality.total_wards)
        });
        registry.insert(MunicipalityField::Area, |s| opt_f64(s.municipality.area_sq_km));
        registry.insert(MunicipalityField::Population, |s| {
            opt_u64(s.municipality.population)
        });
        registry.insert(MunicipalityField::Location, |s| {
            point_value(s.municipality.location.as_ref())
        });
        registry.insert(MunicipalityField::Geometry, |s| {
            geometry_value(s.municipality.geometry.as_ref())
        });
        registry.insert(MunicipalityField::Province, |s| province_summary(s.province));
        registry.insert(MunicipalityField::District, |s| {
            district_summary(&DistrictScope {
                province: s.province,
                district: s.district,
            })
        });
        registry.insert(MunicipalityField::WardCount, |s| {
            Value::from(s.municipality.ward_count())
        });
        registry.insert(MunicipalityField::TotalPopulation, |s| {
            Value::from(s.municipality.total_population())
        });
        registry.insert(MunicipalityField::TotalArea, |s| {
            Value::from(s.municipality.total_area())
        });
        registry.insert(MunicipalityField::Wards, |s| {
            Value::Array(
                s.municipality
                    .wards
                    .iter()
                    .map(|w| {
                        ward_summary(&WardScope {
                            province: s.province,
                            district: s.district,
                            municipality: s.municipality,
                            ward: w,
                        })
                    })
                    .collect(),
            )
        });
        registry
    });

static WARD_RESOLVERS: Lazy<FxHashMap<WardField, WardResolver>> = Lazy::new(|| {
    let mut registry: FxHashMap<WardField, WardResolver> = FxHashMap::default();
    registry.insert(WardField::WardNumber, |s| Value::from(s.ward.ward_number));
    registry.insert(WardField::Area, |s| opt_f64(s.ward.area_sq_km));
    registry.insert(WardField::Population, |s| opt_u64(s.ward.population));
    registry.insert(WardField::Location, |s| point_value(s.ward.location.as_ref()));
    registry.insert(WardField::OfficeLocation, |s| {
        opt_str(s.ward.office_location.as_deref())
    });
    registry.insert(WardField::OfficeLocationLocal, |s| {
        opt_str(s.ward.office_location_local.as_deref())
    });
    registry.insert(WardField::Municipality, |s| {
        municipality_summary(&MunicipalityScope {
            province: s.province,
            district: s.district,
            municipality: s.municipality,
        })
    });
    registry.insert(WardField::District, |s| {
        district_summary(&DistrictScope {
            province: s.province,
            district: s.district,
        })
    });
    registry.insert(WardField::Province, |s| province_summary(s.province));
    registry
});

/// Project a province over the requested field set.
///
/// Only requested fields are resolved; requesting zero fields yields an
/// empty projection.
pub fn project_province(province: &Province, fields: &FxHashSet<ProvinceField>) -> Projection {
    let mut projection = Projection::new();
    for field in ProvinceField::ALL {
        if fields.contains(field)
            && let Some(resolver) = PROVINCE_RESOLVERS.get(field)
        {
            projection.insert(field.key(), resolver(province));
        }
    }
    projection
}

/// Project a district (viewed within its province) over the requested
/// field set.
pub fn project_district(scope: &DistrictScope, fields: &FxHashSet<DistrictField>) -> Projection {
    let mut projection = Projection::new();
    for field in DistrictField::ALL {
        if fields.contains(field)
            && let Some(resolver) = DISTRICT_RESOLVERS.get(field)
        {
            projection.insert(field.key(), resolver(scope));
        }
    }
    projection
}

/// Project a municipality (viewed within its ancestors) over the requested
/// field set.
pub fn project_municipality(
    scope: &MunicipalityScope,
    fields: &FxHashSet<MunicipalityField>,
) -> Projection {
    let mut projection = Projection::new();
    for field in MunicipalityField::ALL {
        if fields.contains(field)
            && let Some(resolver) = MUNICIPALITY_RESOLVERS.get(field)
        {
            projection.insert(field.key(), resolver(scope));
        }
    }
    projection
}

/// Project a ward (viewed within its full ancestor chain) over the
/// requested field set.
pub fn project_ward(scope: &WardScope, fields: &FxHashSet<WardField>) -> Projection {
    let mut projection = Projection::new();
    for field in WardField::ALL {
        if fields.contains(field)
            && let Some(resolver) = WARD_RESOLVERS.get(field)
        {
            projection.insert(field.key(), resolver(scope));
        }
    }
    projection
}

#[cfg(test)]
mod tests {
    use super::*;
    use georegistry_types::{District, Municipality, MunicipalityType, Ward};

    fn sample_province() -> Province {
        Province::new("P1", "Koshi")
            .with_name_local("कोशी")
            .with_population(4_961_412)
            .with_district(
                District::new("D1", "Morang").with_population(1_148_156).with_municipality(
                    Municipality::new("M1", "Biratnagar", MunicipalityType::Metropolitan, 19)
                        .with_location(26.4525, 87.2718)
                        .with_ward(Ward::new(1).with_population(10_000))
                        .with_ward(Ward::new(2).with_population(12_000)),
                ),
            )
    }

    #[test]
    fn test_projection_only_contains_requested_fields() {
        let province = sample_province();
        let fields = field_set(&[ProvinceField::Code, ProvinceField::Population]);
        let projection = project_province(&province, &fields);

        let keys: Vec<&str> = projection.keys().collect();
        assert_eq!(keys, ["code", "population"]);
        assert!(!projection.contains_key("name"));
    }

    #[test]
    fn test_projection_empty_field_set_yields_empty_mapping() {
        let province = sample_province();
        let projection = project_province(&province, &FxHashSet::default());
        assert!(projection.is_empty());
    }

    #[test]
    fn test_projection_preserves_canonical_order() {
        let province = sample_province();
        // Request in scrambled order; output follows ALL order.
        let fields = field_set(&[
            ProvinceField::Population,
            ProvinceField::Code,
            ProvinceField::Name,
        ]);
        let projection = project_province(&province, &fields);
        let keys: Vec<&str> = projection.keys().collect();
        assert_eq!(keys, ["code", "name", "population"]);
    }

    #[test]
    fn test_aggregate_over_zero_children_is_zero() {
        let province = Province::new("P9", "Empty");
        let fields = field_set(&[ProvinceField::TotalPopulation, ProvinceField::WardCount]);
        let projection = project_province(&province, &fields);

        assert_eq!(projection.get("total_population"), Some(&Value::from(0u64)));
        assert_eq!(projection.get("ward_count"), Some(&Value::from(0usize)));
    }

    #[test]
    fn test_aggregates_computed_from_live_children() {
        let province = sample_province();
        let fields = field_set(&[
            ProvinceField::DistrictCount,
            ProvinceField::MunicipalityCount,
            ProvinceField::WardCount,
            ProvinceField::TotalPopulation,
        ]);
        let projection = project_province(&province, &fields);

        assert_eq!(projection.get("district_count"), Some(&Value::from(1usize)));
        assert_eq!(
            projection.get("municipality_count"),
            Some(&Value::from(1usize))
        );
        assert_eq!(projection.get("ward_count"), Some(&Value::from(2usize)));
        assert_eq!(
            projection.get("total_population"),
            Some(&Value::from(1_148_156u64))
        );
    }

    #[test]
    fn test_nested_summary_uses_fixed_subset() {
        let province = sample_province();
        let fields = field_set(&[ProvinceField::Districts]);
        let projection = project_province(&province, &fields);

        let districts = projection.get("districts").unwrap().as_array().unwrap();
        assert_eq!(districts.len(), 1);
        let summary = districts[0].as_object().unwrap();
        assert!(summary.contains_key("code"));
        assert!(summary.contains_key("name"));
        // Summaries never expand children of their own.
        assert!(!summary.contains_key("municipalities"));
        assert!(!summary.contains_key("population"));
    }

    #[test]
    fn test_ward_projection_with_parent_summary() {
        let province = sample_province();
        let district = &province.districts[0];
        let municipality = &district.municipalities[0];
        let scope = WardScope {
            province: &province,
            district,
            municipality,
            ward: &municipality.wards[0],
        };

        let fields = field_set(&[WardField::WardNumber, WardField::Municipality]);
        let projection = project_ward(&scope, &fields);

        assert_eq!(projection.get("ward_number"), Some(&Value::from(1u32)));
        let parent = projection.get("municipality").unwrap().as_object().unwrap();
        assert_eq!(parent.get("code"), Some(&Value::from("M1")));
        assert_eq!(parent.get("type"), Some(&Value::from("metropolitan")));
        // Parent summary does not recurse back into wards.
        assert!(!parent.contains_key("wards"));
    }

    #[test]
    fn test_missing_scalar_projects_as_null() {
        let province = Province::new("P1", "Koshi");
        let fields = field_set(&[ProvinceField::Headquarter]);
        let projection = project_province(&province, &fields);
        assert_eq!(projection.get("headquarter"), Some(&Value::Null));
    }

    #[test]
    fn test_geometry_projects_as_geojson() {
        use geo::polygon;

        let boundary = polygon![
            (x: 85.0, y: 27.0),
            (x: 86.0, y: 27.0),
            (x: 86.0, y: 28.0),
            (x: 85.0, y: 28.0),
            (x: 85.0, y: 27.0),
        ];
        let province = Province::new("P1", "Koshi").with_geometry(boundary);
        let fields = field_set(&[ProvinceField::Geometry]);
        let projection = project_province(&province, &fields);

        let geometry = projection.get("geometry").unwrap().as_object().unwrap();
        assert_eq!(geometry.get("type"), Some(&Value::from("Polygon")));
        assert!(geometry.contains_key("coordinates"));
    }

    #[test]
    fn test_projection_serializes_in_order() {
        let province = sample_province();
        let fields = field_set(&[ProvinceField::Population, ProvinceField::Code]);
        let projection = project_province(&province, &fields);

        let json = serde_json::to_string(&projection).unwrap();
        let code_pos = json.find("\"code\"").unwrap();
        let population_pos = json.find("\"population\"").unwrap();
        assert!(code_pos < population_pos);
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!(
            "total_population".parse::<ProvinceField>().unwrap(),
            ProvinceField::TotalPopulation
        );
        assert_eq!("type".parse::<MunicipalityField>().unwrap(), MunicipalityField::Type);

        let err = "color".parse::<WardField>().unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnknownField { entity: "ward", .. }
        ));
    }
}
