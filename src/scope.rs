//! Scoped views pairing an entity with its ancestors.
//!
//! Entities own their children and carry no back-pointers, so anything that
//! filters or projects across hierarchy levels works on a scope: a borrowed
//! view of one entity plus the ancestors it was reached through. The
//! [`Candidate`] trait exposes the attribute accessors that predicates and
//! sort keys are written against, keeping them independent of the concrete
//! level.

use geo::Point;
use smallvec::SmallVec;

use georegistry_types::{District, Municipality, MunicipalityType, Province, Ward};

/// Hierarchy levels an ancestor-code filter may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyLevel {
    Province,
    District,
    Municipality,
}

/// Numeric attributes a range filter may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeField {
    Population,
    Area,
    /// Declared ward count of a municipality.
    TotalWards,
    /// Ward number of a ward.
    WardNumber,
}

/// Attribute accessors over a search candidate.
///
/// Predicate fragments and sort keys read candidates exclusively through
/// this trait; each method returns `None` (or empty) where the level has no
/// such attribute, and fragments targeting an absent attribute simply never
/// match.
pub trait Candidate {
    /// Text fields the free-text term is matched against.
    fn searchable_text(&self) -> SmallVec<[&str; 3]>;

    /// The entity's own code, if the level has one.
    fn code(&self) -> Option<&str>;

    /// Code of the ancestor at the given level.
    fn ancestor_code(&self, level: HierarchyLevel) -> Option<&str>;

    /// Numeric attribute value, if recorded.
    fn numeric(&self, field: RangeField) -> Option<f64>;

    fn municipality_type(&self) -> Option<MunicipalityType>;

    /// Point location used by geographic filtering and distance sorting.
    fn location(&self) -> Option<Point>;

    /// Human-readable name used by name sorting.
    fn display_name(&self) -> Option<&str>;

    /// Stable, unique identity used as the deterministic sort fallback.
    /// Uppercased code path; ward numbers are zero-padded so lexicographic
    /// order equals numeric order.
    fn identity(&self) -> String;
}

impl<C: Candidate> Candidate for &C {
    fn searchable_text(&self) -> SmallVec<[&str; 3]> {
        (**self).searchable_text()
    }

    fn code(&self) -> Option<&str> {
        (**self).code()
    }

    fn ancestor_code(&self, level: HierarchyLevel) -> Option<&str> {
        (**self).ancestor_code(level)
    }

    fn numeric(&self, field: RangeField) -> Option<f64> {
        (**self).numeric(field)
    }

    fn municipality_type(&self) -> Option<MunicipalityType> {
        (**self).municipality_type()
    }

    fn location(&self) -> Option<Point> {
        (**self).location()
    }

    fn display_name(&self) -> Option<&str> {
        (**self).display_name()
    }

    fn identity(&self) -> String {
        (**self).identity()
    }
}

impl Candidate for Province {
    fn searchable_text(&self) -> SmallVec<[&str; 3]> {
        let mut text: SmallVec<[&str; 3]> = SmallVec::new();
        text.push(self.name.as_str());
        if let Some(local) = &self.name_local {
            text.push(local.as_str());
        }
        if let Some(hq) = &self.headquarter {
            text.push(hq.as_str());
        }
        text
    }

    fn code(&self) -> Option<&str> {
        Some(&self.code)
    }

    fn ancestor_code(&self, _level: HierarchyLevel) -> Option<&str> {
        None
    }

    fn numeric(&self, field: RangeField) -> Option<f64> {
        match field {
            RangeField::Population => self.population.map(|p| p as f64),
            RangeField::Area => self.area_sq_km,
            RangeField::TotalWards | RangeField::WardNumber => None,
        }
    }

    fn municipality_type(&self) -> Option<MunicipalityType> {
        None
    }

    fn location(&self) -> Option<Point> {
        None
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn identity(&self) -> String {
        self.code.to_ascii_uppercase()
    }
}

/// A district viewed within its owning province.
#[derive(Debug, Clone, Copy)]
pub struct DistrictScope<'a> {
    pub province: &'a Province,
    pub district: &'a District,
}

impl Candidate for DistrictScope<'_> {
    fn searchable_text(&self) -> SmallVec<[&str; 3]> {
        let mut text: SmallVec<[&str; 3]> = SmallVec::new();
        text.push(self.district.name.as_str());
        if let Some(local) = &self.district.name_local {
            text.push(local.as_str());
        }
        if let Some(hq) = &self.district.headquarter {
            text.push(hq.as_str());
        }
        text
    }

    fn code(&self) -> Option<&str> {
        Some(&self.district.code)
    }

    fn ancestor_code(&self, level: HierarchyLevel) -> Option<&str> {
        match level {
            HierarchyLevel::Province => Some(&self.province.code),
            HierarchyLevel::District | HierarchyLevel::Municipality => None,
        }
    }

    fn numeric(&self, field: RangeField) -> Option<f64> {
        match field {
            RangeField::Population => self.district.population.map(|p| p as f64),
            RangeField::Area => self.district.area_sq_km,
            RangeField::TotalWards | RangeField::WardNumber => None,
        }
    }

    fn municipality_type(&self) -> Option<MunicipalityType> {
        None
    }

    fn location(&self) -> Option<Point> {
        None
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.district.name)
    }

    fn identity(&self) -> String {
        format!(
            "{}/{}",
            self.province.code.to_ascii_uppercase(),
            self.district.code.to_ascii_uppercase()
        )
    }
}

/// A municipality viewed within its owning district and province.
#[derive(Debug, Clone, Copy)]
pub struct MunicipalityScope<'a> {
    pub province: &'a Province,
    pub district: &'a District,
    pub municipality: &'a Municipality,
}

impl Candidate for MunicipalityScope<'_> {
    fn searchable_text(&self) -> SmallVec<[&str; 3]> {
        let mut text: SmallVec<[&str; 3]> = SmallVec::new();
        text.push(self.municipality.name.as_str());
        if let Some(local) = &self.municipality.name_local {
            text.push(local.as_str());
        }
        text
    }

    fn code(&self) -> Option<&str> {
        Some(&self.municipality.code)
    }

    fn ancestor_code(&self, level: HierarchyLevel) -> Option<&str> {
        match level {
            HierarchyLevel::Province => Some(&self.province.code),
            HierarchyLevel::District => Some(&self.district.code),
            HierarchyLevel::Municipality => None,
        }
    }

    fn numeric(&self, field: RangeField) -> Option<f64> {
        match field {
            RangeField::Population => self.municipality.population.map(|p| p as f64),
            RangeField::Area => self.municipality.area_sq_km,
            RangeField::TotalWards => Some(self.municipality.total_wards as f64),
            RangeField::WardNumber => None,
        }
    }

    fn municipality_type(&self) -> Option<MunicipalityType> {
        Some(self.municipality.municipality_type)
    }

    fn location(&self) -> Option<Point> {
        self.municipality.location
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.municipality.name)
    }

    fn identity(&self) -> String {
        format!(
            "{}/{}/{}",
            self.province.code.to_ascii_uppercase(),
            self.district.code.to_ascii_uppercase(),
            self.municipality.code.to_ascii_uppercase()
        )
    }
}

/// A ward viewed within its full ancestor chain.
#[derive(Debug, Clone, Copy)]
pub struct WardScope<'a> {
    pub province: &'a Province,
    pub district: &'a District,
    pub municipality: &'a Municipality,
    pub ward: &'a Ward,
}

impl Candidate for WardScope<'_> {
    fn searchable_text(&self) -> SmallVec<[&str; 3]> {
        let mut text: SmallVec<[&str; 3]> = SmallVec::new();
        if let Some(office) = &self.ward.office_location {
            text.push(office.as_str());
        }
        if let Some(local) = &self.ward.office_location_local {
            text.push(local.as_str());
        }
        text
    }

    fn code(&self) -> Option<&str> {
        None
    }

    fn ancestor_code(&self, level: HierarchyLevel) -> Option<&str> {
        match level {
            HierarchyLevel::Province => Some(&self.province.code),
            HierarchyLevel::District => Some(&self.district.code),
            HierarchyLevel::Municipality => Some(&self.municipality.code),
        }
    }

    fn numeric(&self, field: RangeField) -> Option<f64> {
        match field {
            RangeField::Population => self.ward.population.map(|p| p as f64),
            RangeField::Area => self.ward.area_sq_km,
            RangeField::WardNumber => Some(self.ward.ward_number as f64),
            RangeField::TotalWards => None,
        }
    }

    fn municipality_type(&self) -> Option<MunicipalityType> {
        None
    }

    fn location(&self) -> Option<Point> {
        self.ward.location
    }

    fn display_name(&self) -> Option<&str> {
        self.ward.office_location.as_deref()
    }

    fn identity(&self) -> String {
        format!(
            "{}/{}/{}/{:02}",
            self.province.code.to_ascii_uppercase(),
            self.district.code.to_ascii_uppercase(),
            self.municipality.code.to_ascii_uppercase(),
            self.ward.ward_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use georegistry_types::MunicipalityType;

    fn sample_tree() -> Province {
        Province::new("P1", "Koshi").with_district(
            District::new("D1", "Morang").with_municipality(
                Municipality::new("M1", "Biratnagar", MunicipalityType::Metropolitan, 19)
                    .with_location(26.4525, 87.2718)
                    .with_ward(Ward::new(7).with_office_location("Rani")),
            ),
        )
    }

    #[test]
    fn test_province_candidate_accessors() {
        let province = Province::new("P1", "Koshi")
            .with_name_local("कोशी")
            .with_headquarter("Biratnagar")
            .with_population(100);

        assert_eq!(province.searchable_text().len(), 3);
        assert_eq!(province.code(), Some("P1"));
        assert_eq!(province.ancestor_code(HierarchyLevel::Province), None);
        assert_eq!(province.numeric(RangeField::Population), Some(100.0));
        assert_eq!(province.numeric(RangeField::TotalWards), None);
        assert!(province.location().is_none());
        assert_eq!(province.identity(), "P1");
    }

    #[test]
    fn test_ward_scope_ancestors_and_identity() {
        let province = sample_tree();
        let district = &province.districts[0];
        let municipality = &district.municipalities[0];
        let scope = WardScope {
            province: &province,
            district,
            municipality,
            ward: &municipality.wards[0],
        };

        assert_eq!(scope.ancestor_code(HierarchyLevel::Province), Some("P1"));
        assert_eq!(scope.ancestor_code(HierarchyLevel::District), Some("D1"));
        assert_eq!(scope.ancestor_code(HierarchyLevel::Municipality), Some("M1"));
        assert_eq!(scope.numeric(RangeField::WardNumber), Some(7.0));
        assert_eq!(scope.identity(), "P1/D1/M1/07");
        assert_eq!(scope.display_name(), Some("Rani"));
    }

    #[test]
    fn test_municipality_scope_location_and_type() {
        let province = sample_tree();
        let district = &province.districts[0];
        let scope = MunicipalityScope {
            province: &province,
            district,
            municipality: &district.municipalities[0],
        };

        assert_eq!(
            scope.municipality_type(),
            Some(MunicipalityType::Metropolitan)
        );
        assert_eq!(scope.numeric(RangeField::TotalWards), Some(19.0));
        let location = scope.location().unwrap();
        assert_eq!(location.y(), 26.4525);
    }
}
