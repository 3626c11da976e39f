//! Predicate compilation and evaluation.
//!
//! Criteria are compiled once into a [`Predicate`] tree, then evaluated
//! against every candidate of a search. Only the filters actually present in
//! the criteria contribute fragments; an all-default criteria compiles to
//! [`Predicate::All`]. Conjunction is the only combinator the criteria
//! surface can express, so the tree stays a flat `And` of fragments.

use geo::Point;

use georegistry_types::MunicipalityType;

use crate::criteria::{
    DistrictCriteria, GeoFilter, MunicipalityCriteria, ProvinceCriteria, WardCriteria,
};
use crate::scope::{Candidate, HierarchyLevel, RangeField};
use crate::spatial::{bounding_box_around, distance_between, GeoBounds};

/// A compiled filter over search candidates.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every candidate.
    All,
    /// Matches when every child matches.
    And(Vec<Predicate>),
    /// Case-insensitive substring match over the candidate's searchable
    /// text. The stored term is already lowercased.
    Term(String),
    /// Case-insensitive exact match on the candidate's own code.
    Code(String),
    /// Case-insensitive exact match on the ancestor code at a level.
    /// Candidates without that ancestor never match.
    Ancestor(HierarchyLevel, String),
    /// Inclusive numeric range. Candidates missing the attribute never
    /// match.
    Range {
        field: RangeField,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Membership in a set of municipality classifications.
    TypeIn(Vec<MunicipalityType>),
    /// Proximity filter: bounding-box pre-check, then the exact
    /// great-circle distance. Candidates without a location never match.
    Within {
        bounds: GeoBounds,
        center: Point,
        radius_km: f64,
    },
}

impl Predicate {
    /// Evaluate the predicate against a candidate.
    pub fn matches<C: Candidate>(&self, candidate: &C) -> bool {
        match self {
            Predicate::All => true,
            Predicate::And(children) => children.iter().all(|child| child.matches(candidate)),
            Predicate::Term(term) => candidate
                .searchable_text()
                .iter()
                .any(|text| text.to_lowercase().contains(term)),
            Predicate::Code(code) => candidate
                .code()
                .is_some_and(|c| c.eq_ignore_ascii_case(code)),
            Predicate::Ancestor(level, code) => candidate
                .ancestor_code(*level)
                .is_some_and(|c| c.eq_ignore_ascii_case(code)),
            Predicate::Range { field, min, max } => match candidate.numeric(*field) {
                Some(value) => {
                    min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
                }
                None => false,
            },
            Predicate::TypeIn(types) => candidate
                .municipality_type()
                .is_some_and(|t| types.contains(&t)),
            Predicate::Within {
                bounds,
                center,
                radius_km,
            } => match candidate.location() {
                Some(point) => {
                    bounds.contains(&point)
                        && distance_between(&point, center) <= radius_km * 1000.0
                }
                None => false,
            },
        }
    }
}

fn fold(fragments: Vec<Predicate>) -> Predicate {
    let mut fragments = fragments;
    match fragments.len() {
        0 => Predicate::All,
        1 => fragments.remove(0),
        _ => Predicate::And(fragments),
    }
}

fn term_fragment(term: &Option<String>) -> Option<Predicate> {
    term.as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| Predicate::Term(t.to_lowercase()))
}

fn code_fragment(code: &Option<String>) -> Option<Predicate> {
    code.clone().map(Predicate::Code)
}

fn ancestor_fragment(level: HierarchyLevel, code: &Option<String>) -> Option<Predicate> {
    code.clone().map(|c| Predicate::Ancestor(level, c))
}

fn range_fragment(field: RangeField, min: Option<f64>, max: Option<f64>) -> Option<Predicate> {
    if min.is_none() && max.is_none() {
        None
    } else {
        Some(Predicate::Range { field, min, max })
    }
}

fn geo_fragment(geo: &Option<GeoFilter>) -> Option<Predicate> {
    geo.map(|filter| {
        let center = filter.center();
        Predicate::Within {
            bounds: bounding_box_around(&center, filter.radius_km),
            center,
            radius_km: filter.radius_km,
        }
    })
}

/// Compile province criteria into a predicate.
///
/// # Examples
///
/// ```rust
/// use georegistry::predicate::{compile_province, Predicate};
/// use georegistry::ProvinceCriteria;
///
/// let predicate = compile_province(&ProvinceCriteria::default());
/// assert_eq!(predicate, Predicate::All);
/// ```
pub fn compile_province(criteria: &ProvinceCriteria) -> Predicate {
    let fragments: Vec<Predicate> = [
        term_fragment(&criteria.term),
        code_fragment(&criteria.code),
        range_fragment(
            RangeField::Population,
            criteria.min_population.map(|v| v as f64),
            criteria.max_population.map(|v| v as f64),
        ),
        range_fragment(RangeField::Area, criteria.min_area, criteria.max_area),
    ]
    .into_iter()
    .flatten()
    .collect();

    fold(fragments)
}

/// Compile district criteria into a predicate.
pub fn compile_district(criteria: &DistrictCriteria) -> Predicate {
    let fragments: Vec<Predicate> = [
        term_fragment(&criteria.term),
        code_fragment(&criteria.code),
        ancestor_fragment(HierarchyLevel::Province, &criteria.province_code),
        range_fragment(
            RangeField::Population,
            criteria.min_population.map(|v| v as f64),
            criteria.max_population.map(|v| v as f64),
        ),
        range_fragment(RangeField::Area, criteria.min_area, criteria.max_area),
    ]
    .into_iter()
    .flatten()
    .collect();

    fold(fragments)
}

/// Compile municipality criteria into a predicate.
pub fn compile_municipality(criteria: &MunicipalityCriteria) -> Predicate {
    let types = if criteria.types.is_empty() {
        None
    } else {
        Some(Predicate::TypeIn(criteria.types.clone()))
    };

    let fragments: Vec<Predicate> = [
        term_fragment(&criteria.term),
        code_fragment(&criteria.code),
        ancestor_fragment(HierarchyLevel::Province, &criteria.province_code),
        ancestor_fragment(HierarchyLevel::District, &criteria.district_code),
        types,
        range_fragment(
            RangeField::Population,
            criteria.min_population.map(|v| v as f64),
            criteria.max_population.map(|v| v as f64),
        ),
        range_fragment(RangeField::Area, criteria.min_area, criteria.max_area),
        range_fragment(
            RangeField::TotalWards,
            criteria.min_total_wards.map(|v| v as f64),
            criteria.max_total_wards.map(|v| v as f64),
        ),
        geo_fragment(&criteria.geo),
    ]
    .into_iter()
    .flatten()
    .collect();

    fold(fragments)
}

/// Compile ward criteria into a predicate.
pub fn compile_ward(criteria: &WardCriteria) -> Predicate {
    let fragments: Vec<Predicate> = [
        term_fragment(&criteria.term),
        ancestor_fragment(HierarchyLevel::Province, &criteria.province_code),
        ancestor_fragment(HierarchyLevel::District, &criteria.district_code),
        ancestor_fragment(HierarchyLevel::Municipality, &criteria.municipality_code),
        range_fragment(
            RangeField::WardNumber,
            criteria.min_ward_number.map(|v| v as f64),
            criteria.max_ward_number.map(|v| v as f64),
        ),
        range_fragment(
            RangeField::Population,
            criteria.min_population.map(|v| v as f64),
            criteria.max_population.map(|v| v as f64),
        ),
        range_fragment(RangeField::Area, criteria.min_area, criteria.max_area),
        geo_fragment(&criteria.geo),
    ]
    .into_iter()
    .flatten()
    .collect();

    fold(fragments)
}
