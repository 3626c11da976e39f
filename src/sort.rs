//! Sort resolution and result ordering.
//!
//! A requested [`SortField`] is resolved into a short chain of concrete
//! [`SortKey`]s. The chain always ends in the candidate's identity, so every
//! ordering is total and deterministic. The `Distance` pseudo-field is only
//! meaningful with a center point; without one it resolves to the identity
//! fallback instead of an error, by design.

use std::cmp::Ordering;
use std::str::FromStr;

use geo::Point;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::RegistryError;
use crate::scope::{Candidate, RangeField};
use crate::spatial::distance_between;

/// Direction of the primary sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(RegistryError::InvalidInput(format!(
                "Sort direction must be 'asc' or 'desc', got: {}",
                s
            ))),
        }
    }
}

/// Sortable fields a caller may request.
///
/// `Distance` is a pseudo-field: it orders by great-circle distance from the
/// criteria's center point and silently falls back to identity order when no
/// center point was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Code,
    Name,
    Population,
    Area,
    Distance,
}

impl FromStr for SortField {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "code" => Ok(SortField::Code),
            "name" => Ok(SortField::Name),
            "population" => Ok(SortField::Population),
            "area" => Ok(SortField::Area),
            "distance" => Ok(SortField::Distance),
            _ => Err(RegistryError::UnknownSortField(s.to_string())),
        }
    }
}

/// A concrete ordering instruction over candidate attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Code,
    Name,
    Population,
    Area,
    /// Great-circle distance from the given center, ascending = nearest.
    Distance(Point),
    /// Stable identity tiebreaker, always ascending.
    Identity,
}

/// Resolve a requested sort field into a key chain.
///
/// The identity key is always appended, so equal primary values (and the
/// degenerate `Distance`-without-center case) still order deterministically.
///
/// # Examples
///
/// ```rust
/// use georegistry::sort::{resolve, SortField, SortKey};
///
/// let keys = resolve(SortField::Distance, None);
/// assert_eq!(keys.as_slice(), &[SortKey::Identity]);
/// ```
pub fn resolve(field: SortField, center: Option<Point>) -> SmallVec<[SortKey; 2]> {
    let mut keys: SmallVec<[SortKey; 2]> = SmallVec::new();

    match field {
        SortField::Code => keys.push(SortKey::Code),
        SortField::Name => keys.push(SortKey::Name),
        SortField::Population => keys.push(SortKey::Population),
        SortField::Area => keys.push(SortKey::Area),
        SortField::Distance => {
            if let Some(center) = center {
                keys.push(SortKey::Distance(center));
            }
            // No center point: identity fallback only.
        }
    }

    keys.push(SortKey::Identity);
    keys
}

enum SortValue {
    Text(String),
    Number(f64),
    Missing,
}

fn sort_value<C: Candidate>(candidate: &C, key: &SortKey) -> SortValue {
    match key {
        SortKey::Code | SortKey::Identity => SortValue::Text(candidate.identity()),
        SortKey::Name => candidate
            .display_name()
            .map(|name| SortValue::Text(name.to_lowercase()))
            .unwrap_or(SortValue::Missing),
        SortKey::Population => candidate
            .numeric(RangeField::Population)
            .map(SortValue::Number)
            .unwrap_or(SortValue::Missing),
        SortKey::Area => candidate
            .numeric(RangeField::Area)
            .map(SortValue::Number)
            .unwrap_or(SortValue::Missing),
        SortKey::Distance(center) => candidate
            .location()
            .map(|point| SortValue::Number(distance_between(&point, center)))
            .unwrap_or(SortValue::Missing),
    }
}

/// Missing values sort last regardless of direction.
fn compare_values(a: &SortValue, b: &SortValue, direction: SortDirection) -> Ordering {
    let apply = |ord: Ordering| match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    };

    match (a, b) {
        (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
        (SortValue::Missing, _) => Ordering::Greater,
        (_, SortValue::Missing) => Ordering::Less,
        (SortValue::Text(x), SortValue::Text(y)) => apply(x.cmp(y)),
        (SortValue::Number(x), SortValue::Number(y)) => apply(x.total_cmp(y)),
        // Key positions are homogeneous; mixed comparisons cannot happen.
        _ => Ordering::Equal,
    }
}

/// Order candidates by the resolved key chain.
///
/// The requested direction applies to every key except the identity
/// tiebreaker, which stays ascending so pagination remains stable.
pub fn order_candidates<C: Candidate>(
    candidates: Vec<C>,
    keys: &[SortKey],
    direction: SortDirection,
) -> Vec<C> {
    let mut decorated: Vec<(SmallVec<[SortValue; 2]>, C)> = candidates
        .into_iter()
        .map(|candidate| {
            let values = keys.iter().map(|key| sort_value(&candidate, key)).collect();
            (values, candidate)
        })
        .collect();

    decorated.sort_by(|a, b| {
        for (i, key) in keys.iter().enumerate() {
            let key_direction = if matches!(key, SortKey::Identity) {
                SortDirection::Asc
            } else {
                direction
            };
            let ord = compare_values(&a.0[i], &b.0[i], key_direction);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });

    decorated.into_iter().map(|(_, candidate)| candidate).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use georegistry_types::Province;

    #[test]
    fn test_sort_field_parsing() {
        assert_eq!("distance".parse::<SortField>().unwrap(), SortField::Distance);
        assert_eq!("Population".parse::<SortField>().unwrap(), SortField::Population);

        let err = "altitude".parse::<SortField>().unwrap_err();
        assert!(matches!(err, RegistryError::UnknownSortField(_)));
    }

    #[test]
    fn test_sort_direction_parsing() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("up".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_resolve_distance_without_center_falls_back() {
        let keys = resolve(SortField::Distance, None);
        assert_eq!(keys.as_slice(), &[SortKey::Identity]);
    }

    #[test]
    fn test_resolve_distance_with_center() {
        let center = Point::new(85.3240, 27.7172);
        let keys = resolve(SortField::Distance, Some(center));
        assert_eq!(keys.len(), 2);
        assert!(matches!(keys[0], SortKey::Distance(_)));
        assert_eq!(keys[1], SortKey::Identity);
    }

    #[test]
    fn test_order_by_population_desc() {
        let provinces = vec![
            Province::new("P1", "Koshi").with_population(100),
            Province::new("P2", "Madhesh").with_population(300),
            Province::new("P3", "Bagmati").with_population(200),
        ];

        let keys = resolve(SortField::Population, None);
        let ordered = order_candidates(provinces, &keys, SortDirection::Desc);
        let codes: Vec<&str> = ordered.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, ["P2", "P3", "P1"]);
    }

    #[test]
    fn test_missing_values_sort_last_in_both_directions() {
        let provinces = vec![
            Province::new("P1", "Koshi"),
            Province::new("P2", "Madhesh").with_population(300),
        ];

        let keys = resolve(SortField::Population, None);
        let asc = order_candidates(provinces.clone(), &keys, SortDirection::Asc);
        assert_eq!(asc[1].code, "P1");

        let desc = order_candidates(provinces, &keys, SortDirection::Desc);
        assert_eq!(desc[1].code, "P1");
    }

    #[test]
    fn test_identity_tiebreak_is_stable() {
        let provinces = vec![
            Province::new("P2", "Same").with_population(100),
            Province::new("P1", "Same").with_population(100),
        ];

        let keys = resolve(SortField::Population, None);
        let ordered = order_candidates(provinces, &keys, SortDirection::Asc);
        let codes: Vec<&str> = ordered.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, ["P1", "P2"]);
    }
}
