//! The registry: hierarchy storage and the search executor.
//!
//! [`Registry`] owns the province tree behind a read-write lock and runs the
//! full search pipeline against it: validate criteria, compile the
//! predicate, collect and filter candidates, order them, paginate, and
//! project the requested page. All reads work on shared references under the
//! read lock; projections clone only the fields they emit.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use georegistry_types::{District, Municipality, Province, Ward};

use crate::config::Config;
use crate::criteria::{
    DistrictCriteria, MunicipalityCriteria, ProvinceCriteria, WardCriteria,
};
use crate::error::{RegistryError, Result};
use crate::predicate::{self, Predicate};
use crate::projection::{
    self, field_set, DistrictField, MunicipalityField, Projection, ProvinceField, WardField,
};
use crate::scope::{Candidate, DistrictScope, MunicipalityScope, WardScope};
use crate::sort::{self, SortDirection, SortKey};
use crate::validation;

/// One page of search results.
#[derive(Debug, Serialize)]
pub struct SearchPage {
    /// Projected entities of the requested page, in sort order.
    pub items: Vec<Projection>,
    /// Total number of matches across all pages.
    pub total: usize,
    /// Zero-based page index that was served.
    pub page: usize,
    /// Effective page size.
    pub page_size: usize,
}

impl SearchPage {
    /// Whether more pages follow this one.
    pub fn has_more(&self) -> bool {
        (self.page + 1) * self.page_size < self.total
    }
}

struct RegistryInner {
    config: Config,
    /// Provinces keyed by uppercased code, so iteration order is stable.
    provinces: BTreeMap<String, Province>,
}

/// Thread-safe administrative hierarchy registry.
///
/// Cloning is cheap and shares the underlying store.
///
/// # Examples
///
/// ```rust
/// use georegistry::{Registry, ProvinceCriteria};
/// use georegistry_types::Province;
///
/// let registry = Registry::new();
/// registry.add_province(Province::new("P1", "Koshi"))?;
///
/// let page = registry.search_provinces(&ProvinceCriteria::default())?;
/// assert_eq!(page.total, 1);
/// # Ok::<(), georegistry::RegistryError>(())
/// ```
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a registry with the default configuration.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                config: Config::default(),
                provinces: BTreeMap::new(),
            })),
        }
    }

    /// Create a registry with a custom configuration.
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                config,
                provinces: BTreeMap::new(),
            })),
        })
    }

    /// The active configuration.
    pub fn config(&self) -> Config {
        self.inner.read().config.clone()
    }

    /// Insert a province, including any pre-attached subtree.
    ///
    /// The whole subtree is validated before anything is stored.
    pub fn add_province(&self, province: Province) -> Result<()> {
        validate_province_tree(&province)?;

        let mut inner = self.inner.write();
        let key = province.code.to_ascii_uppercase();
        if inner.provinces.contains_key(&key) {
            return Err(RegistryError::DuplicateCode(province.code));
        }

        log::debug!("adding province {} ({})", province.code, province.name);
        inner.provinces.insert(key, province);
        Ok(())
    }

    /// Attach a district to an existing province.
    pub fn add_district(&self, province_code: &str, district: District) -> Result<()> {
        validate_district_tree(&district)?;

        let mut inner = self.inner.write();
        let province = province_mut(&mut inner, province_code)?;
        if province.district(&district.code).is_some() {
            return Err(RegistryError::DuplicateCode(district.code));
        }

        log::debug!("adding district {} to {}", district.code, province.code);
        province.districts.push(district);
        Ok(())
    }

    /// Attach a municipality to an existing district.
    pub fn add_municipality(
        &self,
        province_code: &str,
        district_code: &str,
        municipality: Municipality,
    ) -> Result<()> {
        validate_municipality_tree(&municipality)?;

        let mut inner = self.inner.write();
        let province = province_mut(&mut inner, province_code)?;
        let district = district_mut(province, district_code)?;
        if district.municipality(&municipality.code).is_some() {
            return Err(RegistryError::DuplicateCode(municipality.code));
        }

        log::debug!(
            "adding municipality {} to {}/{}",
            municipality.code,
            province_code,
            district.code
        );
        district.municipalities.push(municipality);
        Ok(())
    }

    /// Attach a ward to an existing municipality.
    ///
    /// The ward number must be unique within the municipality and must not
    /// exceed its declared ward count.
    pub fn add_ward(
        &self,
        province_code: &str,
        district_code: &str,
        municipality_code: &str,
        ward: Ward,
    ) -> Result<()> {
        validate_ward(&ward)?;

        let mut inner = self.inner.write();
        let province = province_mut(&mut inner, province_code)?;
        let district = district_mut(province, district_code)?;
        let municipality = municipality_mut(district, municipality_code)?;

        if ward.ward_number > municipality.total_wards {
            return Err(RegistryError::InvalidInput(format!(
                "Ward number {} exceeds the declared ward count {} of {}",
                ward.ward_number, municipality.total_wards, municipality.code
            )));
        }
        if municipality.ward(ward.ward_number).is_some() {
            return Err(RegistryError::DuplicateCode(format!(
                "{}/{}",
                municipality.code, ward.ward_number
            )));
        }

        municipality.wards.push(ward);
        Ok(())
    }

    /// Look up a province by code, case-insensitively.
    pub fn province(&self, code: &str) -> Result<Province> {
        let inner = self.inner.read();
        inner
            .provinces
            .get(&code.to_ascii_uppercase())
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(format!("province '{}'", code)))
    }

    /// Number of stored provinces.
    pub fn province_count(&self) -> usize {
        self.inner.read().provinces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().provinces.is_empty()
    }

    /// Remove everything from the registry.
    pub fn clear(&self) {
        self.inner.write().provinces.clear();
    }

    /// Search provinces.
    pub fn search_provinces(&self, criteria: &ProvinceCriteria) -> Result<SearchPage> {
        let inner = self.inner.read();
        criteria.validate(&inner.config)?;

        let predicate = predicate::compile_province(criteria);
        let candidates: Vec<&Province> = inner
            .provinces
            .values()
            .filter(|province| predicate.matches(province))
            .collect();

        let keys = sort::resolve(criteria.sort_by, None);
        let fields = criteria
            .fields
            .clone()
            .unwrap_or_else(|| field_set(ProvinceField::DEFAULT));

        paginate(
            candidates,
            &keys,
            criteria.sort_direction,
            criteria.page,
            criteria.page_size.unwrap_or(inner.config.default_page_size),
            |province| projection::project_province(province, &fields),
        )
    }

    /// Search districts across all provinces.
    pub fn search_districts(&self, criteria: &DistrictCriteria) -> Result<SearchPage> {
        let inner = self.inner.read();
        criteria.validate(&inner.config)?;

        let predicate = predicate::compile_district(criteria);
        let candidates: Vec<DistrictScope> = inner
            .provinces
            .values()
            .flat_map(|province| {
                province
                    .districts
                    .iter()
                    .map(move |district| DistrictScope { province, district })
            })
            .filter(|scope| predicate.matches(scope))
            .collect();

        let keys = sort::resolve(criteria.sort_by, None);
        let fields = criteria
            .fields
            .clone()
            .unwrap_or_else(|| field_set(DistrictField::DEFAULT));

        paginate(
            candidates,
            &keys,
            criteria.sort_direction,
            criteria.page,
            criteria.page_size.unwrap_or(inner.config.default_page_size),
            |scope| projection::project_district(scope, &fields),
        )
    }

    /// Search municipalities across the whole hierarchy.
    pub fn search_municipalities(&self, criteria: &MunicipalityCriteria) -> Result<SearchPage> {
        let inner = self.inner.read();
        criteria.validate(&inner.config)?;

        let predicate = predicate::compile_municipality(criteria);
        log_geo_scan(&predicate);
        let candidates: Vec<MunicipalityScope> = inner
            .provinces
            .values()
            .flat_map(|province| {
                province.districts.iter().flat_map(move |district| {
                    district
                        .municipalities
                        .iter()
                        .map(move |municipality| MunicipalityScope {
                            province,
                            district,
                            municipality,
                        })
                })
            })
            .filter(|scope| predicate.matches(scope))
            .collect();

        let center = criteria.geo.map(|geo| geo.center());
        let keys = sort::resolve(criteria.sort_by, center);
        let fields = criteria
            .fields
            .clone()
            .unwrap_or_else(|| field_set(MunicipalityField::DEFAULT));

        paginate(
            candidates,
            &keys,
            criteria.sort_direction,
            criteria.page,
            criteria.page_size.unwrap_or(inner.config.default_page_size),
            |scope| projection::project_municipality(scope, &fields),
        )
    }

    /// Search wards across the whole hierarchy.
    pub fn search_wards(&self, criteria: &WardCriteria) -> Result<SearchPage> {
        let inner = self.inner.read();
        criteria.validate(&inner.config)?;

        let predicate = predicate::compile_ward(criteria);
        log_geo_scan(&predicate);
        let candidates: Vec<WardScope> = inner
            .provinces
            .values()
            .flat_map(|province| {
                province.districts.iter().flat_map(move |district| {
                    district.municipalities.iter().flat_map(move |municipality| {
                        municipality.wards.iter().map(move |ward| WardScope {
                            province,
                            district,
                            municipality,
                            ward,
                        })
                    })
                })
            })
            .filter(|scope| predicate.matches(scope))
            .collect();

        let center = criteria.geo.map(|geo| geo.center());
        let keys = sort::resolve(criteria.sort_by, center);
        let fields = criteria
            .fields
            .clone()
            .unwrap_or_else(|| field_set(WardField::DEFAULT));

        paginate(
            candidates,
            &keys,
            criteria.sort_direction,
            criteria.page,
            criteria.page_size.unwrap_or(inner.config.default_page_size),
            |scope| projection::project_ward(scope, &fields),
        )
    }
}

fn log_geo_scan(predicate: &Predicate) {
    let has_geo = match predicate {
        Predicate::Within { .. } => true,
        Predicate::And(children) => children
            .iter()
            .any(|child| matches!(child, Predicate::Within { .. })),
        _ => false,
    };
    if has_geo {
        log::debug!("running proximity scan with bounding-box pre-filter");
    }
}

fn province_mut<'a>(inner: &'a mut RegistryInner, code: &str) -> Result<&'a mut Province> {
    inner
        .provinces
        .get_mut(&code.to_ascii_uppercase())
        .ok_or_else(|| RegistryError::NotFound(format!("province '{}'", code)))
}

fn district_mut<'a>(province: &'a mut Province, code: &str) -> Result<&'a mut District> {
    province
        .district_mut(code)
        .ok_or_else(|| RegistryError::NotFound(format!("district '{}'", code)))
}

fn municipality_mut<'a>(district: &'a mut District, code: &str) -> Result<&'a mut Municipality> {
    district
        .municipality_mut(code)
        .ok_or_else(|| RegistryError::NotFound(format!("municipality '{}'", code)))
}

fn validate_ward(ward: &Ward) -> Result<()> {
    validation::validate_ward_number(ward.ward_number)?;
    if let Some(location) = &ward.location {
        validation::validate_geographic_point(location)?;
    }
    Ok(())
}

fn validate_municipality_tree(municipality: &Municipality) -> Result<()> {
    validation::validate_code(&municipality.code)?;
    validation::validate_total_wards(municipality.total_wards)?;
    if let Some(location) = &municipality.location {
        validation::validate_geographic_point(location)?;
    }

    for (i, ward) in municipality.wards.iter().enumerate() {
        validate_ward(ward)?;
        if ward.ward_number > municipality.total_wards {
            return Err(RegistryError::InvalidInput(format!(
                "Ward number {} exceeds the declared ward count {} of {}",
                ward.ward_number, municipality.total_wards, municipality.code
            )));
        }
        let duplicate = municipality.wards[..i]
            .iter()
            .any(|earlier| earlier.ward_number == ward.ward_number);
        if duplicate {
            return Err(RegistryError::DuplicateCode(format!(
                "{}/{}",
                municipality.code, ward.ward_number
            )));
        }
    }
    Ok(())
}

fn validate_district_tree(district: &District) -> Result<()> {
    validation::validate_code(&district.code)?;
    for (i, municipality) in district.municipalities.iter().enumerate() {
        validate_municipality_tree(municipality)?;
        let duplicate = district.municipalities[..i]
            .iter()
            .any(|earlier| earlier.code.eq_ignore_ascii_case(&municipality.code));
        if duplicate {
            return Err(RegistryError::DuplicateCode(municipality.code.clone()));
        }
    }
    Ok(())
}

fn validate_province_tree(province: &Province) -> Result<()> {
    validation::validate_code(&province.code)?;
    for (i, district) in province.districts.iter().enumerate() {
        validate_district_tree(district)?;
        let duplicate = province.districts[..i]
            .iter()
            .any(|earlier| earlier.code.eq_ignore_ascii_case(&district.code));
        if duplicate {
            return Err(RegistryError::DuplicateCode(district.code.clone()));
        }
    }
    Ok(())
}

fn paginate<C: Candidate>(
    candidates: Vec<C>,
    keys: &[SortKey],
    direction: SortDirection,
    page: usize,
    page_size: usize,
    project: impl Fn(&C) -> Projection,
) -> Result<SearchPage> {
    let total = candidates.len();
    let ordered = sort::order_candidates(candidates, keys, direction);

    let start = page.saturating_mul(page_size);
    let items: Vec<Projection> = ordered
        .iter()
        .skip(start)
        .take(page_size)
        .map(project)
        .collect();

    log::debug!(
        "search matched {} candidates, serving page {} with {} items",
        total,
        page,
        items.len()
    );

    Ok(SearchPage {
        items,
        total,
        page,
        page_size,
    })
}
