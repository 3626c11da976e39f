use georegistry::{
    Config, DistrictCriteria, MunicipalityCriteria, MunicipalityField, ProvinceCriteria,
    Registry, SortDirection, SortField, WardCriteria, field_set,
};
use georegistry_types::{District, Municipality, MunicipalityType, Province, Ward};

/// A small slice of the Nepal hierarchy with real-ish coordinates.
fn seeded_registry() -> Registry {
    let _ = env_logger::builder().is_test(true).try_init();
    let registry = Registry::new();

    registry
        .add_province(
            Province::new("P1", "Koshi")
                .with_name_local("कोशी")
                .with_headquarter("Biratnagar")
                .with_population(4_961_412)
                .with_area(25_905.0)
                .with_district(
                    District::new("MRG", "Morang")
                        .with_population(1_147_186)
                        .with_municipality(
                            Municipality::new(
                                "BRT",
                                "Biratnagar",
                                MunicipalityType::Metropolitan,
                                19,
                            )
                            .with_population(244_750)
                            .with_area(77.0)
                            .with_location(26.4525, 87.2718)
                            .with_ward(
                                Ward::new(1)
                                    .with_office_location("Rani")
                                    .with_location(26.4341, 87.2829),
                            )
                            .with_ward(Ward::new(2).with_office_location("Tintoliya")),
                        )
                        .with_municipality(
                            Municipality::new(
                                "LTG",
                                "Letang",
                                MunicipalityType::Municipality,
                                9,
                            )
                            .with_population(33_322)
                            .with_location(26.7330, 87.3680),
                        ),
                ),
        )
        .unwrap();

    registry
        .add_province(
            Province::new("P3", "Bagmati")
                .with_headquarter("Hetauda")
                .with_population(6_116_866)
                .with_district(
                    District::new("KTM", "Kathmandu")
                        .with_population(2_017_532)
                        .with_municipality(
                            Municipality::new(
                                "KTM-M",
                                "Kathmandu",
                                MunicipalityType::Metropolitan,
                                32,
                            )
                            .with_name_local("काठमाडौं")
                            .with_population(845_767)
                            .with_location(27.7172, 85.3240)
                            .with_ward(
                                Ward::new(1)
                                    .with_office_location("Naxal")
                                    .with_location(27.7154, 85.3123),
                            ),
                        )
                        .with_municipality(
                            Municipality::new(
                                "KRT",
                                "Kirtipur",
                                MunicipalityType::Municipality,
                                10,
                            )
                            .with_population(65_602)
                            .with_location(27.6667, 85.2833),
                        ),
                )
                .with_district(
                    District::new("LLT", "Lalitpur").with_municipality(
                        Municipality::new(
                            "LLT-M",
                            "Lalitpur",
                            MunicipalityType::Metropolitan,
                            29,
                        )
                        .with_population(294_098)
                        .with_location(27.6588, 85.3247),
                    ),
                ),
        )
        .unwrap();

    registry
}

#[test]
fn test_proximity_search_around_kathmandu() {
    let registry = seeded_registry();

    // Kathmandu city center, 5 km: only the metropolitan city itself.
    let tight = MunicipalityCriteria::default().with_geo(27.7172, 85.3240, 5.0);
    let page = registry.search_municipalities(&tight).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].get("code").unwrap(), "KTM-M");

    // 10 km pulls in Kirtipur and Lalitpur; Biratnagar stays ~240 km away.
    let wider = MunicipalityCriteria::default().with_geo(27.7172, 85.3240, 10.0);
    let page = registry.search_municipalities(&wider).unwrap();
    assert_eq!(page.total, 3);
}

#[test]
fn test_proximity_with_distance_sort() {
    let registry = seeded_registry();

    let criteria = MunicipalityCriteria::default()
        .with_geo(27.7172, 85.3240, 10.0)
        .with_sort(SortField::Distance, SortDirection::Asc);
    let page = registry.search_municipalities(&criteria).unwrap();

    let codes: Vec<&str> = page
        .items
        .iter()
        .map(|item| item.get("code").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(codes[0], "KTM-M");
    // Lalitpur's center is nearer to the query point than Kirtipur's.
    assert_eq!(codes, ["KTM-M", "LLT-M", "KRT"]);
}

#[test]
fn test_distance_sort_without_center_uses_identity_order() {
    let registry = seeded_registry();

    let criteria =
        MunicipalityCriteria::default().with_sort(SortField::Distance, SortDirection::Asc);
    let page = registry.search_municipalities(&criteria).unwrap();

    let codes: Vec<&str> = page
        .items
        .iter()
        .map(|item| item.get("code").unwrap().as_str().unwrap())
        .collect();
    // Identity is the code path, so provinces group together in code order.
    assert_eq!(codes, ["BRT", "LTG", "KRT", "KTM-M", "LLT-M"]);
}

#[test]
fn test_term_search_matches_localized_names() {
    let registry = seeded_registry();

    let criteria = MunicipalityCriteria::default().with_term("काठमाडौं");
    let page = registry.search_municipalities(&criteria).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].get("code").unwrap(), "KTM-M");
}

#[test]
fn test_term_search_on_province_headquarter() {
    let registry = seeded_registry();

    let criteria = ProvinceCriteria::default().with_term("hetauda");
    let page = registry.search_provinces(&criteria).unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].get("code").unwrap(), "P3");
}

#[test]
fn test_type_and_ancestor_filters_combine() {
    let registry = seeded_registry();

    let criteria = MunicipalityCriteria::default()
        .with_province_code("P3")
        .with_types(vec![MunicipalityType::Metropolitan]);
    let page = registry.search_municipalities(&criteria).unwrap();

    assert_eq!(page.total, 2);
    let codes: Vec<&str> = page
        .items
        .iter()
        .map(|item| item.get("code").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(codes, ["KTM-M", "LLT-M"]);
}

#[test]
fn test_district_search_scoped_to_province() {
    let registry = seeded_registry();

    let criteria = DistrictCriteria::default().with_province_code("p3");
    let page = registry.search_districts(&criteria).unwrap();
    assert_eq!(page.total, 2);

    let mismatched = DistrictCriteria::default()
        .with_code("KTM")
        .with_province_code("P1");
    let empty = registry.search_districts(&mismatched).unwrap();
    assert_eq!(empty.total, 0);
}

#[test]
fn test_ward_search_with_geo_and_ancestors() {
    let registry = seeded_registry();

    let criteria = WardCriteria::default()
        .with_province_code("P3")
        .with_geo(27.7172, 85.3240, 5.0);
    let page = registry.search_wards(&criteria).unwrap();

    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].get("ward_number").unwrap(), 1);
    assert_eq!(page.items[0].get("office_location").unwrap(), "Naxal");
}

#[test]
fn test_population_range_filter() {
    let registry = seeded_registry();

    let criteria = MunicipalityCriteria::default()
        .with_population_range(Some(100_000), Some(500_000));
    let page = registry.search_municipalities(&criteria).unwrap();

    let codes: Vec<&str> = page
        .items
        .iter()
        .map(|item| item.get("code").unwrap().as_str().unwrap())
        .collect();
    assert_eq!(codes, ["BRT", "LLT-M"]);
}

#[test]
fn test_projection_returns_only_requested_fields() {
    let registry = seeded_registry();

    let criteria = MunicipalityCriteria::default()
        .with_code("KTM-M")
        .with_fields(field_set(&[
            MunicipalityField::Name,
            MunicipalityField::Population,
            MunicipalityField::District,
        ]));
    let page = registry.search_municipalities(&criteria).unwrap();

    let item = &page.items[0];
    assert_eq!(item.len(), 3);
    assert_eq!(item.get("name").unwrap(), "Kathmandu");
    assert_eq!(item.get("population").unwrap(), 845_767u64);
    assert!(item.get("code").is_none());

    // Parent summary carries the fixed subset only.
    let district = item.get("district").unwrap();
    assert_eq!(district.get("code").unwrap(), "KTM");
    assert!(district.get("municipalities").is_none());
}

#[test]
fn test_search_page_serializes_to_json() {
    let registry = seeded_registry();

    let page = registry
        .search_provinces(&ProvinceCriteria::default().with_page(0, 1))
        .unwrap();
    let json = serde_json::to_value(&page).unwrap();

    assert_eq!(json["total"], 2);
    assert_eq!(json["page"], 0);
    assert_eq!(json["page_size"], 1);
    assert_eq!(json["items"][0]["code"], "P1");
}

#[test]
fn test_criteria_round_trips_through_json() {
    let raw = r#"{
        "province_code": "P3",
        "geo": { "latitude": 27.7172, "longitude": 85.3240, "radius_km": 5.0 },
        "sort_by": "distance",
        "page_size": 10
    }"#;
    let criteria: MunicipalityCriteria = serde_json::from_str(raw).unwrap();

    let registry = seeded_registry();
    let page = registry.search_municipalities(&criteria).unwrap();
    assert_eq!(page.total, 1);
}

#[test]
fn test_custom_config_limits_apply() {
    let config = Config::default()
        .with_max_radius_km(3.0)
        .with_default_page_size(2);
    let registry = Registry::with_config(config).unwrap();

    registry
        .add_province(Province::new("P1", "Koshi"))
        .unwrap();
    registry
        .add_province(Province::new("P2", "Madhesh"))
        .unwrap();
    registry
        .add_province(Province::new("P3", "Bagmati"))
        .unwrap();

    let page = registry.search_provinces(&ProvinceCriteria::default()).unwrap();
    assert_eq!(page.items.len(), 2);
    assert!(page.has_more());

    let too_wide = MunicipalityCriteria::default().with_geo(27.7172, 85.3240, 5.0);
    assert!(registry.search_municipalities(&too_wide).is_err());
}
