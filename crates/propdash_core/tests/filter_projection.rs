use chrono::Utc;
use propdash_core::{seed_properties, Property, PropertyFilter, PropertyType};

fn ids(properties: &[&Property]) -> Vec<String> {
    properties.iter().map(|p| p.id.to_string()).collect()
}

#[test]
fn empty_filter_returns_full_list_in_order() {
    let seeds = seed_properties(Utc::now());
    let projected = PropertyFilter::default().apply(&seeds);

    assert_eq!(projected.len(), seeds.len());
    for (projected, original) in projected.iter().zip(&seeds) {
        assert_eq!(*projected, original);
    }
}

#[test]
fn text_match_is_case_insensitive() {
    let seeds = seed_properties(Utc::now());
    for query in ["plot", "PLOT", "Plot", "green valley"] {
        let projected = PropertyFilter::new(query, None).apply(&seeds);
        assert!(
            projected.iter().any(|p| p.name == "Green Valley Plot"),
            "query `{query}` should match Green Valley Plot"
        );
    }
}

#[test]
fn text_match_covers_location_and_description() {
    let seeds = seed_properties(Utc::now());

    let by_location = PropertyFilter::new("mumbai", None).apply(&seeds);
    assert_eq!(ids(&by_location), ["6"]);

    let by_description = PropertyFilter::new("serene", None).apply(&seeds);
    assert_eq!(ids(&by_description), ["4", "5"]);
}

#[test]
fn text_match_ignores_type_name() {
    let seeds = seed_properties(Utc::now());
    let projected = PropertyFilter::new("apartment", None).apply(&seeds);
    assert!(projected.is_empty());
}

#[test]
fn type_filter_is_exact() {
    let seeds = seed_properties(Utc::now());
    let sheds = PropertyFilter::new("", Some(PropertyType::Shed)).apply(&seeds);

    assert_eq!(ids(&sheds), ["2", "6"]);
    assert!(sheds.iter().all(|p| p.kind == PropertyType::Shed));
    let excluded = seeds
        .iter()
        .filter(|p| p.kind != PropertyType::Shed)
        .count();
    assert_eq!(sheds.len() + excluded, seeds.len());
}

#[test]
fn both_predicates_must_hold() {
    let seeds = seed_properties(Utc::now());
    let projected =
        PropertyFilter::new("retail space", Some(PropertyType::RetailStore)).apply(&seeds);
    assert_eq!(ids(&projected), ["3", "7"]);

    let none = PropertyFilter::new("retail space", Some(PropertyType::Plot)).apply(&seeds);
    assert!(none.is_empty());
}

#[test]
fn matches_agrees_with_apply() {
    let seeds = seed_properties(Utc::now());
    let filter = PropertyFilter::new("LAND", Some(PropertyType::Plot));
    let via_apply = ids(&filter.apply(&seeds));
    let via_matches = seeds
        .iter()
        .filter(|p| filter.matches(p))
        .map(|p| p.id.to_string())
        .collect::<Vec<_>>();
    assert_eq!(via_apply, via_matches);
    assert_eq!(via_apply, ["1", "8"]);
}
