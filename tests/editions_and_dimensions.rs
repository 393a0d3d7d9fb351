mod common;

use common::{BASE, MockTransport, dataset_json, param};
use ons_rs::models::DatasetSummary;
use ons_rs::{Client, ClientConfig, EditionChoice, OnsError};
use serde_json::json;

fn client(t: MockTransport) -> Client<MockTransport> {
    Client::with_transport(t, ClientConfig::default().with_base_url(BASE))
}

fn dataset() -> DatasetSummary {
    serde_json::from_value(dataset_json("gdp", "Annual GDP")).unwrap()
}

const EDITIONS: &str = "http://ons.test/v1/datasets/gdp/editions";
const LATEST: &str = "http://ons.test/v1/datasets/gdp/editions/2021/versions/3";
const ED: &str = "http://ons.test/v1/datasets/gdp/editions/time-series/versions/4";

#[test]
fn preferred_edition_is_found() {
    let t = MockTransport::new().on(
        EDITIONS,
        json!({"items": [
            {"edition": "2021", "links": {"latest_version": {"href": LATEST}}},
            {"edition": "time-series", "links": {"latest_version": {"href": ED}}}
        ]}),
    );
    let got = client(t).get_edition(&dataset(), "time-series").unwrap();
    assert_eq!(
        got,
        EditionChoice::Found {
            edition: "time-series".into(),
            url: ED.into()
        }
    );
}

#[test]
fn missing_edition_falls_back_to_latest_version() {
    let t = MockTransport::new().on(
        EDITIONS,
        json!({"items": [{"edition": "2021", "links": {"latest_version": {"href": ED}}}]}),
    );
    let got = client(t).get_edition(&dataset(), "time-series").unwrap();
    assert_eq!(got, EditionChoice::FallbackToLatest { url: LATEST.into() });
}

#[test]
fn editions_without_items_fall_back_too() {
    let t = MockTransport::new().on(EDITIONS, json!({}));
    let got = client(t).get_edition(&dataset(), "time-series").unwrap();
    assert!(got.is_fallback());
    assert_eq!(got.url(), LATEST);
}

#[test]
fn fallback_without_latest_version_is_a_typed_error() {
    let mut ds = dataset();
    ds.links.latest_version = None;
    let t = MockTransport::new().on(EDITIONS, json!({"items": []}));
    let err = client(t).get_edition(&ds, "time-series").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<OnsError>(),
        Some(OnsError::MissingField { field: "links.latest_version", .. })
    ));
}

fn dims_api(total_ages: usize) -> MockTransport {
    MockTransport::new()
        .on(
            &format!("{ED}/dimensions"),
            json!({"items": [
                {"name": "geography", "label": "Geography", "links": {"options": {"id": "geography"}}},
                {"name": "agegroups", "label": "Age", "links": {"options": {"id": "agegroups"}}}
            ]}),
        )
        .on(
            &format!("{ED}/dimensions/geography/options"),
            json!({"items": [
                {"option": "UK0", "label": "United Kingdom"},
                {"option": "E92000001", "label": "England"}
            ], "count": 2, "total_count": 2}),
        )
        .on_query(&format!("{ED}/dimensions/agegroups/options"), move |q| {
            let limit: usize = param(q, "limit").unwrap().parse().unwrap();
            let offset: usize = param(q, "offset").map_or(0, |o| o.parse().unwrap());
            let items: Vec<_> = (offset..total_ages.min(offset + limit))
                .map(|i| json!({"option": format!("a{i}"), "label": format!("Age {i}")}))
                .collect();
            json!({"count": items.len(), "total_count": total_ages, "items": items})
        })
}

#[test]
fn catalog_keeps_api_order_and_labels() {
    let cli = client(dims_api(3));
    let cat = cli.get_dimensions(ED).unwrap();

    assert_eq!(cat.names().collect::<Vec<_>>(), ["geography", "agegroups"]);
    let geo = cat.get("geography").unwrap();
    assert_eq!(geo.keys().collect::<Vec<_>>(), ["UK0", "E92000001"]);
    assert_eq!(geo["E92000001"], "England");
    assert!(cat.truncated().is_empty());

    let opt_calls = cli
        .transport()
        .calls_to(&format!("{ED}/dimensions/geography/options"));
    assert_eq!(opt_calls.len(), 1);
    assert_eq!(opt_calls[0].param("limit"), Some("50"));
}

#[test]
fn options_beyond_page_limit_are_truncated_and_flagged() {
    let cli = client(dims_api(120));
    let cat = cli.get_dimensions(ED).unwrap();
    assert_eq!(cat.get("agegroups").unwrap().len(), 50);
    assert_eq!(cat.truncated(), ["agegroups"]);
    assert_eq!(
        cli.transport()
            .calls_to(&format!("{ED}/dimensions/agegroups/options"))
            .len(),
        1
    );
}

#[test]
fn paginated_options_collect_every_page() {
    let cli = Client::with_transport(
        dims_api(120),
        ClientConfig::default()
            .with_base_url(BASE)
            .with_paginate_options(true),
    );
    let cat = cli.get_dimensions(ED).unwrap();
    let ages = cat.get("agegroups").unwrap();
    assert_eq!(ages.len(), 120);
    assert_eq!(ages.keys().last().map(String::as_str), Some("a119"));
    assert!(cat.truncated().is_empty());

    let offsets: Vec<Option<String>> = cli
        .transport()
        .calls_to(&format!("{ED}/dimensions/agegroups/options"))
        .iter()
        .map(|r| r.param("offset").map(String::from))
        .collect();
    assert_eq!(offsets, [None, Some("50".to_string()), Some("100".to_string())]);
}

#[test]
fn dimension_ids_are_encoded_in_the_options_path() {
    let t = MockTransport::new()
        .on(
            &format!("{ED}/dimensions"),
            json!({"items": [{"name": "age groups", "links": {"options": {"id": "age groups"}}}]}),
        )
        .on(
            &format!("{ED}/dimensions/age%20groups/options"),
            json!({"items": [{"option": "16+", "label": "16 and over"}], "count": 1}),
        );
    let cat = client(t).get_dimensions(ED).unwrap();
    assert_eq!(cat.get("age groups").unwrap()["16+"], "16 and over");
}
