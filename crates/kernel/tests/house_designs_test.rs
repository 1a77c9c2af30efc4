//! Integration tests for the house design listing built from a snapshot.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use homestead_kernel::content::{SerializerSettings, TreeSerializer};
use homestead_kernel::models::SiteSnapshot;
use homestead_kernel::services::{MediaRenditions, listing};
use homestead_test_utils::{BASE_URL, MEDIA_URL, assert};
use serde_json::{Value, json};

fn render(snapshot: &SiteSnapshot) -> Value {
    let store = snapshot.store();
    let settings = SerializerSettings::new(BASE_URL, MEDIA_URL);
    let renditions = MediaRenditions::new(MEDIA_URL);
    let serializer = TreeSerializer::new(&settings, &store, &renditions);
    serde_json::to_value(listing(&serializer, snapshot).unwrap()).unwrap()
}

#[test]
fn lists_published_designs_by_name() {
    let out = render(&common::snapshot());
    let names: Vec<&str> = out["house_designs_data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Banksia", "Waratah"]);
    assert_eq!(out["designs_per_page"], 9);
}

#[test]
fn design_card_shape() {
    let out = render(&common::snapshot());
    let waratah = &out["house_designs_data"][1];

    assert::json_eq(
        &waratah["image"],
        &json!({
            "url": format!("{BASE_URL}/media/original_images/facade.jpg"),
            "alt": "Facade",
            "width": 3000,
            "height": 2000
        }),
    );
    assert_eq!(
        waratah["specs"],
        json!({
            "storeys": "2",
            "storeys_label": "Double Storey",
            "bedrooms": 4,
            "bathrooms": "2.5",
            "garage_spaces": 2,
            "block_width": "12.5m - 16m"
        })
    );
    assert_eq!(
        waratah["pricing"],
        json!({"base_price": "452500.00", "display": "$452,500", "note": "Base build only"})
    );
    assert_eq!(waratah["category"], json!({"name": "Designer", "slug": "designer"}));
    assert_eq!(waratah["location"], json!({"name": "Melbourne West", "slug": "melbourne-west"}));
    assert_eq!(waratah["badges"], json!({"on_display": true, "virtual_tour": true}));
    assert_eq!(waratah["virtual_tour_url"], "https://tours.example.test/waratah");
    assert_eq!(waratah["tags"], json!(["alfresco", "study"]));
    assert_eq!(waratah["description"], "<p>Family living.</p>");
}

#[test]
fn unpriced_design_card() {
    let out = render(&common::snapshot());
    let banksia = &out["house_designs_data"][0];
    assert!(banksia["pricing"]["base_price"].is_null());
    assert_eq!(banksia["pricing"]["display"], "Contact for pricing");
    assert_eq!(banksia["specs"]["block_width"], "Any");
    assert_eq!(banksia["specs"]["bathrooms"], "2");
    assert!(banksia["virtual_tour_url"].is_null());
    assert::has_key(banksia, "image");
    assert!(banksia["image"].is_null());
    assert!(banksia["category"].is_null());
}

#[test]
fn additional_content_is_serialized_recursively() {
    let out = render(&common::snapshot());
    let content = &out["house_designs_data"][1]["additional_content"];
    assert_eq!(content[0]["type"], "content");
    assert_eq!(content[0]["id"], "content_c1");

    let nested = &content[0]["value"];
    assert_eq!(nested[0]["id"], "pricing_p1");
    assert_eq!(nested[0]["value"]["display"], "$452,500");
    assert_eq!(nested[1]["value"]["caption"], "Kitchen");
    assert!(
        nested[1]["value"]["image"]["desktop"]
            .as_str()
            .unwrap()
            .ends_with("kitchen.fill-1200x800.format-webp.webp")
    );
}

#[test]
fn hero_data_and_filter_options() {
    let out = render(&common::snapshot());
    let hero = &out["hero_data"];
    assert_eq!(hero["title"], "Home Designs Melbourne");
    assert_eq!(hero["subtitle"], "Browse our range.");
    assert_eq!(hero["overlay_opacity"], 0.4);
    assert_eq!(
        hero["background_image"]["url"],
        format!("{BASE_URL}/media/original_images/display-home.png")
    );

    let categories = &out["filter_options"]["categories"];
    assert_eq!(
        categories,
        &json!([
            {"label": "Designer", "value": "designer"},
            {"label": "Freedom", "value": "freedom"}
        ])
    );
}

#[test]
fn snapshot_without_index_uses_defaults() {
    let snapshot = SiteSnapshot::default();
    let out = render(&snapshot);
    assert!(out["id"].is_null());
    assert_eq!(out["designs_per_page"], 12);
    assert_eq!(out["hero_data"]["overlay_opacity"], 0.5);
    assert!(out["hero_data"]["background_image"].is_null());
}
