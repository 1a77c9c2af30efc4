//! Integration tests for the page body variants.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use homestead_kernel::content::builders::blog::post_id;
use homestead_test_utils::{BASE_URL, assert, block, item};
use serde_json::json;

use common::{ALFRESCO, CONTACT_PAGE, FACADE, KITCHEN, site};

// ============================================================================
// Hero
// ============================================================================

#[test]
fn hero_defaults_when_empty() {
    let out = site().serialize_json(&[block("hero", "h", json!({}))]);
    let hero = &out[0]["value"];
    assert_eq!(hero["hero_title"], "Transform your<br/>outdoor dreams");
    assert_eq!(hero["cta_text"], "Get a Free Site Visit");
    assert_eq!(hero["cta_link"], "#contact");
    assert!(hero["background_image"].is_null());
    assert!(hero["background_video"].is_null());
    assert_eq!(hero["slides"], json!([]));
    assert_eq!(hero["autoplay_enabled"], true);
    assert_eq!(hero["autoplay_delay"], 5000);
}

#[test]
fn hero_slides_resolve_images_and_links() {
    let out = site().serialize_json(&[block(
        "hero",
        "h",
        json!({
            "autoplay_delay": "7000",
            "slides": [
                item("s1", json!({"title": "Alfresco", "image": ALFRESCO, "full_image": ALFRESCO, "page_link": CONTACT_PAGE})),
                item("s2", json!({"title": "No link"}))
            ]
        }),
    )]);
    let hero = &out[0]["value"];
    assert_eq!(hero["autoplay_delay"], 7000);
    let slides = hero["slides"].as_array().unwrap();
    assert_eq!(slides.len(), 2);
    assert!(slides[0]["image"]["desktop"].as_str().unwrap().contains("fill-1200x480"));
    assert!(slides[0]["full_image"]["desktop"].as_str().unwrap().contains("width-3840"));
    assert_eq!(slides[0]["link"], json!({"url": "/contact/", "is_external": false}));
    assert_eq!(slides[0]["button_text"], "Read more");
    assert_eq!(slides[1]["link"], json!({"url": "#", "is_external": false}));
}

// ============================================================================
// Projects and slider
// ============================================================================

#[test]
fn projects_number_items_and_use_comparator_profile() {
    let out = site().serialize_json(&[
        block(
            "residential_projects",
            "r",
            json!({"projects": [
                item("a", json!({"title": "Brighton", "image": FACADE})),
                item("b", json!({"title": "Sunbury"}))
            ]}),
        ),
        block("commercial_projects", "c", json!({"subtitle": ""})),
    ]);
    let residential = &out[0]["value"];
    assert_eq!(residential["title"], "Featured Residential Projects");
    assert_eq!(residential["projects"][0]["id"], 1);
    assert_eq!(residential["projects"][1]["id"], 2);
    assert_eq!(residential["projects"][0]["button_text"], "Learn More");
    assert!(
        residential["projects"][0]["image"]["desktop"]
            .as_str()
            .unwrap()
            .contains("fill-1600x1200")
    );
    assert_eq!(out[1]["value"]["title"], "Commercial & Community Projects");
    assert!(out[1]["value"]["subtitle"].is_null());
}

#[test]
fn slider_sorts_by_order_keeping_unparseable_last() {
    let out = site().serialize_json(&[block(
        "horizontal_slider",
        "s",
        json!({"slides": [
            item("x", json!({"title": "Third", "order": "3"})),
            item("y", json!({"title": "Unknown", "order": "soon"})),
            item("z", json!({"title": "First", "order": "1"})),
            item("w", json!({"title": "Also first", "order": "1"}))
        ]}),
    )]);
    let slider = &out[0]["value"];
    let titles: Vec<&str> = slider["slides"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Also first", "Third", "Unknown"]);
    assert_eq!(slider["slides"][0]["id"], 3);
    assert!(slider["slides"][3]["order"].is_null());
    assert_eq!(slider["title"], "Our Services");
    assert_eq!(slider["autoplay_delay"], 3000);
}

// ============================================================================
// Quality homes and journey
// ============================================================================

#[test]
fn quality_homes_cta_is_null_when_blank() {
    let out = site().serialize_json(&[
        block("quality_homes", "q1", json!({"features": [item("f", json!({"title": "Fixed price"}))]})),
        block("quality_homes", "q2", json!({"cta": {"button_text": "", "external_url": ""}})),
        block("quality_homes", "q3", json!({"cta": {"page_link": CONTACT_PAGE}})),
    ]);
    assert_eq!(out[0]["value"]["features"][0]["icon"], "✓");
    assert!(out[0]["value"]["cta"].is_null());
    assert!(out[1]["value"]["cta"].is_null());
    let cta = &out[2]["value"]["cta"];
    assert_eq!(cta["button_text"], "Get Started");
    assert_eq!(cta["page_link"], json!({"id": CONTACT_PAGE, "title": "Contact", "url": "/contact/"}));
}

#[test]
fn journey_has_two_ctas() {
    let out = site().serialize_json(&[block(
        "dream_home_journey",
        "j",
        json!({
            "background_image": KITCHEN,
            "primary_cta": {"button_text": "Designs", "page_link": CONTACT_PAGE},
            "secondary_cta": {"button_text": "Call", "is_external_link": true, "external_url": "tel:0390000000"}
        }),
    )]);
    let journey = &out[0]["value"];
    assert::responsive_image(&journey["background_image"], BASE_URL);
    assert_eq!(journey["primary_cta"]["url"], "/contact/");
    assert_eq!(journey["secondary_cta"]["url"], "tel:0390000000");
    assert_eq!(journey["secondary_cta"]["is_external"], true);
    assert_eq!(journey["title"], "Begin your dream home journey with Shambala Homes");
}

// ============================================================================
// Blog
// ============================================================================

#[test]
fn blog_section_orders_featured_first() {
    let out = site().serialize_json(&[block(
        "blog_section",
        "b",
        json!({
            "featured_post": {
                "title": "Choosing a block",
                "image": FACADE,
                "additional_text": "Orientation matters.",
                "additional_image": KITCHEN,
                "is_external_link": true,
                "external_url": "https://blog.test/block"
            },
            "sidebar_posts": [
                item("p1", json!({"title": "Facade trends", "date": "2 Sep, 2025", "category": "Style"})),
                item("p2", json!({"title": "No image"}))
            ],
            "cta": {"button_text": "All posts", "page_link": CONTACT_PAGE}
        }),
    )]);
    let section = &out[0]["value"];
    assert_eq!(section["section_title"], "Design and building tips from our blog");

    let posts = section["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 3);

    let featured = &posts[0];
    assert_eq!(featured["featured"], true);
    assert_eq!(featured["id"], post_id("Choosing a block", "14 Oct, 2025"));
    assert_eq!(featured["date"], "14 Oct, 2025");
    assert_eq!(featured["category"], "Design Tips");
    assert_eq!(featured["link"], "https://blog.test/block");
    assert_eq!(featured["is_external"], true);
    assert_eq!(featured["imageSrc"], featured["image"]["src"]);
    assert_eq!(featured["imageAlt"], "Facade");
    assert_eq!(featured["additional_text"], "Orientation matters.");
    assert!(featured["additional_image"]["src"].as_str().unwrap().contains("kitchen"));

    let sidebar = &posts[1];
    assert_eq!(sidebar["featured"], false);
    assert_eq!(sidebar["category"], "Style");
    assert!(sidebar.get("additional_text").is_none());
    assert!(sidebar.get("additional_image").is_none());

    let no_image = &posts[2];
    assert_eq!(no_image["imageSrc"], "");
    assert_eq!(no_image["imageAlt"], "No image");
    assert_eq!(no_image["link"], "#");

    assert_eq!(section["cta"], json!({"text": "All posts", "link": "/contact/", "is_external": false}));
}

#[test]
fn blog_ids_are_stable_across_runs() {
    let blocks = [block(
        "blog_section",
        "b",
        json!({"sidebar_posts": [item("p", json!({"title": "Same", "date": "1 Jan, 2025"}))]}),
    )];
    let first = site().serialize_json(&blocks);
    let second = site().serialize_json(&blocks);
    assert_eq!(first[0]["value"]["posts"][0]["id"], second[0]["value"]["posts"][0]["id"]);
    assert_eq!(first[0]["value"]["posts"][0]["id"], post_id("Same", "1 Jan, 2025"));
}
