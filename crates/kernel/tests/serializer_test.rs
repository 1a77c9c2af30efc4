//! Integration tests for the tree serializer: stream shape, links, images,
//! fallbacks and determinism.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use homestead_kernel::content::{LinkRef, ResolvedLink, SerializerSettings, TreeSerializer};
use homestead_kernel::error::SerializeError;
use homestead_kernel::models::InMemoryStore;
use homestead_test_utils::{BASE_URL, FailingRenditions, assert, block, item, test_image};
use serde_json::json;

use common::{ALFRESCO, CONTACT_PAGE, FACADE, KITCHEN, ORPHAN_PAGE, site};

// ============================================================================
// Stream shape
// ============================================================================

#[test]
fn unknown_variant_returns_raw_scalars() {
    let site = site();
    let out = site.serialize_json(&[block(
        "testimonial_wall",
        "t1",
        json!({"quote": "Great builders", "stars": 5, "author": {"name": "Sam"}}),
    )]);
    assert_eq!(out[0]["type"], "testimonial_wall");
    assert_eq!(out[0]["id"], "testimonial_wall_t1");
    assert_eq!(out[0]["value"], json!({"quote": "Great builders", "stars": 5}));
}

#[test]
fn output_preserves_order_and_length() {
    let site = site();
    let blocks = [
        block("blog_section", "b", json!({})),
        block("hero", "a", json!({})),
        block("mystery", "m", json!("raw")),
        block("hero", "c", json!({})),
    ];
    let out = site.serialize_json(&blocks);
    assert::stream_ids(
        &out,
        &[
            ("blog_section", "blog_section_b"),
            ("hero", "hero_a"),
            ("mystery", "mystery_m"),
            ("hero", "hero_c"),
        ],
    );
}

#[test]
fn empty_stream_is_empty_array() {
    let site = site();
    assert_eq!(site.serialize_json(&[]), json!([]));
}

#[test]
fn serialization_is_idempotent() {
    let site = site();
    let blocks = [
        block(
            "blog_section",
            "b1",
            json!({
                "featured_post": {"title": "Choosing a block", "image": FACADE, "additional_image": KITCHEN},
                "sidebar_posts": [item("p1", json!({"title": "Facade trends", "date": "2 Sep, 2025"}))]
            }),
        ),
        block("hero", "h1", json!({"background_image": ALFRESCO})),
    ];
    let first = serde_json::to_string(&site.serialize(&blocks, None).unwrap()).unwrap();
    let second = serde_json::to_string(&site.serialize(&blocks, None).unwrap()).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Links
// ============================================================================

#[test]
fn empty_link_is_placeholder() {
    let site = site();
    assert_eq!(site.serializer().resolve_link(&LinkRef::default()), ResolvedLink::none());
}

#[test]
fn external_flag_with_url_wins_over_page() {
    let site = site();
    let link = LinkRef {
        page: Some(CONTACT_PAGE),
        ..LinkRef::external("https://maps.test/display-centre")
    };
    let resolved = site.serializer().resolve_link(&link);
    assert_eq!(resolved.url, "https://maps.test/display-centre");
    assert!(resolved.is_external);
}

#[test]
fn external_url_without_flag_uses_page() {
    let site = site();
    let link = LinkRef {
        is_external: false,
        external_url: Some("https://ignored.test".to_string()),
        page: Some(CONTACT_PAGE),
        literal: None,
    };
    assert_eq!(site.serializer().resolve_link(&link).url, "/contact/");
}

#[test]
fn broken_page_links_fall_back_to_root() {
    let site = site();
    for page in [ORPHAN_PAGE, 999] {
        let resolved = site.serializer().resolve_link(&LinkRef::page(page));
        assert_eq!(resolved.url, "/");
        assert!(!resolved.is_external);
    }
}

#[test]
fn legacy_literal_is_external() {
    let site = site();
    let resolved = site.serializer().resolve_link(&LinkRef::literal("/old-promo/"));
    assert_eq!(resolved.url, "/old-promo/");
    assert!(resolved.is_external);
}

// ============================================================================
// Images
// ============================================================================

#[test]
fn null_or_dangling_image_makes_no_rendition_requests() {
    let site = site();
    let serializer = site.serializer();
    assert!(serializer.resolve_image(None, "hero", "background_image", None).unwrap().is_none());
    assert!(serializer.resolve_image(Some(404), "hero", "background_image", None).unwrap().is_none());
    assert_eq!(site.renditions.call_count(), 0);
}

#[test]
fn hero_background_uses_hero_profile() {
    let site = site();
    let image = site
        .serializer()
        .resolve_image(Some(FACADE), "hero", "background_image", None)
        .unwrap()
        .unwrap();
    assert_eq!(image.desktop, format!("{BASE_URL}/media/images/facade.fill-1920x1080.format-webp.webp"));
    assert_eq!(image.tablet, format!("{BASE_URL}/media/images/facade.fill-1440x900.format-webp.webp"));
    assert_eq!(image.mobile, format!("{BASE_URL}/media/images/facade.fill-1080x1920.format-webp.webp"));
    assert_eq!(image.src, image.desktop);
    assert_eq!(image.alt, "Facade");
    let specs: Vec<String> = site.renditions.calls().into_iter().map(|(_, spec)| spec).collect();
    assert_eq!(
        specs,
        vec![
            "fill-1920x1080|format-webp",
            "fill-1440x900|format-webp",
            "fill-1080x1920|format-webp"
        ]
    );
}

#[test]
fn unmapped_slot_uses_content_image_profile() {
    let site = site();
    let image = site
        .serializer()
        .resolve_image(Some(KITCHEN), "testimonial_wall", "portrait", None)
        .unwrap()
        .unwrap();
    assert!(image.desktop.ends_with("kitchen.fill-1200x800.format-webp.webp"));
}

#[test]
fn rendition_failure_fails_the_whole_tree() {
    let mut store = InMemoryStore::new();
    store.insert_image(test_image(FACADE, "Facade"));
    let settings = SerializerSettings::new(BASE_URL, "/media/");
    let serializer = TreeSerializer::new(&settings, &store, &FailingRenditions);
    let blocks = [
        block("mystery", "m", json!({"a": 1})),
        block("hero", "h", json!({"background_image": FACADE})),
    ];
    let err = serializer.serialize_tree(&blocks, None).unwrap_err();
    assert!(matches!(err, SerializeError::Rendition(_)));
}

#[test]
fn multi_image_content_with_external_cta() {
    let site = site();
    let out = site.serialize_json(&[block(
        "multi_image_content",
        "studio",
        json!({
            "section_title": "Visit our studio",
            "description": "<p>Choose finishes.</p><p>Meet the team.</p>",
            "images": [
                item("l", json!({"image": FACADE, "alt_text": "Studio entrance"})),
                item("r", json!({"image": KITCHEN}))
            ],
            "cta": {
                "button_text": "Book a visit",
                "is_external_link": true,
                "external_url": "https://book.test/studio"
            }
        }),
    )]);
    let value = &out[0]["value"];
    let images = value["images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    for image in images {
        assert::responsive_image(image, BASE_URL);
    }
    assert_eq!(images[0]["alt"], "Studio entrance");
    assert!(images[0]["desktop"].as_str().unwrap().contains("fill-3000x2000"));
    assert_eq!(value["description"], json!(["Choose finishes.", "Meet the team."]));
    assert!(value["cta"]["page_link"].is_null());
    assert_eq!(value["cta"]["external_url"], "https://book.test/studio");
    assert_eq!(value["cta"]["url"], "https://book.test/studio");
    assert_eq!(value["cta"]["is_external"], true);
}
