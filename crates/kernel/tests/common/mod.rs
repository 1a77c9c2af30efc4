//! Common test utilities for integration tests.
//!
//! Builds a small site with the pages and images the block fixtures refer
//! to, on top of the `homestead-test-utils` helpers.

#![allow(clippy::unwrap_used, clippy::expect_used)]
#![allow(dead_code)]

use std::path::PathBuf;

use homestead_kernel::models::SiteSnapshot;
use homestead_test_utils::{TestSite, test_image, test_page};

/// Page id of the contact page.
pub const CONTACT_PAGE: u64 = 3;
/// Page id of a page without a routable URL.
pub const ORPHAN_PAGE: u64 = 4;
/// Image id of the facade photo.
pub const FACADE: u64 = 10;
/// Image id of the kitchen photo.
pub const KITCHEN: u64 = 11;
/// Image id of the alfresco photo.
pub const ALFRESCO: u64 = 12;

/// A site with a contact page, an unroutable page and three images.
pub fn site() -> TestSite {
    let mut orphan = test_page(ORPHAN_PAGE, "Draft Landing", "/");
    orphan.url = None;
    TestSite::new()
        .with_page(test_page(CONTACT_PAGE, "Contact", "/contact/"))
        .with_page(orphan)
        .with_image(test_image(FACADE, "Facade"))
        .with_image(test_image(KITCHEN, "Kitchen"))
        .with_image(test_image(ALFRESCO, "Alfresco"))
}

/// Path of a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load the sample site snapshot.
pub fn snapshot() -> SiteSnapshot {
    SiteSnapshot::from_path(&fixture_path("site.json")).expect("fixture snapshot loads")
}
