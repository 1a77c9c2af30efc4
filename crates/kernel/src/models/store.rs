//! Read access to persisted content.
//!
//! The serializer only ever reads pages and images by id. `ContentStore` is
//! that seam; `InMemoryStore` backs it with records loaded from a JSON site
//! snapshot (the CLI and tests use it).

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use super::home_page::HomePageRecord;
use super::house_design::{HouseCategory, HouseDesignRecord, HouseDesignsIndexRecord};
use super::image::{ImageAsset, ImageId};
use super::page::{PageId, PageRecord, PageSummary};
use super::site_settings::SiteSettingsRecord;

/// Lookups the serializer needs from the persistence layer.
pub trait ContentStore: Send + Sync {
    /// A live, published page.
    fn page(&self, id: PageId) -> Option<PageSummary>;

    /// A stored image.
    fn image(&self, id: ImageId) -> Option<ImageAsset>;
}

/// A dump of the records one site needs, as exported by the persistence layer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteSnapshot {
    pub pages: Vec<PageRecord>,
    pub images: Vec<ImageAsset>,
    pub home: Option<HomePageRecord>,
    pub house_designs: Vec<HouseDesignRecord>,
    pub house_designs_index: Option<HouseDesignsIndexRecord>,
    pub categories: Vec<HouseCategory>,
    pub settings: Option<SiteSettingsRecord>,
}

impl SiteSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let snapshot: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse snapshot {}", path.display()))?;
        info!(
            path = %path.display(),
            pages = snapshot.pages.len(),
            images = snapshot.images.len(),
            house_designs = snapshot.house_designs.len(),
            "loaded site snapshot"
        );
        Ok(snapshot)
    }

    /// House designs visible on the site, in listing order.
    pub fn published_designs(&self) -> Vec<&HouseDesignRecord> {
        let mut designs: Vec<_> = self.house_designs.iter().filter(|d| d.is_published).collect();
        designs.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        designs
    }

    /// Categories ordered for filter menus.
    pub fn ordered_categories(&self) -> Vec<&HouseCategory> {
        let mut categories: Vec<_> = self.categories.iter().collect();
        categories.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        categories
    }

    /// Build a store over this snapshot's pages and images.
    pub fn store(&self) -> InMemoryStore {
        let mut store = InMemoryStore::new();
        for page in &self.pages {
            store.insert_page(page.clone());
        }
        for image in &self.images {
            store.insert_image(image.clone());
        }
        store
    }
}

/// HashMap-backed store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pages: HashMap<PageId, PageRecord>,
    images: HashMap<ImageId, ImageAsset>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_page(&mut self, page: PageRecord) {
        debug!(page_id = page.id, "store: insert page");
        self.pages.insert(page.id, page);
    }

    pub fn insert_image(&mut self, image: ImageAsset) {
        self.images.insert(image.id, image);
    }

    /// The full page record, including its body stream.
    pub fn page_record(&self, id: PageId) -> Option<&PageRecord> {
        self.pages.get(&id)
    }
}

impl ContentStore for InMemoryStore {
    fn page(&self, id: PageId) -> Option<PageSummary> {
        self.pages.get(&id).map(PageRecord::summary)
    }

    fn image(&self, id: ImageId) -> Option<ImageAsset> {
        self.images.get(&id).cloned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snapshot_builds_store() {
        let snapshot: SiteSnapshot = serde_json::from_value(json!({
            "pages": [{"id": 1, "title": "Home", "url": "/"}],
            "images": [{"id": 2, "title": "Deck", "file": "original_images/deck.jpg", "width": 10, "height": 10}]
        }))
        .unwrap();
        let store = snapshot.store();
        assert_eq!(store.page(1).unwrap().url.as_deref(), Some("/"));
        assert_eq!(store.image(2).unwrap().title, "Deck");
        assert!(store.page(9).is_none());
        assert!(store.image(9).is_none());
    }

    #[test]
    fn empty_snapshot_is_valid() {
        let snapshot: SiteSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.pages.is_empty());
        assert!(snapshot.home.is_none());
    }

    #[test]
    fn published_designs_filters_and_orders() {
        let snapshot: SiteSnapshot = serde_json::from_value(json!({
            "house_designs": [
                {"id": 1, "name": "Banksia", "slug": "banksia", "bedrooms": 3},
                {"id": 2, "name": "Acacia", "slug": "acacia", "bedrooms": 4, "is_published": false},
                {"id": 3, "name": "Angophora", "slug": "angophora", "bedrooms": 4}
            ]
        }))
        .unwrap();
        let names: Vec<_> = snapshot.published_designs().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Angophora", "Banksia"]);
    }
}
