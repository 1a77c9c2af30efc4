//! House design catalogue records.

use serde::{Deserialize, Serialize};

use crate::content::ContentBlock;

use super::decimal::{self, Decimal};
use super::image::ImageId;
use super::page::PageId;

/// Grouping shown in listing filters (e.g. "Freedom", "Designer").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    /// Lower numbers sort first.
    #[serde(default)]
    pub order: i32,
}

/// Build region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildLocation {
    pub name: String,
    pub slug: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

fn default_storeys() -> String {
    "1".to_string()
}

fn default_garage() -> u32 {
    2
}

/// Storey choices and their labels.
pub const STOREY_CHOICES: [(&str, &str); 3] = [
    ("1", "Single Storey"),
    ("2", "Double Storey"),
    ("3", "Three Storey"),
];

/// Human label for a storey code; unknown codes are echoed.
pub fn storeys_label(storeys: &str) -> String {
    STOREY_CHOICES
        .iter()
        .find(|(code, _)| *code == storeys)
        .map_or_else(|| storeys.to_string(), |(_, label)| (*label).to_string())
}

/// `"12.5m - 16m"`, `"12.5m+"`, or `"Any"`. Zero widths count as unset.
pub fn block_width_display(min: Option<&Decimal>, max: Option<&Decimal>) -> String {
    let min = min.filter(|d| !d.is_zero());
    let max = max.filter(|d| !d.is_zero());
    match (min, max) {
        (Some(min), Some(max)) => format!("{min}m - {max}m"),
        (Some(min), None) => format!("{min}m+"),
        _ => "Any".to_string(),
    }
}

/// `"$450,000"`, or `"Contact for pricing"` for a missing or zero price.
pub fn price_display(price: Option<&Decimal>, currency: &str) -> String {
    match price.filter(|p| !p.is_zero()) {
        Some(price) => decimal::currency(price, currency),
        None => "Contact for pricing".to_string(),
    }
}

/// One catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseDesignRecord {
    pub id: u64,
    pub name: String,
    pub slug: String,

    /// Rich text.
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured_image: Option<ImageId>,

    #[serde(default = "default_storeys")]
    pub storeys: String,
    pub bedrooms: u32,
    #[serde(default, deserialize_with = "decimal::opt")]
    pub bathrooms: Option<Decimal>,
    #[serde(default = "default_garage")]
    pub garage_spaces: u32,
    #[serde(default, deserialize_with = "decimal::opt")]
    pub min_block_width: Option<Decimal>,
    #[serde(default, deserialize_with = "decimal::opt")]
    pub max_block_width: Option<Decimal>,

    #[serde(default, deserialize_with = "decimal::opt")]
    pub base_price: Option<Decimal>,
    #[serde(default)]
    pub price_note: String,

    #[serde(default)]
    pub category: Option<HouseCategory>,
    #[serde(default)]
    pub build_location: Option<BuildLocation>,
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_on_display: bool,
    #[serde(default)]
    pub has_virtual_tour: bool,
    #[serde(default)]
    pub virtual_tour_url: String,

    /// Stream of `content` blocks, each holding a nested stream.
    #[serde(default)]
    pub additional_content: Vec<ContentBlock>,

    #[serde(default = "default_true")]
    pub is_published: bool,
}

impl HouseDesignRecord {
    pub fn storeys_label(&self) -> String {
        storeys_label(&self.storeys)
    }

    pub fn block_width_display(&self) -> String {
        block_width_display(self.min_block_width.as_ref(), self.max_block_width.as_ref())
    }

    pub fn price_display(&self) -> String {
        price_display(self.base_price.as_ref(), "$")
    }
}

fn default_intro_title() -> String {
    "Home Designs Melbourne".to_string()
}

fn default_opacity() -> u8 {
    50
}

fn default_per_page() -> u32 {
    12
}

/// The listing page for the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseDesignsIndexRecord {
    pub id: PageId,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_intro_title")]
    pub intro_title: String,
    #[serde(default)]
    pub intro_text: String,
    #[serde(default)]
    pub hero_background_image: Option<ImageId>,
    /// Overlay darkness, 0-100.
    #[serde(default = "default_opacity")]
    pub hero_overlay_opacity: u8,
    #[serde(default = "default_per_page")]
    pub designs_per_page: u32,
}

impl Default for HouseDesignsIndexRecord {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            intro_title: default_intro_title(),
            intro_text: String::new(),
            hero_background_image: None,
            hero_overlay_opacity: default_opacity(),
            designs_per_page: default_per_page(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        decimal::parse(s).unwrap()
    }

    #[test]
    fn block_width_variants() {
        assert_eq!(block_width_display(Some(&d("12.5")), Some(&d("16"))), "12.5m - 16m");
        assert_eq!(block_width_display(Some(&d("12.50")), None), "12.50m+");
        assert_eq!(block_width_display(None, Some(&d("16"))), "Any");
        assert_eq!(block_width_display(Some(&d("0")), Some(&d("16"))), "Any");
        assert_eq!(block_width_display(None, None), "Any");
    }

    #[test]
    fn price_variants() {
        assert_eq!(price_display(Some(&d("450000.00")), "$"), "$450,000");
        assert_eq!(price_display(Some(&d("0.00")), "$"), "Contact for pricing");
        assert_eq!(price_display(None, "$"), "Contact for pricing");
    }

    #[test]
    fn storey_labels() {
        assert_eq!(storeys_label("2"), "Double Storey");
        assert_eq!(storeys_label("split"), "split");
    }

    #[test]
    fn record_defaults() {
        let design: HouseDesignRecord = serde_json::from_str(
            r#"{"id": 1, "name": "Aira", "slug": "aira", "bedrooms": 4, "bathrooms": "2.5"}"#,
        )
        .unwrap();
        assert_eq!(design.storeys, "1");
        assert_eq!(design.garage_spaces, 2);
        assert!(design.is_published);
        assert_eq!(design.bathrooms.unwrap().to_string(), "2.5");
        assert_eq!(design.price_display(), "Contact for pricing");
        assert_eq!(design.block_width_display(), "Any");
    }

    #[test]
    fn index_defaults() {
        let index: HouseDesignsIndexRecord = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(index.intro_title, "Home Designs Melbourne");
        assert_eq!(index.hero_overlay_opacity, 50);
        assert_eq!(index.designs_per_page, 12);
    }
}
