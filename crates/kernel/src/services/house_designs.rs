//! House design listing service.
//!
//! Builds the catalogue index payload: hero data, filter options and one
//! card per published design, each with its serialized
//! `additional_content` stream.

use serde::Serialize;
use tracing::debug;

use crate::content::{HOUSE_DESIGN_SCOPE, SerializedBlock, TreeSerializer};
use crate::error::SerializeResult;
use crate::models::house_design::STOREY_CHOICES;
use crate::models::{
    HouseCategory, HouseDesignRecord, HouseDesignsIndexRecord, ImageData, SiteSnapshot,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSpecs {
    pub storeys: String,
    pub storeys_label: String,
    pub bedrooms: u32,
    pub bathrooms: String,
    pub garage_spaces: u32,
    pub block_width: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardPricing {
    /// Raw decimal, `None` for a missing or zero price.
    pub base_price: Option<String>,
    pub display: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedSlug {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardBadges {
    pub on_display: bool,
    pub virtual_tour: bool,
}

/// One design as shown in the listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseDesignCard {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Featured image at its original size; `None` when the design has none.
    pub image: Option<ImageData>,
    pub specs: CardSpecs,
    pub pricing: CardPricing,
    pub category: Option<NamedSlug>,
    pub location: Option<NamedSlug>,
    pub badges: CardBadges,
    pub virtual_tour_url: Option<String>,
    pub tags: Vec<String>,
    pub additional_content: Vec<SerializedBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroData {
    pub title: String,
    pub subtitle: String,
    pub background_image: Option<ImageData>,
    /// Overlay darkness scaled to 0-1.
    pub overlay_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub storeys: Vec<FilterOption>,
    pub bedrooms: Vec<FilterOption>,
    pub bathrooms: Vec<FilterOption>,
    pub categories: Vec<FilterOption>,
    pub price_ranges: Vec<FilterOption>,
}

/// The catalogue index payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseDesignsListing {
    pub id: Option<u64>,
    pub title: String,
    pub designs_per_page: u32,
    pub hero_data: HeroData,
    pub house_designs_data: Vec<HouseDesignCard>,
    pub filter_options: FilterOptions,
}

/// Serialize one design into its listing card.
pub fn design_card(
    serializer: &TreeSerializer<'_>,
    design: &HouseDesignRecord,
) -> SerializeResult<HouseDesignCard> {
    Ok(HouseDesignCard {
        id: design.id,
        name: design.name.clone(),
        slug: design.slug.clone(),
        description: serializer.rich_text(&design.description),
        image: serializer.image_data(design.featured_image),
        specs: CardSpecs {
            storeys: design.storeys.clone(),
            storeys_label: design.storeys_label(),
            bedrooms: design.bedrooms,
            bathrooms: design
                .bathrooms
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            garage_spaces: design.garage_spaces,
            block_width: design.block_width_display(),
        },
        pricing: CardPricing {
            base_price: design
                .base_price
                .as_ref()
                .filter(|p| !p.is_zero())
                .map(ToString::to_string),
            display: design.price_display(),
            note: design.price_note.clone(),
        },
        category: design.category.as_ref().map(|c| NamedSlug {
            name: c.name.clone(),
            slug: c.slug.clone(),
        }),
        location: design.build_location.as_ref().map(|l| NamedSlug {
            name: l.name.clone(),
            slug: l.slug.clone(),
        }),
        badges: CardBadges {
            on_display: design.is_on_display,
            virtual_tour: design.has_virtual_tour,
        },
        virtual_tour_url: design
            .has_virtual_tour
            .then(|| design.virtual_tour_url.clone()),
        tags: design.tags.clone(),
        additional_content: serializer
            .serialize_tree(&design.additional_content, Some(HOUSE_DESIGN_SCOPE))?,
    })
}

/// Hero section of the catalogue index page.
pub fn hero_data(serializer: &TreeSerializer<'_>, index: &HouseDesignsIndexRecord) -> HeroData {
    HeroData {
        title: index.intro_title.clone(),
        subtitle: index.intro_text.clone(),
        background_image: serializer.image_data(index.hero_background_image),
        overlay_opacity: f64::from(index.hero_overlay_opacity) / 100.0,
    }
}

/// Choices offered by the listing's filter bar.
pub fn filter_options(categories: &[&HouseCategory]) -> FilterOptions {
    FilterOptions {
        storeys: STOREY_CHOICES
            .iter()
            .map(|(value, label)| FilterOption::new(*label, *value))
            .collect(),
        bedrooms: (1..=6)
            .map(|n| FilterOption::new(n.to_string(), n.to_string()))
            .collect(),
        bathrooms: vec![
            FilterOption::new("1", "1"),
            FilterOption::new("2", "2"),
            FilterOption::new("2.5", "2.5"),
            FilterOption::new("3", "3"),
            FilterOption::new("3+", "3"),
        ],
        categories: categories
            .iter()
            .map(|c| FilterOption::new(c.name.clone(), c.slug.clone()))
            .collect(),
        price_ranges: vec![
            FilterOption::new("Under $300k", "300000"),
            FilterOption::new("Under $400k", "400000"),
            FilterOption::new("Under $500k", "500000"),
            FilterOption::new("Under $600k", "600000"),
            FilterOption::new("$600k+", "600001"),
        ],
    }
}

/// Build the full listing from a snapshot.
///
/// Only published designs are listed, ordered by name. A snapshot without an
/// index page gets the index defaults.
pub fn listing(
    serializer: &TreeSerializer<'_>,
    snapshot: &SiteSnapshot,
) -> SerializeResult<HouseDesignsListing> {
    let index = snapshot.house_designs_index.clone().unwrap_or_default();
    let designs = snapshot.published_designs();
    debug!(designs = designs.len(), "building house design listing");

    let cards = designs
        .into_iter()
        .map(|design| design_card(serializer, design))
        .collect::<SerializeResult<Vec<_>>>()?;

    Ok(HouseDesignsListing {
        id: snapshot.house_designs_index.as_ref().map(|i| i.id),
        title: index.title.clone(),
        designs_per_page: index.designs_per_page,
        hero_data: hero_data(serializer, &index),
        house_designs_data: cards,
        filter_options: filter_options(&snapshot.ordered_categories()),
    })
}
