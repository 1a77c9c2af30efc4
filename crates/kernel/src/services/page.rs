//! Generic page payload: page metadata, hero, type-specific fields and the
//! serialized body stream.

use serde::Serialize;

use crate::content::block::non_empty;
use crate::content::{SerializedBlock, TreeSerializer};
use crate::error::SerializeResult;
use crate::models::{HeroRecord, ImageData, PageId, PageKind, PageRecord, SeoRecord};

/// Hero call-to-action; only emitted when both label and URL are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeroButton {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageHero {
    pub pre_title: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub overlay_opacity: f64,
    pub background_image: Option<ImageData>,
    pub background_video_url: Option<String>,
    pub popup_video_url: Option<String>,
    pub popup_button_label: Option<String>,
    pub button: Option<HeroButton>,
}

/// Fields only some page types have. Flattened into the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PageDetails {
    General {
        intro_title: String,
        intro_text: String,
    },
    Landing {
        subtitle: String,
        hide_from_navigation: bool,
    },
    Standard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSeo {
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub og_image: Option<ImageData>,
    pub twitter_card_type: String,
    pub no_index: bool,
    pub exclude_from_search: bool,
    pub exclude_from_sitemap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagePayload {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub url: Option<String>,
    pub page_type: PageKind,
    pub hero_data: Option<PageHero>,
    #[serde(flatten)]
    pub details: PageDetails,
    pub seo: PageSeo,
    pub body: Vec<SerializedBlock>,
}

/// Hero section as the frontend renders it.
pub fn hero_data(serializer: &TreeSerializer<'_>, hero: &HeroRecord) -> PageHero {
    let button = match (non_empty(&hero.button_label), non_empty(&hero.button_url)) {
        (Some(label), Some(url)) => Some(HeroButton {
            label: label.to_string(),
            url: url.to_string(),
        }),
        _ => None,
    };
    PageHero {
        pre_title: hero.pre_title.clone(),
        title: hero.title.clone(),
        text: hero.text.clone(),
        overlay_opacity: hero.overlay_opacity,
        background_image: serializer.image_data(hero.image),
        background_video_url: hero.background_video_url.clone(),
        popup_video_url: hero.popup_video_url.clone(),
        popup_button_label: hero.popup_button_label.clone(),
        button,
    }
}

fn details(serializer: &TreeSerializer<'_>, record: &PageRecord) -> PageDetails {
    match record.page_type {
        PageKind::General => PageDetails::General {
            intro_title: record.intro_title.clone(),
            intro_text: serializer.rich_text(&record.intro_text),
        },
        PageKind::Landing => PageDetails::Landing {
            subtitle: record.subtitle.clone(),
            hide_from_navigation: record.hide_from_navigation,
        },
        PageKind::Standard => PageDetails::Standard,
    }
}

fn seo(serializer: &TreeSerializer<'_>, seo: &SeoRecord) -> PageSeo {
    PageSeo {
        meta_description: seo.meta_description.clone(),
        meta_keywords: seo.meta_keywords.clone(),
        og_image: serializer.image_data(seo.og_image),
        twitter_card_type: seo.twitter_card_type.clone(),
        no_index: seo.no_index,
        exclude_from_search: seo.exclude_from_search,
        exclude_from_sitemap: seo.exclude_from_sitemap,
    }
}

/// Serialize a page. `component_type` scopes image profiles for the body.
pub fn page(
    serializer: &TreeSerializer<'_>,
    record: &PageRecord,
    component_type: Option<&str>,
) -> SerializeResult<PagePayload> {
    Ok(PagePayload {
        id: record.id,
        title: record.title.clone(),
        slug: record.slug.clone(),
        url: record.url.clone(),
        page_type: record.page_type,
        hero_data: record.hero.as_ref().map(|hero| hero_data(serializer, hero)),
        details: details(serializer, record),
        seo: seo(serializer, &record.seo),
        body: serializer.serialize_tree(&record.body, component_type)?,
    })
}
