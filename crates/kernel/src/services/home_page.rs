//! Home page payload.
//!
//! Besides the body stream, the landing page exposes its hero fields
//! directly: the two-word title, the typed phrases, service boxes with
//! fixed rendition sizes, and a background rendition.

use serde::Serialize;

use crate::content::{SerializedBlock, TreeSerializer};
use crate::error::SerializeResult;
use crate::models::{HomePageRecord, ImageId, PageId, ServiceBox};

const BACKGROUND_SPEC: &str = "fill-1920x1080|format-webp";
const HERO_SPEC: &str = "fill-1600x900|format-webp";
const BOX_SPEC: &str = "fill-400x300|format-webp";
const BOX_SMALL_SPEC: &str = "fill-200x150|format-webp";
const BOX_FULL_SPEC: &str = "width-1920|format-webp";

/// A single rendition with both its relative and absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenditionImage {
    pub url: String,
    pub full_url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// Service box image set. URLs are relative; the frontend prefixes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceBoxImage {
    pub url: String,
    pub small: String,
    pub full: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceBoxPayload {
    pub id: u64,
    pub index: usize,
    pub title: String,
    pub description: String,
    pub image: Option<ServiceBoxImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePagePayload {
    pub id: PageId,
    pub title: String,
    pub main_title: [String; 2],
    pub typed_texts_list: Vec<String>,
    pub description: String,
    pub cta_text: String,
    pub cta_link: String,
    pub background_image: Option<RenditionImage>,
    pub service_boxes_list: Vec<ServiceBoxPayload>,
    pub intro: String,
    pub hero: Option<RenditionImage>,
    pub body: Vec<SerializedBlock>,
}

fn rendition_image(
    serializer: &TreeSerializer<'_>,
    image: Option<ImageId>,
    spec: &str,
) -> SerializeResult<Option<RenditionImage>> {
    let Some(asset) = serializer.image(image) else {
        return Ok(None);
    };
    let rendition = serializer.rendition(&asset, spec)?;
    Ok(Some(RenditionImage {
        full_url: serializer.absolute(&rendition.url),
        url: rendition.url,
        width: rendition.width,
        height: rendition.height,
        alt: asset.alt_text(None),
    }))
}

fn service_box(
    serializer: &TreeSerializer<'_>,
    index: usize,
    service: &ServiceBox,
) -> SerializeResult<ServiceBoxPayload> {
    let image = match serializer.image(service.image) {
        Some(asset) => Some(ServiceBoxImage {
            url: serializer.rendition(&asset, BOX_SPEC)?.url,
            small: serializer.rendition(&asset, BOX_SMALL_SPEC)?.url,
            full: serializer.rendition(&asset, BOX_FULL_SPEC)?.url,
        }),
        None => None,
    };
    Ok(ServiceBoxPayload {
        id: service.id,
        index,
        title: service.title.clone(),
        description: service.description.clone(),
        image,
    })
}

/// Serialize the home page.
pub fn home_page(serializer: &TreeSerializer<'_>, home: &HomePageRecord) -> SerializeResult<HomePagePayload> {
    let service_boxes_list = home
        .service_boxes
        .iter()
        .enumerate()
        .map(|(index, service)| service_box(serializer, index, service))
        .collect::<SerializeResult<Vec<_>>>()?;

    Ok(HomePagePayload {
        id: home.id,
        title: home.title.clone(),
        main_title: [home.main_title_word_1.clone(), home.main_title_word_2.clone()],
        typed_texts_list: home.typed_texts.clone(),
        description: home.description.clone(),
        cta_text: home.cta_text.clone(),
        cta_link: home.cta_link.clone(),
        background_image: rendition_image(serializer, home.background_image, BACKGROUND_SPEC)?,
        service_boxes_list,
        intro: serializer.rich_text(&home.intro),
        hero: rendition_image(serializer, home.hero_image, HERO_SPEC)?,
        body: serializer.serialize_tree(&home.body, None)?,
    })
}
