//! `hero`: full-bleed video/poster header with an image slider.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{LinkFields, delay_ms, opt_text, text_or};
use crate::content::ListValue;
use crate::content::block::lenient;
use crate::content::image::ResponsiveImage;
use crate::content::link::ResolvedLink;
use crate::content::registry::{BuildResult, run};
use crate::content::serializer::BlockContext;
use crate::error::SerializeResult;
use crate::models::ImageId;

const HERO_TITLE: &str = "Transform your<br/>outdoor dreams";
const CTA_TEXT: &str = "Get a Free Site Visit";
const CTA_LINK: &str = "#contact";
const SLIDE_BUTTON_TEXT: &str = "Read more";
const AUTOPLAY_DELAY_MS: u64 = 5000;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HeroValue {
    hero_title: Option<String>,
    cta_text: Option<String>,
    cta_link: Option<String>,
    background_video: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    background_image: Option<ImageId>,
    slides: ListValue<SlideValue>,
    autoplay_enabled: Option<bool>,
    autoplay_delay: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SlideValue {
    title: Option<String>,
    description: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    image: Option<ImageId>,
    #[serde(deserialize_with = "lenient::opt_id")]
    full_image: Option<ImageId>,
    button_text: Option<String>,
    #[serde(flatten)]
    link: LinkFields,
}

#[derive(Debug, Serialize)]
struct HeroPayload {
    hero_title: String,
    cta_text: String,
    cta_link: String,
    background_video: Option<String>,
    background_image: Option<ResponsiveImage>,
    slides: Vec<SlidePayload>,
    autoplay_enabled: bool,
    autoplay_delay: u64,
}

#[derive(Debug, Serialize)]
struct SlidePayload {
    title: String,
    description: String,
    image: Option<ResponsiveImage>,
    full_image: Option<ResponsiveImage>,
    button_text: String,
    link: ResolvedLink,
}

pub fn build(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, hero)
}

fn hero(ctx: &BlockContext<'_>, value: HeroValue) -> SerializeResult<HeroPayload> {
    let slides = value
        .slides
        .iter()
        .map(|slide| {
            Ok(SlidePayload {
                title: slide.title.clone().unwrap_or_default(),
                description: slide.description.clone().unwrap_or_default(),
                image: ctx.image(slide.image, None, "slides.image")?,
                full_image: ctx.image(slide.full_image, None, "slides.full_image")?,
                button_text: text_or(&slide.button_text, SLIDE_BUTTON_TEXT),
                link: ctx.link(&slide.link.link_ref()),
            })
        })
        .collect::<SerializeResult<Vec<_>>>()?;

    Ok(HeroPayload {
        hero_title: text_or(&value.hero_title, HERO_TITLE),
        cta_text: text_or(&value.cta_text, CTA_TEXT),
        cta_link: text_or(&value.cta_link, CTA_LINK),
        background_video: opt_text(&value.background_video),
        background_image: ctx.image(value.background_image, None, "background_image")?,
        slides,
        autoplay_enabled: value.autoplay_enabled.unwrap_or(true),
        autoplay_delay: delay_ms(&value.autoplay_delay, AUTOPLAY_DELAY_MS),
    })
}
