//! `horizontal_slider`: ordered service slides.

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

const TITLE: &str = "Our Services";
const SLIDE_BUTTON_TEXT: &str = "Learn More";
const AUTOPLAY_DELAY_MS: u64 = 3000;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SliderValue {
    title: Option<String>,
    description: Option<String>,
    slides: ListValue<SlideValue>,
    autoplay_enabled: Option<bool>,
    autoplay_delay: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SlideValue {
    /// Display order as typed by the editor ("1", "2", ...).
    order: Option<String>,
    title: Option<String>,
    description: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    image: Option<ImageId>,
    button_text: Option<String>,
    #[serde(flatten)]
    link: LinkFields,
}

impl SlideValue {
    fn order(&self) -> Option<u32> {
        match self.order.as_deref() {
            None => Some(1),
            Some(order) => order.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SliderPayload {
    title: String,
    description: Option<String>,
    slides: Vec<SlidePayload>,
    autoplay_enabled: bool,
    autoplay_delay: u64,
}

#[derive(Debug, Serialize)]
struct SlidePayload {
    /// 1-based authoring position, stable across reordering.
    id: usize,
    order: Option<u32>,
    title: String,
    description: String,
    image: Option<ResponsiveImage>,
    button_text: String,
    link: ResolvedLink,
}

pub fn build(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, slider)
}

fn slider(ctx: &BlockContext<'_>, value: SliderValue) -> SerializeResult<SliderPayload> {
    let mut ordered: Vec<(usize, &SlideValue)> = value.slides.iter().enumerate().collect();
    // Stable: equal orders keep authoring order, unparseable orders go last.
    ordered.sort_by_key(|(_, slide)| slide.order().map_or((1, 0), |order| (0, order)));

    let slides = ordered
        .into_iter()
        .map(|(index, slide)| {
            Ok(SlidePayload {
                id: index + 1,
                order: slide.order(),
                title: slide.title.clone().unwrap_or_default(),
                description: slide.description.clone().unwrap_or_default(),
                image: ctx.image(slide.image, None, "slides.image")?,
                button_text: text_or(&slide.button_text, SLIDE_BUTTON_TEXT),
                link: ctx.link(&slide.link.link_ref()),
            })
        })
        .collect::<SerializeResult<Vec<_>>>()?;

    Ok(SliderPayload {
        title: text_or(&value.title, TITLE),
        description: opt_text(&value.description),
        slides,
        autoplay_enabled: value.autoplay_enabled.unwrap_or(true),
        autoplay_delay: delay_ms(&value.autoplay_delay, AUTOPLAY_DELAY_MS),
    })
}
