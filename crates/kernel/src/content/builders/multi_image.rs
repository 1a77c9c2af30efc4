//! `multi_image_content`: two-image studio section with rich text and a CTA.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{CTA_BUTTON_TEXT, CtaPayload, CtaValue, ImageValue, cta, opt_text, text_or};
use crate::content::ListValue;
use crate::content::image::ResponsiveImage;
use crate::content::registry::{BuildResult, run};
use crate::content::rich_text::paragraphs;
use crate::content::serializer::BlockContext;
use crate::error::SerializeResult;

const TITLE: &str = "Bring your dream home to life";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MultiImageValue {
    section_title: Option<String>,
    section_subtitle: Option<String>,
    /// Rich text.
    description: Option<String>,
    /// Left (tall) image first, right (wide) image second.
    images: ListValue<ImageValue>,
    cta: CtaValue,
}

#[derive(Debug, Serialize)]
struct MultiImagePayload {
    title: String,
    subtitle: Option<String>,
    description: Vec<String>,
    images: Vec<ResponsiveImage>,
    cta: CtaPayload,
}

pub fn build(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, multi_image)
}

fn multi_image(ctx: &BlockContext<'_>, value: MultiImageValue) -> SerializeResult<MultiImagePayload> {
    let mut images = Vec::with_capacity(value.images.len());
    for item in value.images.iter() {
        if let Some(image) = ctx.image(item.image, item.alt_text.as_deref(), "images.image")? {
            images.push(image);
        }
    }

    Ok(MultiImagePayload {
        title: text_or(&value.section_title, TITLE),
        subtitle: opt_text(&value.section_subtitle),
        description: paragraphs(value.description.as_deref().unwrap_or_default()),
        images,
        cta: cta(ctx, &value.cta, CTA_BUTTON_TEXT),
    })
}
