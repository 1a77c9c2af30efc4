//! Variants of a house design's `additional_content` stream.
//!
//! Each `content` block wraps a nested stream of the other variants here;
//! the nested stream is serialized under the same scope as its parent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{CtaPayload, CtaValue, cta, opt_text, text_or};
use crate::content::ListValue;
use crate::content::block::{ContentBlock, lenient};
use crate::content::image::ResponsiveImage;
use crate::content::registry::{BuildResult, run};
use crate::content::serializer::{BlockContext, SerializedBlock};
use crate::error::SerializeResult;
use crate::models::ImageId;
use crate::models::decimal::{self, Decimal};
use crate::models::house_design::{block_width_display, price_display, storeys_label};

const BUTTON_TEXT: &str = "Learn More";
const BUTTON_STYLE: &str = "primary";
const GALLERY_LAYOUT: &str = "grid";
const PRICE_LABEL: &str = "Starting from";
const CURRENCY: &str = "$";

pub fn build_content(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, content)
}

fn content(
    ctx: &BlockContext<'_>,
    blocks: Option<Vec<ContentBlock>>,
) -> SerializeResult<Vec<SerializedBlock>> {
    ctx.nested(&blocks.unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CtaButtonValue {
    button_style: Option<String>,
    #[serde(flatten)]
    cta: CtaValue,
}

#[derive(Debug, Serialize)]
struct CtaButtonPayload {
    #[serde(flatten)]
    cta: CtaPayload,
    button_style: String,
}

pub fn build_cta_button(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: CtaButtonValue| {
        Ok(CtaButtonPayload {
            cta: cta(ctx, &value.cta, BUTTON_TEXT),
            button_style: text_or(&value.button_style, BUTTON_STYLE),
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CaptionedImageValue {
    #[serde(deserialize_with = "lenient::opt_id")]
    image: Option<ImageId>,
    alt_text: Option<String>,
    caption: Option<String>,
}

#[derive(Debug, Serialize)]
struct CaptionedImagePayload {
    image: Option<ResponsiveImage>,
    caption: Option<String>,
}

fn captioned(
    ctx: &BlockContext<'_>,
    value: &CaptionedImageValue,
    field_path: &str,
) -> SerializeResult<CaptionedImagePayload> {
    Ok(CaptionedImagePayload {
        image: ctx.image(value.image, value.alt_text.as_deref(), field_path)?,
        caption: opt_text(&value.caption),
    })
}

pub fn build_image(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: CaptionedImageValue| {
        captioned(ctx, &value, "image")
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GalleryValue {
    images: ListValue<CaptionedImageValue>,
    layout: Option<String>,
}

#[derive(Debug, Serialize)]
struct GalleryPayload {
    layout: String,
    images: Vec<CaptionedImagePayload>,
}

pub fn build_gallery(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |ctx, value: GalleryValue| {
        let mut images = Vec::with_capacity(value.images.len());
        for item in value.images.iter() {
            let entry = captioned(ctx, item, "images.image")?;
            // Unresolvable gallery entries are dropped rather than left as holes.
            if entry.image.is_some() {
                images.push(entry);
            }
        }
        Ok(GalleryPayload {
            layout: text_or(&value.layout, GALLERY_LAYOUT),
            images,
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SpecsValue {
    storeys: Option<String>,
    bedrooms: Option<u32>,
    #[serde(deserialize_with = "decimal::opt")]
    bathrooms: Option<Decimal>,
    garage_spaces: Option<u32>,
    #[serde(deserialize_with = "decimal::opt")]
    min_block_width: Option<Decimal>,
    #[serde(deserialize_with = "decimal::opt")]
    max_block_width: Option<Decimal>,
}

#[derive(Debug, Serialize)]
struct SpecsPayload {
    storeys: Option<String>,
    storeys_label: Option<String>,
    bedrooms: Option<u32>,
    bathrooms: Option<Decimal>,
    garage_spaces: Option<u32>,
    block_width: String,
}

pub fn build_specifications(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |_, value: SpecsValue| {
        let storeys = opt_text(&value.storeys);
        Ok(SpecsPayload {
            storeys_label: storeys.as_deref().map(storeys_label),
            storeys,
            bedrooms: value.bedrooms,
            bathrooms: value.bathrooms,
            garage_spaces: value.garage_spaces,
            block_width: block_width_display(
                value.min_block_width.as_ref(),
                value.max_block_width.as_ref(),
            ),
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PricingValue {
    #[serde(deserialize_with = "decimal::opt")]
    base_price: Option<Decimal>,
    price_label: Option<String>,
    currency: Option<String>,
    price_note: Option<String>,
}

#[derive(Debug, Serialize)]
struct PricingPayload {
    base_price: Option<Decimal>,
    display: String,
    label: String,
    currency: String,
    note: Option<String>,
}

pub fn build_pricing(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |_, value: PricingValue| {
        let currency = text_or(&value.currency, CURRENCY);
        let base_price = value.base_price.filter(|p| !p.is_zero());
        Ok(PricingPayload {
            display: price_display(base_price.as_ref(), &currency),
            base_price,
            label: text_or(&value.price_label, PRICE_LABEL),
            currency,
            note: opt_text(&value.price_note),
        })
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FeatureItemValue {
    icon: Option<String>,
    label: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Serialize)]
struct FeatureItemPayload {
    icon: Option<String>,
    label: String,
    value: String,
}

pub fn build_features(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, |_, items: ListValue<FeatureItemValue>| {
        Ok(items
            .iter()
            .map(|item| FeatureItemPayload {
                icon: opt_text(&item.icon),
                label: item.label.clone().unwrap_or_default(),
                value: item.value.clone().unwrap_or_default(),
            })
            .collect::<Vec<_>>())
    })
}
