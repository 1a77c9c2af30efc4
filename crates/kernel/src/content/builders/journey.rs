//! `dream_home_journey`: closing banner with two CTAs over a background image.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{CTA_BUTTON_TEXT, CtaPayload, CtaValue, cta, text_or};
use crate::content::block::lenient;
use crate::content::image::ResponsiveImage;
use crate::content::registry::{BuildResult, run};
use crate::content::serializer::BlockContext;
use crate::error::SerializeResult;
use crate::models::ImageId;

const TITLE: &str = "Begin your dream home journey with Shambala Homes";
const DESCRIPTION: &str = "Discover modern house designs and packages to turn your vision into reality, from open living spaces to stunning alfresco homes.";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JourneyValue {
    title: Option<String>,
    description: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    background_image: Option<ImageId>,
    primary_cta: CtaValue,
    secondary_cta: CtaValue,
}

#[derive(Debug, Serialize)]
struct JourneyPayload {
    title: String,
    description: String,
    background_image: Option<ResponsiveImage>,
    primary_cta: CtaPayload,
    secondary_cta: CtaPayload,
}

pub fn build(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, journey)
}

fn journey(ctx: &BlockContext<'_>, value: JourneyValue) -> SerializeResult<JourneyPayload> {
    Ok(JourneyPayload {
        title: text_or(&value.title, TITLE),
        description: text_or(&value.description, DESCRIPTION),
        background_image: ctx.image(value.background_image, None, "background_image")?,
        primary_cta: cta(ctx, &value.primary_cta, CTA_BUTTON_TEXT),
        secondary_cta: cta(ctx, &value.secondary_cta, CTA_BUTTON_TEXT),
    })
}
