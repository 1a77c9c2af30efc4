//! `quality_homes`: feature list with images and an optional CTA.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{CTA_BUTTON_TEXT, CtaPayload, CtaValue, optional_cta, text_or};
use crate::content::ListValue;
use crate::content::block::lenient;
use crate::content::image::ResponsiveImage;
use crate::content::registry::{BuildResult, run};
use crate::content::serializer::BlockContext;
use crate::error::SerializeResult;
use crate::models::ImageId;

const MAIN_TITLE: &str = "Building quality homes for over 40 years";
const FEATURE_ICON: &str = "✓";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QualityHomesValue {
    main_title: Option<String>,
    features: ListValue<FeatureValue>,
    cta: Option<CtaValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FeatureValue {
    icon: Option<String>,
    title: Option<String>,
    description: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    image: Option<ImageId>,
}

#[derive(Debug, Serialize)]
struct QualityHomesPayload {
    main_title: String,
    features: Vec<FeaturePayload>,
    cta: Option<CtaPayload>,
}

#[derive(Debug, Serialize)]
struct FeaturePayload {
    icon: String,
    title: String,
    description: String,
    image: Option<ResponsiveImage>,
}

pub fn build(ctx: &BlockContext<'_>, value: &Value) -> BuildResult {
    run(ctx, value, quality_homes)
}

fn quality_homes(
    ctx: &BlockContext<'_>,
    value: QualityHomesValue,
) -> SerializeResult<QualityHomesPayload> {
    let features = value
        .features
        .iter()
        .map(|feature| {
            Ok(FeaturePayload {
                icon: text_or(&feature.icon, FEATURE_ICON),
                title: feature.title.clone().unwrap_or_default(),
                description: feature.description.clone().unwrap_or_default(),
                image: ctx.image(feature.image, None, "features.image")?,
            })
        })
        .collect::<SerializeResult<Vec<_>>>()?;

    Ok(QualityHomesPayload {
        main_title: text_or(&value.main_title, MAIN_TITLE),
        features,
        cta: optional_cta(ctx, value.cta.as_ref(), CTA_BUTTON_TEXT),
    })
}
