//! Field groups shared by several variants.

use serde::{Deserialize, Serialize};

use crate::content::block::{lenient, non_empty};
use crate::content::link::{LinkRef, ResolvedLink};
use crate::content::serializer::{BlockContext, PageLink};
use crate::models::{ImageId, PageId};

/// Default label of a call-to-action button.
pub const CTA_BUTTON_TEXT: &str = "Get Started";

/// `is_external_link` / `external_url` / `page_link`, as repeated on slides,
/// projects, posts and CTAs. Older content may carry a free-form `link`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LinkFields {
    pub is_external_link: Option<bool>,
    pub external_url: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    pub page_link: Option<PageId>,
    pub link: Option<String>,
}

impl LinkFields {
    pub fn link_ref(&self) -> LinkRef {
        LinkRef {
            is_external: self.is_external_link.unwrap_or(false),
            external_url: non_empty(&self.external_url).map(str::to_string),
            page: self.page_link,
            literal: non_empty(&self.link).map(str::to_string),
        }
    }

    fn has_target(&self) -> bool {
        self.page_link.is_some()
            || non_empty(&self.external_url).is_some()
            || non_empty(&self.link).is_some()
    }
}

/// Stored call-to-action struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CtaValue {
    pub button_text: Option<String>,
    #[serde(flatten)]
    pub link: LinkFields,
}

impl CtaValue {
    /// Nothing was filled in: no label and nowhere to go.
    pub fn is_blank(&self) -> bool {
        non_empty(&self.button_text).is_none() && !self.link.has_target()
    }
}

/// Serialized call-to-action.
///
/// Echoes the stored fields for consumers that branch on them, plus the
/// resolved `url`/`is_external` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CtaPayload {
    pub button_text: String,
    pub is_external_link: bool,
    pub external_url: Option<String>,
    pub page_link: Option<PageLink>,
    pub url: String,
    pub is_external: bool,
}

/// Serialize a required CTA.
pub fn cta(ctx: &BlockContext<'_>, value: &CtaValue, default_text: &str) -> CtaPayload {
    let ResolvedLink { url, is_external } = ctx.link(&value.link.link_ref());
    CtaPayload {
        button_text: value
            .button_text
            .clone()
            .unwrap_or_else(|| default_text.to_string()),
        is_external_link: value.link.is_external_link.unwrap_or(false),
        external_url: non_empty(&value.link.external_url).map(str::to_string),
        page_link: ctx.page_link(value.link.page_link),
        url,
        is_external,
    }
}

/// Serialize an optional CTA: `None` when absent or left blank.
pub fn optional_cta(
    ctx: &BlockContext<'_>,
    value: Option<&CtaValue>,
    default_text: &str,
) -> Option<CtaPayload> {
    value
        .filter(|v| !v.is_blank())
        .map(|v| cta(ctx, v, default_text))
}

/// Stored image-with-alt struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageValue {
    #[serde(deserialize_with = "lenient::opt_id")]
    pub image: Option<ImageId>,
    pub alt_text: Option<String>,
}

/// Text with a default used only when the field is missing.
pub fn text_or(value: &Option<String>, default: &str) -> String {
    value.clone().unwrap_or_else(|| default.to_string())
}

/// Optional text, with blank treated as absent.
pub fn opt_text(value: &Option<String>) -> Option<String> {
    non_empty(value).map(str::to_string)
}

/// Autoplay delay in milliseconds, stored as text.
pub fn delay_ms(value: &Option<String>, default: u64) -> u64 {
    value
        .as_deref()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
