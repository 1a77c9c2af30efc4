//! Page records as handed over by the persistence layer.

use serde::{Deserialize, Serialize};

use crate::content::ContentBlock;
use crate::content::block::lenient;

use super::image::ImageId;

/// Primary key of a page in the page tree.
pub type PageId = u64;

/// Page types with fields of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Internal content page with an optional intro.
    General,
    /// Campaign page with a subtitle, often kept out of menus.
    Landing,
    #[default]
    Standard,
}

/// Optional hero section attached to a general or landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroRecord {
    pub pre_title: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    pub image: Option<ImageId>,
    pub background_video_url: Option<String>,
    pub popup_video_url: Option<String>,
    pub popup_button_label: Option<String>,
    pub button_label: Option<String>,
    pub button_url: Option<String>,
    /// Background overlay, 0.0 - 1.0.
    pub overlay_opacity: f64,
}

impl Default for HeroRecord {
    fn default() -> Self {
        Self {
            pre_title: None,
            title: None,
            text: None,
            image: None,
            background_video_url: None,
            popup_video_url: None,
            popup_button_label: None,
            button_label: None,
            button_url: None,
            overlay_opacity: 0.5,
        }
    }
}

/// Search engine and sitemap settings every page carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoRecord {
    pub meta_description: Option<String>,
    pub meta_keywords: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    pub og_image: Option<ImageId>,
    pub twitter_card_type: String,
    pub exclude_from_sitemap: bool,
    pub exclude_from_search: bool,
    pub no_index: bool,
}

impl Default for SeoRecord {
    fn default() -> Self {
        Self {
            meta_description: None,
            meta_keywords: None,
            og_image: None,
            twitter_card_type: "summary".to_string(),
            exclude_from_sitemap: false,
            exclude_from_search: false,
            no_index: false,
        }
    }
}

/// A published page with its body stream.
///
/// Publish-state and sitemap filtering happen before a record reaches the
/// serializer, so everything here is assumed visible. The SEO flags are
/// still echoed for the frontend's meta tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: PageId,
    pub title: String,
    #[serde(default)]
    pub slug: String,

    /// Routable URL relative to the site root. `None` when the page is not
    /// attached to a site (so it cannot be linked to).
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub page_type: PageKind,

    #[serde(default)]
    pub hero: Option<HeroRecord>,

    /// General pages: shown before the body when there is no hero.
    #[serde(default)]
    pub intro_title: String,
    #[serde(default)]
    pub intro_text: String,

    /// Landing pages only.
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub hide_from_navigation: bool,

    #[serde(flatten)]
    pub seo: SeoRecord,

    #[serde(default)]
    pub body: Vec<ContentBlock>,
}

impl PageRecord {
    pub fn summary(&self) -> PageSummary {
        PageSummary {
            id: self.id,
            title: self.title.clone(),
            url: self.url.clone(),
        }
    }
}

/// The subset of a page that link targets need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: PageId,
    pub title: String,
    pub url: Option<String>,
}
