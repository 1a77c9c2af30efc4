//! Site-wide header, footer and contact settings.

use serde::{Deserialize, Serialize};

use crate::content::block::lenient;
use crate::content::{ContentBlock, ListValue};

use super::page::PageId;

/// Per-site settings edited from the admin sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettingsRecord {
    pub header_logo_text: String,
    /// Stream of `menu_item` blocks.
    pub header_menu_items: Vec<ContentBlock>,
    /// Stream of `footer_section` blocks.
    pub footer_content: Vec<ContentBlock>,
    /// Rich text.
    pub footer_copyright: String,

    pub contact_email: String,
    pub contact_phone: String,
    pub contact_address: String,

    pub facebook_url: String,
    pub twitter_url: String,
    pub instagram_url: String,
    pub linkedin_url: String,
    pub youtube_url: String,
}

impl Default for SiteSettingsRecord {
    fn default() -> Self {
        Self {
            header_logo_text: "SHAMBALA HOMES".to_string(),
            header_menu_items: Vec::new(),
            footer_content: Vec::new(),
            footer_copyright: String::new(),
            contact_email: String::new(),
            contact_phone: String::new(),
            contact_address: String::new(),
            facebook_url: String::new(),
            twitter_url: String::new(),
            instagram_url: String::new(),
            linkedin_url: String::new(),
            youtube_url: String::new(),
        }
    }
}

/// Value of a `menu_item` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavigationItem {
    pub label: Option<String>,
    pub aria_label: Option<String>,
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    pub page: Option<PageId>,
    pub sub_items: ListValue<SubMenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SubMenuItem {
    pub label: Option<String>,
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    pub page: Option<PageId>,
}

/// Layout of a footer section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterSectionType {
    Columns,
    Text,
    Contact,
}

/// Value of a `footer_section` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FooterSection {
    pub section_type: Option<FooterSectionType>,
    pub columns: ListValue<FooterColumn>,
    pub content: Option<String>,
    pub show_email: Option<bool>,
    pub show_phone: Option<bool>,
    pub show_address: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FooterColumn {
    pub heading: Option<String>,
    pub links: ListValue<FooterLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FooterLink {
    pub text: Option<String>,
    pub link: Option<String>,
    #[serde(deserialize_with = "lenient::opt_id")]
    pub page: Option<PageId>,
}
