//! Site settings payload: header navigation, footer, contact and social links.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::content::{ContentBlock, TreeSerializer};
use crate::models::site_settings::{
    FooterColumn, FooterSection, FooterSectionType, NavigationItem, SubMenuItem,
};
use crate::models::{PageId, SiteSettingsRecord};

const MENU_ITEM: &str = "menu_item";
const FOOTER_SECTION: &str = "footer_section";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSettingsPayload {
    pub header: Header,
    pub footer: Footer,
    pub contact: Contact,
    pub social: SocialLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub logo_text: String,
    pub menu_items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: String,
    pub aria_label: String,
    pub link: String,
    /// Omitted entirely when the item has no children.
    #[serde(rename = "subItems", skip_serializing_if = "Option::is_none")]
    pub sub_items: Option<Vec<MenuLink>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuLink {
    pub label: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    pub sections: Vec<FooterSectionPayload>,
    pub copyright: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterSectionPayload {
    #[serde(rename = "type")]
    pub section_type: FooterSectionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<FooterColumnPayload>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<FooterContact>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterColumnPayload {
    pub heading: String,
    pub links: Vec<FooterLinkPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterLinkPayload {
    pub text: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FooterContact {
    pub show_email: bool,
    pub show_phone: bool,
    pub show_address: bool,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Only configured networks are emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub facebook: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub twitter: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instagram: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub linkedin: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub youtube: String,
}

/// Serialize the site settings record.
pub fn site_settings(
    serializer: &TreeSerializer<'_>,
    settings: &SiteSettingsRecord,
) -> SiteSettingsPayload {
    let menu_items = stream_values::<NavigationItem>(&settings.header_menu_items, MENU_ITEM)
        .map(|item| menu_item(serializer, &item))
        .collect();
    let sections = stream_values::<FooterSection>(&settings.footer_content, FOOTER_SECTION)
        .map(|section| footer_section(serializer, settings, &section))
        .collect();

    SiteSettingsPayload {
        header: Header {
            logo_text: settings.header_logo_text.clone(),
            menu_items,
        },
        footer: Footer {
            sections,
            copyright: serializer.rich_text(&settings.footer_copyright),
        },
        contact: Contact {
            email: settings.contact_email.clone(),
            phone: settings.contact_phone.clone(),
            address: settings.contact_address.clone(),
        },
        social: SocialLinks {
            facebook: settings.facebook_url.trim().to_string(),
            twitter: settings.twitter_url.trim().to_string(),
            instagram: settings.instagram_url.trim().to_string(),
            linkedin: settings.linkedin_url.trim().to_string(),
            youtube: settings.youtube_url.trim().to_string(),
        },
    }
}

/// Decode the values of the blocks tagged `variant`, skipping the rest.
fn stream_values<'a, T: DeserializeOwned>(
    blocks: &'a [ContentBlock],
    variant: &'a str,
) -> impl Iterator<Item = T> + 'a {
    blocks.iter().filter_map(move |block| {
        if block.variant != variant {
            debug!(variant = %block.variant, expected = variant, "skipping unexpected settings block");
            return None;
        }
        match T::deserialize(&block.value) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(variant, block_id = ?block.id, error = %e, "settings block does not match its variant");
                None
            }
        }
    })
}

/// A chosen page's URL overrides the typed link. A missing or unroutable
/// page falls back to the typed link.
fn menu_link(serializer: &TreeSerializer<'_>, link: &Option<String>, page: Option<PageId>) -> String {
    let routed = page
        .and_then(|id| serializer.store().page(id))
        .and_then(|summary| summary.url)
        .filter(|url| !url.trim().is_empty());
    if let Some(url) = routed {
        return url;
    }
    if let Some(id) = page {
        debug!(page_id = id, "menu page is missing or unroutable, using typed link");
    }
    link.clone().unwrap_or_default()
}

fn menu_item(serializer: &TreeSerializer<'_>, item: &NavigationItem) -> MenuItem {
    let sub_items = (!item.sub_items.is_empty()).then(|| {
        item.sub_items
            .iter()
            .map(|sub: &SubMenuItem| MenuLink {
                label: sub.label.clone().unwrap_or_default(),
                link: menu_link(serializer, &sub.link, sub.page),
            })
            .collect()
    });
    MenuItem {
        label: item.label.clone().unwrap_or_default(),
        aria_label: item.aria_label.clone().unwrap_or_default(),
        link: menu_link(serializer, &item.link, item.page),
        sub_items,
    }
}

fn footer_column(serializer: &TreeSerializer<'_>, column: &FooterColumn) -> FooterColumnPayload {
    FooterColumnPayload {
        heading: column.heading.clone().unwrap_or_default(),
        links: column
            .links
            .iter()
            .map(|link| FooterLinkPayload {
                text: link.text.clone().unwrap_or_default(),
                link: menu_link(serializer, &link.link, link.page),
            })
            .collect(),
    }
}

fn footer_section(
    serializer: &TreeSerializer<'_>,
    settings: &SiteSettingsRecord,
    section: &FooterSection,
) -> FooterSectionPayload {
    let section_type = section.section_type.unwrap_or(FooterSectionType::Columns);
    let mut payload = FooterSectionPayload {
        section_type,
        columns: None,
        content: None,
        contact: None,
    };
    match section_type {
        FooterSectionType::Columns => {
            payload.columns = Some(
                section
                    .columns
                    .iter()
                    .map(|column| footer_column(serializer, column))
                    .collect(),
            );
        }
        FooterSectionType::Text => {
            payload.content = Some(serializer.rich_text(section.content.as_deref().unwrap_or_default()));
        }
        FooterSectionType::Contact => {
            payload.contact = Some(FooterContact {
                show_email: section.show_email.unwrap_or(true),
                show_phone: section.show_phone.unwrap_or(true),
                show_address: section.show_address.unwrap_or(true),
                email: settings.contact_email.clone(),
                phone: settings.contact_phone.clone(),
                address: settings.contact_address.clone(),
            });
        }
    }
    payload
}
