//! Home page record.

use serde::{Deserialize, Serialize};

use crate::content::ContentBlock;

use super::image::ImageId;
use super::page::PageId;

/// A tile in the hero section's service grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBox {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<ImageId>,
}

/// The site's landing page: hero fields plus the body stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomePageRecord {
    pub id: PageId,
    pub title: String,
    pub main_title_word_1: String,
    pub main_title_word_2: String,
    pub description: String,
    pub cta_text: String,
    pub cta_link: String,
    pub background_image: Option<ImageId>,

    /// Rotating phrases shown after the main title, in display order.
    pub typed_texts: Vec<String>,
    pub service_boxes: Vec<ServiceBox>,

    /// Rich text kept from the previous page layout.
    pub intro: String,
    pub hero_image: Option<ImageId>,

    pub body: Vec<ContentBlock>,
}

impl Default for HomePageRecord {
    fn default() -> Self {
        Self {
            id: 0,
            title: String::new(),
            main_title_word_1: "we".to_string(),
            main_title_word_2: "make".to_string(),
            description: String::new(),
            cta_text: "Get a Free Site Visit".to_string(),
            cta_link: "#contact".to_string(),
            background_image: None,
            typed_texts: Vec::new(),
            service_boxes: Vec::new(),
            intro: String::new(),
            hero_image: None,
            body: Vec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_hero_fields_take_defaults() {
        let home: HomePageRecord = serde_json::from_str(r#"{"id": 2, "title": "Home"}"#).unwrap();
        assert_eq!(home.main_title_word_1, "we");
        assert_eq!(home.main_title_word_2, "make");
        assert_eq!(home.cta_link, "#contact");
        assert!(home.body.is_empty());
    }
}
