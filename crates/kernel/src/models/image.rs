//! Stored image assets.
//!
//! The serializer never owns or mutates these; it only reads metadata and
//! asks the rendition service for derivatives.

use serde::{Deserialize, Serialize};

/// Primary key of a stored image.
pub type ImageId = u64;

/// Metadata of an uploaded source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub id: ImageId,

    /// Editor-facing title, used as the default alt text.
    #[serde(default)]
    pub title: String,

    /// Storage path relative to the media root (e.g. `original_images/house.jpg`).
    pub file: String,

    pub width: u32,
    pub height: u32,

    /// Size of the original file in bytes, when the storage layer knows it.
    #[serde(default)]
    pub file_size: Option<u64>,
}

impl ImageAsset {
    /// URL of the original upload, relative to the site root. Works with
    /// or without a trailing slash on `media_url`.
    pub fn file_url(&self, media_url: &str) -> String {
        format!(
            "{}/{}",
            media_url.trim_end_matches('/'),
            self.file.trim_start_matches('/')
        )
    }

    /// Alt text for this image: the explicit override when it has content,
    /// otherwise the title, otherwise a generic label.
    pub fn alt_text(&self, explicit: Option<&str>) -> String {
        if let Some(alt) = explicit.map(str::trim).filter(|a| !a.is_empty()) {
            return alt.to_string();
        }
        if self.title.trim().is_empty() {
            "Image".to_string()
        } else {
            self.title.clone()
        }
    }
}

/// An image rendered at its original size, as listing cards expose it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageData {
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}
