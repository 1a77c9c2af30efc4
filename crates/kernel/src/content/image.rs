//! Responsive image sets.

use serde::Serialize;

use crate::error::SerializeResult;
use crate::models::ImageAsset;
use crate::services::rendition::{Rendition, RenditionService};

use super::size_profile::SizeProfile;

/// Absolute URLs of one image at each breakpoint.
///
/// `src` repeats the desktop URL for consumers that only read one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponsiveImage {
    pub src: String,
    pub desktop: String,
    pub tablet: String,
    pub mobile: String,
    pub alt: String,
}

/// Join a site base URL and a root-relative path without doubling the slash.
pub fn absolute_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

/// Request all three breakpoints of `profile` for `image`.
///
/// Any rendition failure fails the whole set; a partial set is never returned.
pub fn responsive_image(
    renditions: &dyn RenditionService,
    base_url: &str,
    image: &ImageAsset,
    profile: &SizeProfile,
    alt: Option<&str>,
) -> SerializeResult<ResponsiveImage> {
    let absolute = |r: Rendition| absolute_url(base_url, &r.url);
    let desktop = absolute(renditions.rendition(image, &profile.desktop)?);
    let tablet = absolute(renditions.rendition(image, &profile.tablet)?);
    let mobile = absolute(renditions.rendition(image, &profile.mobile)?);
    Ok(ResponsiveImage {
        src: desktop.clone(),
        desktop,
        tablet,
        mobile,
        alt: image.alt_text(alt),
    })
}
