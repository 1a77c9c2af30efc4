//! Rendition service.
//!
//! The serializer never resizes images itself. It asks a `RenditionService`
//! for a derivative of an asset at a given filter spec and gets back the
//! derivative's URL and dimensions.

use std::fmt;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::content::filter_spec::FilterSpec;
use crate::models::ImageAsset;

/// A generated (or cached) image derivative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendition {
    /// URL relative to the site root, e.g. `/media/images/porch.fill-400x300.webp`.
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenditionError {
    #[error("image {0} has no source file")]
    MissingSource(u64),

    #[error("rendition backend failed for image {image_id} at {spec}: {message}")]
    Backend {
        image_id: u64,
        spec: String,
        message: String,
    },
}

/// Produces derivatives of stored images.
pub trait RenditionService: Send + Sync {
    fn rendition(&self, image: &ImageAsset, spec: &FilterSpec) -> Result<Rendition, RenditionError>;
}

/// Renditions served from the media root under `images/`, named the way the
/// storage backend writes them: `{stem}.{spec}.{ext}`.
#[derive(Debug, Clone)]
pub struct MediaRenditions {
    media_url: String,
}

impl MediaRenditions {
    pub fn new(media_url: impl Into<String>) -> Self {
        let mut media_url = media_url.into();
        if !media_url.ends_with('/') {
            media_url.push('/');
        }
        Self { media_url }
    }

    /// File name of a derivative without the directory.
    pub fn file_name(image: &ImageAsset, spec: &FilterSpec) -> String {
        let name = image.file.rsplit('/').next().unwrap_or(&image.file);
        let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
        format!(
            "{stem}.{}.{}",
            spec.file_suffix(),
            spec.output_extension(&image.file)
        )
    }
}

impl RenditionService for MediaRenditions {
    fn rendition(&self, image: &ImageAsset, spec: &FilterSpec) -> Result<Rendition, RenditionError> {
        if image.file.trim().is_empty() {
            return Err(RenditionError::MissingSource(image.id));
        }
        let (width, height) = spec.output_size(image.width, image.height);
        let url = format!("{}images/{}", self.media_url, Self::file_name(image, spec));
        debug!(image_id = image.id, spec = %spec, %url, "computed rendition");
        Ok(Rendition { url, width, height })
    }
}

/// Pause before each retry, in milliseconds. The last entry repeats.
const RETRY_DELAYS_MS: &[u64] = &[50, 200, 800];

/// Retries backend failures a bounded number of times, pausing between
/// attempts.
///
/// `MissingSource` is permanent and returned immediately.
pub struct RetryingRenditions<R> {
    inner: R,
    retries: u32,
    delays: Vec<Duration>,
}

impl<R: RenditionService> RetryingRenditions<R> {
    pub fn new(inner: R, retries: u32) -> Self {
        Self {
            inner,
            retries,
            delays: RETRY_DELAYS_MS.iter().copied().map(Duration::from_millis).collect(),
        }
    }

    /// Replace the retry schedule. An empty schedule retries immediately.
    pub fn with_delays(mut self, delays: Vec<Duration>) -> Self {
        self.delays = delays;
        self
    }

    /// Pause before retry number `attempt` (1-based).
    fn delay_for(&self, attempt: u32) -> Duration {
        let index = (attempt.saturating_sub(1) as usize).min(self.delays.len().saturating_sub(1));
        self.delays.get(index).copied().unwrap_or_default()
    }
}

impl<R: RenditionService> RenditionService for RetryingRenditions<R> {
    fn rendition(&self, image: &ImageAsset, spec: &FilterSpec) -> Result<Rendition, RenditionError> {
        let mut attempt = 0;
        loop {
            match self.inner.rendition(image, spec) {
                Err(e @ RenditionError::Backend { .. }) if attempt < self.retries => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    warn!(
                        image_id = image.id,
                        spec = %spec,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying rendition"
                    );
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                }
                result => return result,
            }
        }
    }
}

impl<R> fmt::Debug for RetryingRenditions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryingRenditions")
            .field("retries", &self.retries)
            .field("delays", &self.delays)
            .finish()
    }
}
