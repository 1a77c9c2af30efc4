//! Configuration loaded from environment variables.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;
use url::Url;

use crate::content::{SerializerSettings, SizeProfileRegistry};

/// Serializer configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme and host prepended to media URLs (default: http://127.0.0.1:8000).
    pub base_url: String,

    /// Root-relative prefix of uploaded files (default: /media/).
    pub media_url: String,

    /// Optional TOML file overriding or extending the image size profiles.
    pub size_profiles_path: Option<PathBuf>,

    /// Extra attempts after a failed rendition request (default: 0).
    pub rendition_retries: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        let base_url = normalize_base_url(&base_url)?;

        let media_url = env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".to_string());
        if !media_url.starts_with('/') {
            bail!("MEDIA_URL must be root-relative (start with '/'), got {media_url:?}");
        }

        let size_profiles_path = env::var("SIZE_PROFILES_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let rendition_retries = env::var("RENDITION_RETRIES")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .context("RENDITION_RETRIES must be a valid u32")?;

        Ok(Self {
            base_url,
            media_url,
            size_profiles_path,
            rendition_retries,
        })
    }

    /// Size profiles: the built-in set, overlaid with the configured file.
    pub fn size_profiles(&self) -> Result<SizeProfileRegistry> {
        let Some(path) = &self.size_profiles_path else {
            return Ok(SizeProfileRegistry::with_defaults());
        };
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read size profiles from {}", path.display()))?;
        let registry = SizeProfileRegistry::from_toml_str(&source)
            .with_context(|| format!("invalid size profiles in {}", path.display()))?;
        info!(path = %path.display(), profiles = registry.len(), "loaded size profile overlay");
        Ok(registry)
    }

    /// Serializer settings for this configuration.
    pub fn serializer_settings(&self) -> Result<SerializerSettings> {
        Ok(SerializerSettings::new(&self.base_url, &self.media_url).with_profiles(self.size_profiles()?))
    }
}

/// Validate an absolute http(s) base URL and strip its trailing slash.
fn normalize_base_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).with_context(|| format!("BASE_URL is not a valid URL: {raw:?}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("BASE_URL must use http or https, got {:?}", parsed.scheme());
    }
    Ok(raw.trim_end_matches('/').to_string())
}
