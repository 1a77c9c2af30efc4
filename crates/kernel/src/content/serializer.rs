//! Content tree serialization.
//!
//! `TreeSerializer` walks a block stream in storage order and turns each
//! block into `{type, id, value}` with a normalized payload. It owns no
//! state of its own: the settings are shared and immutable, and the store
//! and rendition service are borrowed for the duration of one request.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::SerializeResult;
use crate::models::{ContentStore, ImageAsset, ImageData, ImageId, PageId, PageSummary};
use crate::services::rendition::{Rendition, RenditionService};

use super::block::ContentBlock;
use super::filter_spec::FilterSpec;
use super::image::{ResponsiveImage, absolute_url, responsive_image};
use super::link::{self, LinkRef, ResolvedLink};
use super::registry::{HOUSE_DESIGN_SCOPE, VariantRegistry, fallback_value};
use super::rich_text;
use super::size_profile::SizeProfileRegistry;

/// Process-wide serializer configuration.
#[derive(Debug, Clone)]
pub struct SerializerSettings {
    /// Scheme and host prepended to media URLs (e.g. `http://127.0.0.1:8000`).
    pub base_url: String,
    /// Root-relative prefix of uploaded files (e.g. `/media/`).
    pub media_url: String,
    pub profiles: Arc<SizeProfileRegistry>,
    /// Builders for page body streams and everything nested in them.
    pub body_variants: Arc<VariantRegistry>,
    /// Builders for house design `additional_content` streams.
    pub house_variants: Arc<VariantRegistry>,
}

impl SerializerSettings {
    /// `media_url` is normalized to end with exactly one `/`.
    pub fn new(base_url: impl Into<String>, media_url: impl Into<String>) -> Self {
        let media_url = format!("{}/", media_url.into().trim_end_matches('/'));
        Self {
            base_url: base_url.into(),
            media_url,
            profiles: Arc::new(SizeProfileRegistry::with_defaults()),
            body_variants: Arc::new(VariantRegistry::page_body()),
            house_variants: Arc::new(VariantRegistry::house_content()),
        }
    }

    /// Registry for a stream serialized under `scope`. Both registries use
    /// some of the same tags (`content`, `cta_button`, `image`) with
    /// different shapes, so the scope decides.
    pub fn variants_for(&self, scope: Option<&str>) -> &VariantRegistry {
        match scope {
            Some(HOUSE_DESIGN_SCOPE) => &self.house_variants,
            _ => &self.body_variants,
        }
    }

    pub fn with_profiles(mut self, profiles: SizeProfileRegistry) -> Self {
        self.profiles = Arc::new(profiles);
        self
    }
}

/// One serialized block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializedBlock {
    #[serde(rename = "type")]
    pub variant: String,
    pub id: String,
    pub value: Value,
}

/// An internal page as exposed in link payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub id: PageId,
    pub title: String,
    pub url: String,
}

/// Serializes block trees against one store and rendition service.
#[derive(Clone, Copy)]
pub struct TreeSerializer<'a> {
    settings: &'a SerializerSettings,
    store: &'a dyn ContentStore,
    renditions: &'a dyn RenditionService,
}

impl<'a> TreeSerializer<'a> {
    pub fn new(
        settings: &'a SerializerSettings,
        store: &'a dyn ContentStore,
        renditions: &'a dyn RenditionService,
    ) -> Self {
        Self {
            settings,
            store,
            renditions,
        }
    }

    pub fn settings(&self) -> &SerializerSettings {
        self.settings
    }

    pub fn store(&self) -> &dyn ContentStore {
        self.store
    }

    /// Serialize a block stream.
    ///
    /// `component_type` names what the whole stream belongs to (e.g.
    /// `"house_design"`); image slots no profile matches fall back to it.
    /// Output order, length and ids follow the input exactly.
    pub fn serialize_tree(
        &self,
        blocks: &[ContentBlock],
        component_type: Option<&str>,
    ) -> SerializeResult<Vec<SerializedBlock>> {
        blocks
            .iter()
            .enumerate()
            .map(|(position, block)| self.serialize_block(block, position, component_type))
            .collect()
    }

    /// Serialize one block at `position` in its stream.
    pub fn serialize_block(
        &self,
        block: &ContentBlock,
        position: usize,
        scope: Option<&str>,
    ) -> SerializeResult<SerializedBlock> {
        let ctx = BlockContext {
            serializer: *self,
            variant: &block.variant,
            scope,
        };
        let built = match self.settings.variants_for(scope).get(&block.variant) {
            Some(definition) => (definition.build)(&ctx, &block.value)?,
            None => {
                debug!(
                    variant = %block.variant,
                    scope = scope.unwrap_or("body"),
                    "no builder registered, passing scalar fields through"
                );
                None
            }
        };
        Ok(SerializedBlock {
            variant: block.variant.clone(),
            id: block.output_id(position),
            value: built.unwrap_or_else(|| fallback_value(&block.value)),
        })
    }

    /// Resolve a link reference; never fails.
    pub fn resolve_link(&self, link: &LinkRef) -> ResolvedLink {
        link::resolve(self.store, link)
    }

    /// Page chooser value as `{id, title, url}`, or `None` when unset or
    /// the page no longer exists.
    pub fn page_link(&self, page: Option<PageId>) -> Option<PageLink> {
        let id = page?;
        let Some(PageSummary { id, title, url }) = self.store.page(id) else {
            warn!(page_id = id, "page chooser points at a missing page");
            return None;
        };
        let url = url.filter(|u| !u.trim().is_empty()).unwrap_or_else(|| {
            warn!(page_id = id, "linked page is not routable, falling back to site root");
            "/".to_string()
        });
        Some(PageLink { id, title, url })
    }

    /// Fetch a referenced image. A dangling reference is logged and treated
    /// as absent.
    pub fn image(&self, id: Option<ImageId>) -> Option<ImageAsset> {
        let id = id?;
        let image = self.store.image(id);
        if image.is_none() {
            warn!(image_id = id, "image reference points at a missing asset");
        }
        image
    }

    /// Responsive set for an image slot, using the slot's size profile.
    ///
    /// Returns `Ok(None)` for a null or dangling reference without touching
    /// the rendition service.
    pub fn resolve_image(
        &self,
        image: Option<ImageId>,
        component: &str,
        field_path: &str,
        scope: Option<&str>,
    ) -> SerializeResult<Option<ResponsiveImage>> {
        self.resolve_image_with_alt(image, None, component, field_path, scope)
    }

    /// Like [`Self::resolve_image`], with an editor-supplied alt text.
    pub fn resolve_image_with_alt(
        &self,
        image: Option<ImageId>,
        alt: Option<&str>,
        component: &str,
        field_path: &str,
        scope: Option<&str>,
    ) -> SerializeResult<Option<ResponsiveImage>> {
        let Some(asset) = self.image(image) else {
            return Ok(None);
        };
        let profile = self.settings.profiles.profile_for(component, field_path, scope);
        responsive_image(self.renditions, &self.settings.base_url, &asset, profile, alt).map(Some)
    }

    /// A single rendition at an explicit filter spec.
    pub fn rendition(&self, image: &ImageAsset, spec: &str) -> SerializeResult<Rendition> {
        let spec: FilterSpec = spec.parse()?;
        Ok(self.renditions.rendition(image, &spec)?)
    }

    /// Absolute URL of a root-relative path.
    pub fn absolute(&self, path: &str) -> String {
        absolute_url(&self.settings.base_url, path)
    }

    /// URL of an original upload.
    pub fn original_url(&self, image: &ImageAsset) -> String {
        self.absolute(&image.file_url(&self.settings.media_url))
    }

    /// An image at its original size, as `{url, alt, width, height}`.
    pub fn image_data(&self, id: Option<ImageId>) -> Option<ImageData> {
        self.image(id).map(|asset| ImageData {
            url: self.original_url(&asset),
            alt: asset.title.clone(),
            width: asset.width,
            height: asset.height,
        })
    }

    /// Rich text with internal links expanded and unsafe markup removed.
    pub fn rich_text(&self, html: &str) -> String {
        rich_text::render(html, self.store)
    }
}

/// What a builder sees while building one block.
pub struct BlockContext<'a> {
    serializer: TreeSerializer<'a>,
    variant: &'a str,
    scope: Option<&'a str>,
}

impl<'a> BlockContext<'a> {
    pub fn serializer(&self) -> &TreeSerializer<'a> {
        &self.serializer
    }

    /// Tag of the block being built.
    pub fn variant(&self) -> &str {
        self.variant
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope
    }

    pub fn link(&self, link: &LinkRef) -> ResolvedLink {
        self.serializer.resolve_link(link)
    }

    pub fn page_link(&self, page: Option<PageId>) -> Option<PageLink> {
        self.serializer.page_link(page)
    }

    /// Responsive set for the image at `field_path` within this block.
    pub fn image(
        &self,
        image: Option<ImageId>,
        alt: Option<&str>,
        field_path: &str,
    ) -> SerializeResult<Option<ResponsiveImage>> {
        self.serializer
            .resolve_image_with_alt(image, alt, self.variant, field_path, self.scope)
    }

    pub fn image_asset(&self, image: Option<ImageId>) -> Option<ImageAsset> {
        self.serializer.image(image)
    }

    /// Serialize a nested stream under this block's scope.
    pub fn nested(&self, blocks: &[ContentBlock]) -> SerializeResult<Vec<SerializedBlock>> {
        self.serializer.serialize_tree(blocks, self.scope)
    }

    pub fn rich_text(&self, html: &str) -> String {
        self.serializer.rich_text(html)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::models::{InMemoryStore, PageRecord};
    use crate::services::rendition::MediaRenditions;
    use serde_json::json;

    fn fixture() -> (SerializerSettings, InMemoryStore, MediaRenditions) {
        let mut store = InMemoryStore::new();
        store.insert_page(PageRecord {
            id: 3,
            title: "Contact".to_string(),
            slug: "contact".to_string(),
            url: Some("/contact/".to_string()),
            ..PageRecord::default()
        });
        store.insert_image(ImageAsset {
            id: 10,
            title: "Deck".to_string(),
            file: "original_images/deck.jpg".to_string(),
            width: 3000,
            height: 2000,
            file_size: None,
        });
        (
            SerializerSettings::new("http://cms.test", "/media/"),
            store,
            MediaRenditions::new("/media/"),
        )
    }

    #[test]
    fn unknown_variant_passes_scalars_through() {
        let (settings, store, renditions) = fixture();
        let serializer = TreeSerializer::new(&settings, &store, &renditions);
        let blocks = [ContentBlock::new("mystery", "abc", json!({"title": "Hi", "n": 2}))];
        let out = serializer.serialize_tree(&blocks, None).unwrap();
        assert_eq!(out[0].variant, "mystery");
        assert_eq!(out[0].id, "mystery_abc");
        assert_eq!(out[0].value, json!({"title": "Hi", "n": 2}));
    }

    #[test]
    fn mismatched_payload_falls_back() {
        let (settings, store, renditions) = fixture();
        let serializer = TreeSerializer::new(&settings, &store, &renditions);
        let blocks = [ContentBlock::new("hero", "h1", json!("not an object"))];
        let out = serializer.serialize_tree(&blocks, None).unwrap();
        assert_eq!(out[0].value, json!("not an object"));
    }

    #[test]
    fn page_link_shapes() {
        let (settings, store, renditions) = fixture();
        let serializer = TreeSerializer::new(&settings, &store, &renditions);
        assert_eq!(
            serializer.page_link(Some(3)),
            Some(PageLink {
                id: 3,
                title: "Contact".to_string(),
                url: "/contact/".to_string()
            })
        );
        assert_eq!(serializer.page_link(Some(44)), None);
        assert_eq!(serializer.page_link(None), None);
    }

    #[test]
    fn dangling_image_is_none() {
        let (settings, store, renditions) = fixture();
        let serializer = TreeSerializer::new(&settings, &store, &renditions);
        assert!(serializer.resolve_image(Some(99), "hero", "background_image", None).unwrap().is_none());
        assert!(serializer.resolve_image(None, "hero", "background_image", None).unwrap().is_none());
    }

    #[test]
    fn original_url_is_absolute() {
        let (settings, store, renditions) = fixture();
        let serializer = TreeSerializer::new(&settings, &store, &renditions);
        let image = store.image(10).unwrap();
        assert_eq!(serializer.original_url(&image), "http://cms.test/media/original_images/deck.jpg");
    }

    #[test]
    fn media_url_without_trailing_slash() {
        let (_, store, renditions) = fixture();
        let settings = SerializerSettings::new("http://cms.test", "/media");
        assert_eq!(settings.media_url, "/media/");
        let serializer = TreeSerializer::new(&settings, &store, &renditions);
        let image = store.image(10).unwrap();
        assert_eq!(serializer.original_url(&image), "http://cms.test/media/original_images/deck.jpg");
    }

    #[test]
    fn scope_selects_registry() {
        let (settings, store, renditions) = fixture();
        let serializer = TreeSerializer::new(&settings, &store, &renditions);
        let cta = json!({
            "title": "Visit us",
            "button": {"text": "Contact", "href": {"page_link": 3}}
        });
        let blocks = [ContentBlock::new("cta_button", "b1", cta)];

        let body = serializer.serialize_tree(&blocks, None).unwrap();
        assert_eq!(body[0].value["title"], "Visit us");
        assert_eq!(body[0].value["button"]["url"], "/contact/");

        let house = serializer.serialize_tree(&blocks, Some(HOUSE_DESIGN_SCOPE)).unwrap();
        assert_eq!(house[0].value["button_text"], "Learn More");
        assert!(house[0].value.get("title").is_none());
    }

    #[test]
    fn scalar_body_blocks_pass_through_intact() {
        let (settings, store, renditions) = fixture();
        let serializer = TreeSerializer::new(&settings, &store, &renditions);
        let quote = json!({"quote": "Best build we've had.", "author": "Sam", "position": "Owner"});
        let blocks = [ContentBlock::new("quote", "q1", quote.clone())];
        let out = serializer.serialize_tree(&blocks, None).unwrap();
        assert_eq!(out[0].value, quote);
    }
}
