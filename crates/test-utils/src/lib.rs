//! Homestead test utilities.
//!
//! Helpers for integration testing: record fixtures, stream builders,
//! a rendition service that records its calls, and assertion utilities
//! for serialized output.

use std::sync::Mutex;

use homestead_kernel::content::{
    ContentBlock, FilterSpec, SerializedBlock, SerializerSettings, TreeSerializer,
};
use homestead_kernel::error::SerializeResult;
use homestead_kernel::models::{ImageAsset, ImageId, InMemoryStore, PageId, PageRecord};
use homestead_kernel::services::{
    MediaRenditions, Rendition, RenditionError, RenditionService,
};
use serde_json::Value as JsonValue;

/// Base URL used by [`TestSite`].
pub const BASE_URL: &str = "http://cms.test";

/// Media prefix used by [`TestSite`].
pub const MEDIA_URL: &str = "/media/";

/// Create a test image with a 3000x2000 original.
pub fn test_image(id: ImageId, title: &str) -> ImageAsset {
    let stem = title.to_lowercase().replace(' ', "-");
    ImageAsset {
        id,
        title: title.to_string(),
        file: format!("original_images/{stem}.jpg"),
        width: 3000,
        height: 2000,
        file_size: None,
    }
}

/// Create a routable test page with an empty body.
pub fn test_page(id: PageId, title: &str, url: &str) -> PageRecord {
    PageRecord {
        id,
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        url: Some(url.to_string()),
        ..PageRecord::default()
    }
}

/// Create a stream block.
pub fn block(variant: &str, id: &str, value: JsonValue) -> ContentBlock {
    ContentBlock::new(variant, id, value)
}

/// Wrap a value as a list item, the way list fields are stored.
pub fn item(id: &str, value: JsonValue) -> JsonValue {
    serde_json::json!({"type": "item", "id": id, "value": value})
}

/// Rendition service that delegates to [`MediaRenditions`] and records
/// every `(image, spec)` request.
#[derive(Debug)]
pub struct RecordingRenditions {
    inner: MediaRenditions,
    calls: Mutex<Vec<(ImageId, String)>>,
}

impl Default for RecordingRenditions {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingRenditions {
    pub fn new() -> Self {
        Self {
            inner: MediaRenditions::new(MEDIA_URL),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, in order.
    pub fn calls(&self) -> Vec<(ImageId, String)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of requests seen so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl RenditionService for RecordingRenditions {
    fn rendition(&self, image: &ImageAsset, spec: &FilterSpec) -> Result<Rendition, RenditionError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((image.id, spec.to_string()));
        }
        self.inner.rendition(image, spec)
    }
}

/// Rendition service whose backend is always down.
#[derive(Debug, Default)]
pub struct FailingRenditions;

impl RenditionService for FailingRenditions {
    fn rendition(&self, image: &ImageAsset, spec: &FilterSpec) -> Result<Rendition, RenditionError> {
        Err(RenditionError::Backend {
            image_id: image.id,
            spec: spec.to_string(),
            message: "storage unavailable".to_string(),
        })
    }
}

/// A store, settings and recording rendition service wired together.
#[derive(Debug)]
pub struct TestSite {
    pub settings: SerializerSettings,
    pub store: InMemoryStore,
    pub renditions: RecordingRenditions,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    /// Create an empty site at [`BASE_URL`].
    pub fn new() -> Self {
        Self {
            settings: SerializerSettings::new(BASE_URL, MEDIA_URL),
            store: InMemoryStore::new(),
            renditions: RecordingRenditions::new(),
        }
    }

    /// Add a page.
    pub fn with_page(mut self, page: PageRecord) -> Self {
        self.store.insert_page(page);
        self
    }

    /// Add an image.
    pub fn with_image(mut self, image: ImageAsset) -> Self {
        self.store.insert_image(image);
        self
    }

    /// A serializer borrowing this site's collaborators.
    pub fn serializer(&self) -> TreeSerializer<'_> {
        TreeSerializer::new(&self.settings, &self.store, &self.renditions)
    }

    /// Serialize a stream.
    pub fn serialize(
        &self,
        blocks: &[ContentBlock],
        component_type: Option<&str>,
    ) -> SerializeResult<Vec<SerializedBlock>> {
        self.serializer().serialize_tree(blocks, component_type)
    }

    /// Serialize a stream straight to JSON, panicking on failure.
    pub fn serialize_json(&self, blocks: &[ContentBlock]) -> JsonValue {
        match self.serialize(blocks, None).map(serde_json::to_value) {
            Ok(Ok(json)) => json,
            Ok(Err(e)) => panic!("serialized stream is not encodable: {e}"),
            Err(e) => panic!("serialization failed: {e}"),
        }
    }
}

/// Assertion helpers for serialized output.
pub mod assert {
    use serde_json::Value;

    /// Assert that a JSON value has a specific key.
    pub fn has_key(value: &Value, key: &str) {
        assert!(
            value.get(key).is_some(),
            "Expected JSON to have key '{key}', got: {value}"
        );
    }

    /// Assert that a JSON value equals expected.
    pub fn json_eq(actual: &Value, expected: &Value) {
        assert_eq!(
            actual,
            expected,
            "JSON mismatch:\nactual: {}\nexpected: {}",
            serde_json::to_string_pretty(actual).unwrap_or_default(),
            serde_json::to_string_pretty(expected).unwrap_or_default()
        );
    }

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a responsive image has all three breakpoints under `base`.
    pub fn responsive_image(image: &Value, base: &str) {
        for key in ["src", "desktop", "tablet", "mobile"] {
            let url = image[key].as_str().unwrap_or_default();
            assert!(
                url.starts_with(base),
                "Expected image '{key}' to start with '{base}', got: {image}"
            );
        }
        assert!(image["alt"].is_string(), "Expected image alt text, got: {image}");
    }

    /// Assert the `{type, id}` sequence of a serialized stream.
    pub fn stream_ids(stream: &Value, expected: &[(&str, &str)]) {
        let actual: Vec<(&str, &str)> = stream
            .as_array()
            .map(|blocks| {
                blocks
                    .iter()
                    .map(|b| {
                        (
                            b["type"].as_str().unwrap_or_default(),
                            b["id"].as_str().unwrap_or_default(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();
        assert_eq!(actual, expected, "stream order mismatch");
    }
}
