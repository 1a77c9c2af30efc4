//! Variant registry.
//!
//! Provides:
//! - `VariantDefinition`: name, label and payload builder of one block variant
//! - `VariantRegistry`: lookup by variant tag, one registry per stream kind
//! - `run`: decode a payload into a builder's typed input and encode its output
//! - `fallback_value`: what an unknown or drifted block serializes to

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use super::builders;
use super::serializer::BlockContext;
use crate::error::SerializeResult;

/// Scope of a house design's `additional_content` stream. Blocks serialized
/// under it use the house registry.
pub const HOUSE_DESIGN_SCOPE: &str = "house_design";

/// Outcome of a builder: `Ok(None)` asks for the generic fallback.
pub type BuildResult = SerializeResult<Option<Value>>;

/// A payload builder.
pub type BuilderFn = fn(&BlockContext<'_>, &Value) -> BuildResult;

/// Definition of a single block variant.
#[derive(Clone)]
pub struct VariantDefinition {
    /// Variant tag as stored (e.g. "hero").
    pub name: String,
    /// Human-readable label (e.g. "Hero Section").
    pub label: String,
    pub build: BuilderFn,
}

impl VariantDefinition {
    pub fn new(name: &str, label: &str, build: BuilderFn) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            build,
        }
    }
}

impl fmt::Debug for VariantDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantDefinition")
            .field("name", &self.name)
            .field("label", &self.label)
            .finish()
    }
}

/// Registry of variant definitions, keyed by tag.
#[derive(Debug, Clone)]
pub struct VariantRegistry {
    variants: HashMap<String, VariantDefinition>,
}

impl Default for VariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl VariantRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            variants: HashMap::new(),
        }
    }

    /// Variants of page body streams: the page sections plus the shared
    /// text, media and layout blocks.
    pub fn page_body() -> Self {
        let mut registry = Self::new();
        registry.register_all(&PAGE_SECTIONS);
        registry.register_all(&GENERAL_BLOCKS);
        registry
    }

    /// Variants of a house design's `additional_content` stream.
    pub fn house_content() -> Self {
        let mut registry = Self::new();
        registry.register_all(&HOUSE_CONTENT);
        registry
    }

    /// Register a single variant, replacing any previous one with that tag.
    pub fn register(&mut self, definition: VariantDefinition) {
        self.variants.insert(definition.name.clone(), definition);
    }

    /// Look up a variant by tag.
    pub fn get(&self, name: &str) -> Option<&VariantDefinition> {
        self.variants.get(name)
    }

    /// Check whether a variant is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    /// Return the number of registered variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Return all registered tags, sorted.
    pub fn variant_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variants.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn register_all(&mut self, table: &[(&str, &str, BuilderFn)]) {
        for &(name, label, build) in table {
            self.register(VariantDefinition::new(name, label, build));
        }
    }
}

const PAGE_SECTIONS: [(&str, &str, BuilderFn); 8] = [
    ("hero", "Hero Section", builders::hero::build),
    (
        "residential_projects",
        "Residential Projects Section",
        builders::projects::build_residential,
    ),
    (
        "commercial_projects",
        "Commercial Projects Section",
        builders::projects::build_commercial,
    ),
    ("horizontal_slider", "Horizontal Slider", builders::slider::build),
    (
        "multi_image_content",
        "Multi Image Content Section",
        builders::multi_image::build,
    ),
    ("quality_homes", "Quality Homes Section", builders::quality_homes::build),
    (
        "dream_home_journey",
        "Dream Home Journey Section",
        builders::journey::build,
    ),
    ("blog_section", "Blog Section", builders::blog::build),
];

/// Shared blocks. Nested layout streams reuse the same tags (`heading`,
/// `content`, `button`, `image`, `video`...), so they live in the body
/// registry too.
const GENERAL_BLOCKS: [(&str, &str, BuilderFn); 15] = [
    ("heading", "Heading", builders::general::build_heading),
    ("content", "Rich Text Content", builders::general::build_content),
    ("button", "Button", builders::general::build_button),
    ("multiple_buttons", "Multiple Buttons", builders::general::build_multiple_buttons),
    ("cta_button", "CTA Button", builders::general::build_cta_button),
    ("image", "Image", builders::general::build_image),
    ("fullwidth_image", "Fullwidth Image", builders::general::build_image),
    ("video", "Video", builders::general::build_video),
    ("image_gallery", "Image Gallery", builders::general::build_gallery),
    (
        "content_with_width",
        "Content with Variable Width",
        builders::general::build_content_with_width,
    ),
    ("two_columns", "Two Columns", builders::general::build_two_columns),
    (
        "content_with_image",
        "Content with Image",
        builders::general::build_content_with_image,
    ),
    ("accordion", "Accordion", builders::general::build_accordion),
    ("table", "Table", builders::general::build_table),
    ("card_grid", "Card Grid", builders::general::build_card_grid),
];

const HOUSE_CONTENT: [(&str, &str, BuilderFn); 7] = [
    ("content", "Content Block", builders::house::build_content),
    ("cta_button", "CTA Button", builders::house::build_cta_button),
    ("image", "Responsive Image", builders::house::build_image),
    ("image_gallery", "Image Gallery", builders::house::build_gallery),
    ("specifications", "House Specifications", builders::house::build_specifications),
    ("pricing", "Pricing", builders::house::build_pricing),
    ("features_list", "Features List", builders::house::build_features),
];

/// Decode `value` as `I`, run `build`, and encode the result.
///
/// A payload that does not fit `I` is a schema drift, not an error: it is
/// logged and the caller falls back to the raw fields.
pub fn run<I, O>(
    ctx: &BlockContext<'_>,
    value: &Value,
    build: impl FnOnce(&BlockContext<'_>, I) -> SerializeResult<O>,
) -> BuildResult
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input = match I::deserialize(value) {
        Ok(input) => input,
        Err(e) => {
            warn!(
                variant = ctx.variant(),
                error = %e,
                "block payload does not match its variant, passing scalar fields through"
            );
            return Ok(None);
        }
    };
    let output = build(ctx, input)?;
    Ok(Some(serde_json::to_value(output)?))
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

/// Generic serialization for blocks without a usable builder.
///
/// Scalars pass through unchanged. In objects and arrays, scalar members
/// are kept and nested objects or arrays are dropped.
pub fn fallback_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| is_scalar(v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().filter(|v| is_scalar(v)).cloned().collect()),
        scalar => scalar.clone(),
    }
}
